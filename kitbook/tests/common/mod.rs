//! Common test utilities for integration tests.

use std::path::PathBuf;

use chrono::{Days, NaiveDate};
use tempfile::TempDir;

use kitbook::operations::{validate_and_book, BookOptions};
use kitbook::{Config, Database, DatabaseConfig, EquipmentId, NewEquipment, ReservationId, Result, UserId};

/// The date every scenario treats as today.
#[allow(dead_code)]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 4, 1).unwrap()
}

/// `today() + n` days.
#[allow(dead_code)]
pub fn plus(n: u64) -> NaiveDate {
    today() + Days::new(n)
}

/// `today() - n` days.
#[allow(dead_code)]
pub fn minus(n: u64) -> NaiveDate {
    today() - Days::new(n)
}

/// A throwaway club: a data directory with an open database.
pub struct TestClub {
    pub db: Database,
    pub config: Config,
    pub db_path: PathBuf,
    _dir: TempDir,
}

#[allow(dead_code)]
impl TestClub {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("kitbook.db");
        let db = Database::open(DatabaseConfig::new(&db_path)).unwrap();
        Self {
            db,
            config,
            db_path,
            _dir: dir,
        }
    }

    /// Adds equipment straight to the database.
    pub fn equipment(&mut self, name: &str) -> EquipmentId {
        let new = NewEquipment::new(name, 2.0).validate().unwrap();
        self.db.insert_equipment(&new).unwrap()
    }

    /// Books `[start, end]` for `user`, evaluated on [`today`].
    pub fn book(
        &mut self,
        equipment: EquipmentId,
        user: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ReservationId> {
        let options = BookOptions::new(equipment, start, end, UserId::new(user).unwrap())
            .with_today(today());
        validate_and_book(&mut self.db, &self.config, options)
    }
}

/// Unwraps the rejection kind from a booking error.
#[allow(dead_code)]
pub fn rejection_kind(err: &kitbook::Error) -> &'static str {
    err.rejection()
        .map(kitbook::BookingRejection::kind)
        .unwrap_or_else(|| panic!("expected a booking rejection, got {err:?}"))
}
