//! Shared test utilities for database unit tests.

use chrono::NaiveDate;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::equipment::{EquipmentId, NewEquipment};
use crate::reservation::{Reservation, UserId};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the lifetime of the test process.
    std::mem::forget(dir);

    db
}

/// Stores a minimal equipment record under `name`.
///
/// # Panics
///
/// Panics if the name is invalid or the insert fails.
pub fn create_test_equipment(db: &mut Database, name: &str) -> EquipmentId {
    let equipment = NewEquipment::new(name, 1.5).validate().unwrap();
    db.insert_equipment(&equipment).unwrap()
}

/// Builds an unsaved reservation for `owner`.
///
/// # Panics
///
/// Panics if the owner name is invalid or `end` precedes `start`.
#[must_use]
pub fn create_test_reservation(
    equipment: EquipmentId,
    owner: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Reservation {
    Reservation::builder(equipment, UserId::new(owner).unwrap())
        .period(start, end)
        .build()
        .unwrap()
}

/// A day in July 2030, far enough ahead to never be in the past.
///
/// # Panics
///
/// Panics if `d` is not a valid day of July.
#[must_use]
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 7, d).unwrap()
}
