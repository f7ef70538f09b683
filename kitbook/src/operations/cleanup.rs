//! Cleanup of bookings that have ended.
//!
//! A booking has ended once its end date is strictly before today. The purge
//! runs before the equipment list is shown and on demand through the
//! `purge` command. Running it twice in a row removes nothing the second
//! time.

use chrono::NaiveDate;

use crate::database::Database;
use crate::reservation::Reservation;
use crate::Result;

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// Result of a purge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeResult {
    /// Number of bookings removed (or that would be removed in dry-run mode).
    pub removed_count: usize,
    /// Bookings that were (or would be) removed, oldest end date first.
    pub removed_reservations: Vec<Reservation>,
}

/// Cleanup operations for removing ended bookings.
///
/// All operations are static methods that work on a database instance.
pub struct CleanupOperations;

impl CleanupOperations {
    /// Removes every booking whose end date is before `today`.
    ///
    /// # Arguments
    ///
    /// * `db` - Database to operate on
    /// * `today` - The current date
    /// * `dry_run` - If true, report what would be removed without removing
    ///
    /// # Errors
    ///
    /// Returns an error if database operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chrono::Local;
    /// use kitbook::database::{Database, DatabaseConfig};
    /// use kitbook::operations::CleanupOperations;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/kitbook.db")).unwrap();
    /// let today = Local::now().date_naive();
    ///
    /// let preview = CleanupOperations::purge_expired(&mut db, today, true).unwrap();
    /// println!("Would remove {} bookings", preview.removed_count);
    ///
    /// let result = CleanupOperations::purge_expired(&mut db, today, false).unwrap();
    /// println!("Removed {} bookings", result.removed_count);
    /// ```
    pub fn purge_expired(db: &mut Database, today: NaiveDate, dry_run: bool) -> Result<PurgeResult> {
        if dry_run {
            let ended = Database::find_reservations_ended_before(db.connection(), today)?;
            return Ok(PurgeResult {
                removed_count: ended.len(),
                removed_reservations: ended,
            });
        }

        let plan = OperationPlan::new(format!("Purge bookings that ended before {today}"))
            .add_action(PlanAction::PurgeEndedBefore(today));
        let result = PlanExecutor::new(db).execute(&plan)?;

        if result.removed_count > 0 {
            log::info!("purged {} ended booking(s)", result.removed_count);
        }

        Ok(PurgeResult {
            removed_count: result.removed_count,
            removed_reservations: result.purged,
        })
    }
}
