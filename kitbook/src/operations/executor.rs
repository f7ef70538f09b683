//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans
//! and applies them to the database.

use crate::database::Database;
use crate::error::Result;
use crate::reservation::{Reservation, ReservationId};

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
///
/// This struct provides information about what happened during execution,
/// including whether it was a dry run and what actions were taken.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// Id of the booking created by the plan. Always `None` in dry-run mode.
    pub reservation_id: Option<ReservationId>,

    /// Number of bookings deleted by cancel and purge actions.
    pub removed_count: usize,

    /// Bookings deleted by purge actions, oldest end date first.
    pub purged: Vec<Reservation>,
}

impl ExecutionResult {
    fn new(plan: &OperationPlan, dry_run: bool) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            reservation_id: None,
            removed_count: 0,
            purged: Vec::new(),
        }
    }
}

/// Executes operation plans against the database.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (validating without changes).
///
/// # Examples
///
/// ```no_run
/// use kitbook::operations::{BookOptions, BookPlan, PlanExecutor};
/// use kitbook::{ConfigBuilder, Database, DatabaseConfig, EquipmentId, UserId};
/// use chrono::NaiveDate;
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/kitbook.db")).unwrap();
/// let config = ConfigBuilder::new().build().unwrap();
/// let start = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2030, 5, 3).unwrap();
///
/// let options = BookOptions::new(EquipmentId::new(1), start, end, UserId::new("olena").unwrap());
/// let plan = BookPlan::new(options, &config).build_plan(&db).unwrap();
///
/// // Preview
/// let preview = PlanExecutor::new(&mut db).dry_run().execute(&plan).unwrap();
/// assert!(preview.reservation_id.is_none());
///
/// // Apply
/// let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
/// assert!(result.reservation_id.is_some());
/// ```
pub struct PlanExecutor<'a> {
    db: &'a mut Database,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub fn new(db: &'a mut Database) -> Self {
        Self { db, dry_run: false }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode, the executor reports the plan but does not
    /// modify the database.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// If in dry-run mode, reports the plan but makes no database changes.
    /// Otherwise, applies all actions in order and stops at the first
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns an error if any action fails to execute. A booking whose
    /// period was taken after planning fails with
    /// [`crate::Error::ConcurrentConflict`].
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::new(plan, self.dry_run);
        if self.dry_run {
            return Ok(result);
        }

        for action in &plan.actions {
            self.execute_action(action, &mut result)?;
        }

        Ok(result)
    }

    fn execute_action(&mut self, action: &PlanAction, result: &mut ExecutionResult) -> Result<()> {
        match action {
            PlanAction::CreateReservation(reservation) => {
                // Overlap is re-checked under the write lock.
                let id = self.db.insert_reservation_exclusive(reservation)?;
                log::info!(
                    "booked equipment {} for {} ({}..{}) as {id}",
                    reservation.equipment(),
                    reservation.owner(),
                    reservation.start(),
                    reservation.end()
                );
                result.reservation_id = Some(id);
            }
            PlanAction::DeleteReservation(id) => {
                if self.db.delete_reservation(*id)? {
                    result.removed_count += 1;
                }
            }
            PlanAction::PurgeEndedBefore(date) => {
                let purged = self.db.take_reservations_ended_before(*date)?;
                result.removed_count += purged.len();
                result.purged.extend(purged);
            }
        }
        Ok(())
    }
}
