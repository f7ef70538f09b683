//! Cancel operation planning and execution.
//!
//! A booking may be cancelled by its owner or by a member holding one of the
//! privileged positions. Cancelling a booking that does not exist succeeds
//! with a warning.

use crate::auth::Authorizer;
use crate::config::Config;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{ReservationId, UserId};

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// Options for a cancel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOptions {
    /// The booking to cancel.
    pub reservation: ReservationId,

    /// The member asking for the cancellation.
    pub user: UserId,
}

impl CancelOptions {
    /// Creates cancel options.
    #[must_use]
    pub const fn new(reservation: ReservationId, user: UserId) -> Self {
        Self { reservation, user }
    }
}

/// A cancel plan generator.
pub struct CancelPlan<'a> {
    options: CancelOptions,
    authorizer: &'a dyn Authorizer,
    privileged: Vec<String>,
}

impl<'a> CancelPlan<'a> {
    /// Creates a cancel plan that consults `authorizer` for the privileged
    /// positions named in `config`.
    #[must_use]
    pub fn new(options: CancelOptions, authorizer: &'a dyn Authorizer, config: &Config) -> Self {
        Self {
            options,
            authorizer,
            privileged: config.privileged_positions(),
        }
    }

    /// Builds the plan.
    ///
    /// The authorizer is only consulted when the requester does not own the
    /// booking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthorized`] if the requester neither owns the
    /// booking nor holds a privileged position, or a database error.
    pub fn build_plan(&self, db: &Database) -> Result<OperationPlan> {
        let id = self.options.reservation;
        let plan = OperationPlan::new(format!("Cancel booking {id}"));

        let Some(existing) = Database::get_reservation(db.connection(), id)? else {
            return Ok(plan.add_warning(format!("No booking {id} found (already cancelled)")));
        };

        let user = &self.options.user;
        if existing.owner() != user && !self.authorizer.has_role(user, &self.privileged) {
            return Err(Error::NotAuthorized {
                user: user.clone(),
                action: format!("cancel booking {id} owned by {}", existing.owner()),
            });
        }

        Ok(plan.add_action(PlanAction::DeleteReservation(id)))
    }
}

/// Cancels a booking on behalf of `user`.
///
/// Returns `true` if a booking was removed and `false` if it did not exist.
///
/// # Errors
///
/// See [`CancelPlan::build_plan`].
pub fn cancel(
    db: &mut Database,
    reservation: ReservationId,
    user: UserId,
    authorizer: &dyn Authorizer,
    config: &Config,
) -> Result<bool> {
    let plan = CancelPlan::new(CancelOptions::new(reservation, user), authorizer, config)
        .build_plan(db)?;
    let result = PlanExecutor::new(db).execute(&plan)?;
    Ok(result.removed_count > 0)
}
