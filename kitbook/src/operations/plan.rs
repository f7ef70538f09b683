//! Plan types for booking operations.
//!
//! This module defines the plan structures that describe what actions
//! will be taken during an operation, without actually performing them.

use chrono::NaiveDate;

use crate::reservation::{Reservation, ReservationId};

/// A single action to be taken during plan execution.
///
/// Each action corresponds to a specific database operation that will
/// be performed when the plan is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Store a new booking, re-checking for overlaps under the write lock.
    CreateReservation(Reservation),

    /// Delete a booking.
    DeleteReservation(ReservationId),

    /// Delete every booking that ended before the given date.
    PurgeEndedBefore(NaiveDate),
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateReservation(r) => format!(
                "Book equipment {} for {} from {} to {}",
                r.equipment(),
                r.owner(),
                r.start(),
                r.end()
            ),
            Self::DeleteReservation(id) => format!("Cancel booking {id}"),
            Self::PurgeEndedBefore(date) => format!("Remove bookings that ended before {date}"),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use kitbook::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Book equipment 3");
    /// assert_eq!(plan.description, "Book equipment 3");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use kitbook::operations::{OperationPlan, PlanAction};
    /// use kitbook::ReservationId;
    ///
    /// let plan = OperationPlan::new("Test")
    ///     .add_action(PlanAction::DeleteReservation(ReservationId::new(4)));
    ///
    /// assert_eq!(plan.actions.len(), 1);
    /// ```
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
