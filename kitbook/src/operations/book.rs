//! Booking validation and planning.
//!
//! A booking request passes four rules, checked in this order with the first
//! failure reported:
//!
//! 1. the start date is not after the end date,
//! 2. the start date is not in the past,
//! 3. the period is at most `max_duration_days` long,
//! 4. no existing booking of the same equipment shares a day with it.

use chrono::{Local, NaiveDate};

use crate::config::Config;
use crate::database::Database;
use crate::equipment::EquipmentId;
use crate::error::{BookingRejection, Error, Result};
use crate::reservation::{Reservation, ReservationId, UserId};

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// Options for a booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookOptions {
    /// The equipment to book.
    pub equipment: EquipmentId,

    /// First day of the booking (inclusive).
    pub start: NaiveDate,

    /// Last day of the booking (inclusive).
    pub end: NaiveDate,

    /// The member making the booking; becomes its owner.
    pub user: UserId,

    /// Date the request is evaluated on. `None` means the local date.
    pub today: Option<NaiveDate>,
}

impl BookOptions {
    /// Creates booking options evaluated against the local date.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use kitbook::operations::BookOptions;
    /// use kitbook::{EquipmentId, UserId};
    ///
    /// let day = NaiveDate::from_ymd_opt(2030, 1, 10).unwrap();
    /// let options = BookOptions::new(EquipmentId::new(1), day, day, UserId::new("olena").unwrap());
    /// assert!(options.today.is_none());
    /// ```
    #[must_use]
    pub const fn new(equipment: EquipmentId, start: NaiveDate, end: NaiveDate, user: UserId) -> Self {
        Self {
            equipment,
            start,
            end,
            user,
            today: None,
        }
    }

    /// Evaluates the request as if it were made on `today`.
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }
}

/// Applies the date rules that need no stored state.
///
/// # Errors
///
/// Returns the first of [`BookingRejection::InvalidRange`],
/// [`BookingRejection::PastStartDate`] or
/// [`BookingRejection::DurationExceeded`] that applies.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use kitbook::operations::book::check_period;
/// use kitbook::BookingRejection;
///
/// let d = |day| NaiveDate::from_ymd_opt(2030, 1, day).unwrap();
/// assert!(check_period(d(5), d(9), d(1), 30).is_ok());
/// assert!(matches!(
///     check_period(d(9), d(5), d(1), 30),
///     Err(BookingRejection::InvalidRange { .. })
/// ));
/// ```
pub fn check_period(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
    max_days: u32,
) -> std::result::Result<(), BookingRejection> {
    if start > end {
        return Err(BookingRejection::InvalidRange { start, end });
    }
    if start < today {
        return Err(BookingRejection::PastStartDate { start, today });
    }
    let days = (end - start).num_days();
    if days > i64::from(max_days) {
        return Err(BookingRejection::DurationExceeded { days, max_days });
    }
    Ok(())
}

/// A booking plan generator.
///
/// This struct is responsible for analyzing a booking request and
/// generating a plan that describes what actions to take.
pub struct BookPlan<'a> {
    options: BookOptions,
    config: &'a Config,
}

impl<'a> BookPlan<'a> {
    /// Creates a new booking plan with the given options and config.
    #[must_use]
    pub const fn new(options: BookOptions, config: &'a Config) -> Self {
        Self { options, config }
    }

    /// Builds an operation plan for this booking request.
    ///
    /// This method performs all validation and determines what actions
    /// are needed. It does NOT modify the database.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The equipment does not exist ([`Error::NotFound`])
    /// - A booking rule fails ([`Error::BookingRejected`])
    /// - The database cannot be queried
    pub fn build_plan(&self, db: &Database) -> Result<OperationPlan> {
        let BookOptions {
            equipment,
            start,
            end,
            ref user,
            today,
        } = self.options;
        let today = today.unwrap_or_else(|| Local::now().date_naive());

        if !Database::equipment_exists(db.connection(), equipment)? {
            return Err(Error::NotFound {
                resource: format!("equipment {equipment}"),
            });
        }

        check_period(start, end, today, self.config.max_duration_days())?;

        let reservation = Reservation::builder(equipment, user.clone())
            .period(start, end)
            .build()?;

        if let Some(existing) = Database::find_first_overlap(db.connection(), equipment, start, end)?
        {
            return Err(BookingRejection::PeriodOverlap {
                existing: existing.id().unwrap_or(ReservationId::new(0)),
                existing_start: existing.start(),
                existing_end: existing.end(),
            }
            .into());
        }

        let mut plan = OperationPlan::new(format!("Book equipment {equipment} for {user}"));
        if start == today {
            plan = plan.add_warning("The booking starts today");
        }
        Ok(plan.add_action(PlanAction::CreateReservation(reservation)))
    }
}

/// Validates a booking request and stores it.
///
/// # Errors
///
/// Returns [`Error::BookingRejected`] when a rule fails,
/// [`Error::ConcurrentConflict`] when another request took the period
/// between validation and the write, and [`Error::NotFound`] for unknown
/// equipment.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use kitbook::operations::book::{validate_and_book, BookOptions};
/// use kitbook::{ConfigBuilder, Database, DatabaseConfig, EquipmentId, UserId};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/kitbook.db")).unwrap();
/// let config = ConfigBuilder::new().build().unwrap();
/// let start = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2030, 5, 3).unwrap();
///
/// let options = BookOptions::new(EquipmentId::new(1), start, end, UserId::new("olena").unwrap());
/// let id = validate_and_book(&mut db, &config, options).unwrap();
/// println!("Equipment booked ({id})");
/// ```
pub fn validate_and_book(
    db: &mut Database,
    config: &Config,
    options: BookOptions,
) -> Result<ReservationId> {
    let plan = BookPlan::new(options, config).build_plan(db)?;
    let result = PlanExecutor::new(db).execute(&plan)?;
    result.reservation_id.ok_or_else(|| Error::Validation {
        field: "booking".into(),
        message: "booking plan did not create a reservation".into(),
    })
}
