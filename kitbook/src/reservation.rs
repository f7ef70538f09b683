//! Reservation types for tracking equipment bookings.
//!
//! A reservation claims a piece of equipment for an inclusive range of
//! calendar days on behalf of one user. This module provides the identifier
//! newtypes, the reservation record itself and a builder that validates it.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::equipment::EquipmentId;

#[cfg(test)]
mod proptests;

/// Longest accepted user name, matching the account system's limit.
pub const MAX_USER_NAME_LEN: usize = 150;

/// Years a reservation may fall in.
///
/// Dates are stored as `YYYY-MM-DD` text and compared as strings, which
/// only orders correctly for four-digit years.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Validation error for reservation fields.
///
/// This type is converted into [`crate::Error::Validation`] at the crate
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Identifier of a stored reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wraps a raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identity of a club member as supplied by the caller.
///
/// # Examples
///
/// ```
/// use kitbook::UserId;
///
/// let user = UserId::new("  olena ").unwrap();
/// assert_eq!(user.as_str(), "olena");
///
/// assert!(UserId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a user id from a name.
    ///
    /// The name is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed name is empty, contains a NUL byte or
    /// is longer than [`MAX_USER_NAME_LEN`] characters.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError {
                field: "user".into(),
                message: "user name must be non-empty after trimming whitespace".into(),
            });
        }
        if trimmed.contains('\0') {
            return Err(ValidationError {
                field: "user".into(),
                message: "user name cannot contain null bytes".into(),
            });
        }
        if trimmed.chars().count() > MAX_USER_NAME_LEN {
            return Err(ValidationError {
                field: "user".into(),
                message: format!("user name cannot exceed {MAX_USER_NAME_LEN} characters"),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the user name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An equipment booking.
///
/// Both dates are inclusive: a booking from the 7th to the 10th occupies the
/// equipment on four calendar days.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use kitbook::{EquipmentId, Reservation, UserId};
///
/// let start = NaiveDate::from_ymd_opt(2024, 7, 7).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 7, 10).unwrap();
/// let reservation = Reservation::builder(EquipmentId::new(1), UserId::new("taras").unwrap())
///     .period(start, end)
///     .build()
///     .unwrap();
///
/// assert_eq!(reservation.duration_days(), 3);
/// assert!(reservation.overlaps(end, end));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: Option<ReservationId>,
    equipment: EquipmentId,
    owner: UserId,
    start: NaiveDate,
    end: NaiveDate,
    created_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a new reservation builder.
    ///
    /// The period defaults to a single day, today.
    #[must_use]
    pub fn builder(equipment: EquipmentId, owner: UserId) -> ReservationBuilder {
        ReservationBuilder {
            id: None,
            equipment,
            owner,
            start: None,
            end: None,
            created_at: None,
        }
    }

    /// Returns the stored id, or `None` for a reservation that has not been
    /// written yet.
    #[must_use]
    pub const fn id(&self) -> Option<ReservationId> {
        self.id
    }

    /// Returns the booked equipment.
    #[must_use]
    pub const fn equipment(&self) -> EquipmentId {
        self.equipment
    }

    /// Returns the user who made the booking.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Returns the first booked day.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last booked day.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns when the booking was made.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whole days between start and end.
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Checks whether `[start, end]` shares at least one day with this booking.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        periods_overlap(self.start, self.end, start, end)
    }

    /// A reservation has expired once its last day is before `today`.
    #[must_use]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.end < today
    }

    /// Returns a copy of this reservation carrying the given id.
    #[must_use]
    pub fn with_id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Inclusive interval overlap test used by the booking rules.
///
/// Touching boundaries count as an overlap.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use kitbook::reservation::periods_overlap;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 7, day).unwrap();
/// assert!(periods_overlap(d(7), d(10), d(10), d(12)));
/// assert!(!periods_overlap(d(7), d(10), d(11), d(12)));
/// ```
#[must_use]
pub fn periods_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    b_start <= a_end && b_end >= a_start
}

/// Builder for creating [`Reservation`] instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: Option<ReservationId>,
    equipment: EquipmentId,
    owner: UserId,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    created_at: Option<DateTime<Utc>>,
}

impl ReservationBuilder {
    /// Sets the stored id.
    #[must_use]
    pub const fn id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the booked period.
    #[must_use]
    pub const fn period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the reservation.
    ///
    /// This only checks the shape of the record. The booking rules (past
    /// dates, maximum length, overlaps) are applied by
    /// [`crate::operations::BookPlan`].
    ///
    /// # Errors
    ///
    /// Returns an error if the end date is before the start date, or if
    /// either date lies outside [`SUPPORTED_YEARS`].
    pub fn build(self) -> Result<Reservation, ValidationError> {
        let created_at = self.created_at.unwrap_or_else(Utc::now);
        let today = created_at.date_naive();
        let start = self.start.unwrap_or(today);
        let end = self.end.unwrap_or(start);

        for (field, date) in [("start", start), ("end", end)] {
            if !SUPPORTED_YEARS.contains(&date.year()) {
                return Err(ValidationError {
                    field: field.into(),
                    message: format!("{field} date {date} is outside years 1 to 9999"),
                });
            }
        }

        if end < start {
            return Err(ValidationError {
                field: "end".into(),
                message: format!("end date {end} is before start date {start}"),
            });
        }

        Ok(Reservation {
            id: self.id,
            equipment: self.equipment,
            owner: self.owner,
            start,
            end,
            created_at,
        })
    }
}
