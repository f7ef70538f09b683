//! Error types for the kitbook library.
//!
//! This module provides the error hierarchy for every operation in the
//! library, using `thiserror` for ergonomic error handling. Booking rule
//! violations get their own type, [`BookingRejection`], so callers can match
//! on the exact rule that failed.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::equipment::EquipmentId;
use crate::reservation::{ReservationId, UserId};

/// Result type alias for operations that may fail with a kitbook error.
///
/// # Examples
///
/// ```
/// use kitbook::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the kitbook library.
#[derive(Debug, Error)]
pub enum Error {
    /// A booking request broke one of the booking rules.
    #[error("booking rejected: {0}")]
    BookingRejected(#[from] BookingRejection),

    /// Another booking for the same equipment committed between planning
    /// and execution.
    #[error(
        "equipment {equipment} was booked for {start}..{end} by another request; please retry"
    )]
    ConcurrentConflict {
        /// The equipment that was double-booked.
        equipment: EquipmentId,
        /// Start of the requested period.
        start: NaiveDate,
        /// End of the requested period.
        end: NaiveDate,
    },

    /// The acting user is not allowed to perform the action.
    #[error("user '{user}' is not allowed to {action}")]
    NotAuthorized {
        /// The user that attempted the action.
        user: UserId,
        /// A short description of the refused action.
        action: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

/// The booking rule a request failed.
///
/// Rules are checked in declaration order and the first failure wins, so a
/// request with a reversed range is reported as [`InvalidRange`] even when it
/// also overlaps an existing booking.
///
/// [`InvalidRange`]: BookingRejection::InvalidRange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingRejection {
    /// The start date is after the end date.
    InvalidRange {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },

    /// The start date is before today.
    PastStartDate {
        /// Requested start date.
        start: NaiveDate,
        /// The date the request was evaluated on.
        today: NaiveDate,
    },

    /// The booking is longer than the configured maximum.
    DurationExceeded {
        /// Whole days between start and end.
        days: i64,
        /// The configured maximum.
        max_days: u32,
    },

    /// The period overlaps an existing booking of the same equipment.
    PeriodOverlap {
        /// The booking that is in the way.
        existing: ReservationId,
        /// Start of the conflicting booking.
        existing_start: NaiveDate,
        /// End of the conflicting booking.
        existing_end: NaiveDate,
    },
}

impl BookingRejection {
    /// Returns the user-facing message for this rejection.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use kitbook::BookingRejection;
    ///
    /// let rejection = BookingRejection::PastStartDate {
    ///     start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ///     today: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
    /// };
    /// assert!(rejection.message().contains("past"));
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::InvalidRange { .. } => {
                "The start date must not be later than the end date.".into()
            }
            Self::PastStartDate { .. } => "The start date must not be in the past.".into(),
            Self::DurationExceeded { max_days, .. } => {
                format!("A booking cannot last longer than {max_days} days.")
            }
            Self::PeriodOverlap {
                existing_start,
                existing_end,
                ..
            } => format!(
                "The equipment is already booked from {existing_start} to {existing_end}."
            ),
        }
    }

    /// Short machine-readable name of the failed rule.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "invalid_range",
            Self::PastStartDate { .. } => "past_start_date",
            Self::DurationExceeded { .. } => "duration_exceeded",
            Self::PeriodOverlap { .. } => "period_overlap",
        }
    }
}

impl std::fmt::Display for BookingRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for BookingRejection {}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Returns the booking rejection carried by this error, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use kitbook::{BookingRejection, Error};
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    /// let err = Error::from(BookingRejection::InvalidRange { start: day, end: day });
    /// assert!(err.rejection().is_some());
    /// ```
    #[must_use]
    pub fn rejection(&self) -> Option<&BookingRejection> {
        match self {
            Self::BookingRejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    /// Check if error indicates a missing record.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
