#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # kitbook
//!
//! A library for booking a club's shared equipment.
//!
//! Members book equipment for an inclusive range of calendar days. A booking
//! is accepted only if its range is well formed, does not start in the past,
//! is not longer than the configured maximum and shares no day with another
//! booking of the same equipment.
//!
//! ## Core Types
//!
//! - [`Equipment`] and [`NewEquipment`]: Inventory records
//! - [`Reservation`], [`ReservationId`] and [`UserId`]: Bookings and their owners
//! - [`Error`], [`BookingRejection`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use kitbook::operations::check_period;
//! use kitbook::BookingRejection;
//!
//! let today = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();
//! let start = NaiveDate::from_ymd_opt(2030, 6, 10).unwrap();
//! let end = NaiveDate::from_ymd_opt(2030, 7, 20).unwrap();
//!
//! assert!(matches!(
//!     check_period(start, end, today, 30),
//!     Err(BookingRejection::DurationExceeded { days: 40, .. })
//! ));
//! ```

pub mod auth;
pub mod config;
pub mod database;
pub mod equipment;
pub mod error;
pub mod logging;
pub mod operations;
pub mod reservation;

// Re-export key types at crate root for convenience
pub use auth::{Authorizer, ConfigAuthorizer};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use equipment::{Equipment, EquipmentChanges, EquipmentId, NewEquipment};
pub use error::{BookingRejection, Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    BookOptions, BookPlan, CleanupOperations, ExecutionResult, OperationPlan, PlanAction,
    PlanExecutor, PurgeResult,
};
pub use reservation::{Reservation, ReservationId, UserId};
