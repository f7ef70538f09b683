//! Booking operations using the plan-execute pattern.
//!
//! Planning and execution are separate so that requests can be validated
//! and previewed (dry run) before anything is written.
//!
//! # Architecture
//!
//! Operations are split into two phases:
//! 1. **Planning**: Analyzes the request, applies the rules, builds a plan
//! 2. **Execution**: Takes the plan and performs the database writes
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use kitbook::operations::{BookOptions, BookPlan, PlanExecutor};
//! use kitbook::{ConfigBuilder, Database, DatabaseConfig, EquipmentId, UserId};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/kitbook.db")).unwrap();
//! let config = ConfigBuilder::new().build().unwrap();
//! let start = NaiveDate::from_ymd_opt(2030, 8, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2030, 8, 4).unwrap();
//!
//! let options = BookOptions::new(EquipmentId::new(1), start, end, UserId::new("olena").unwrap());
//!
//! // Generate plan
//! let plan = BookPlan::new(options, &config).build_plan(&db).unwrap();
//!
//! // Execute plan
//! let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
//! println!("{:?}", result.reservation_id);
//! ```

pub mod book;
pub mod cancel;
pub mod cleanup;
pub mod equipment;
pub mod executor;
pub mod init;
pub mod plan;

#[cfg(test)]
mod proptests;

pub use book::{check_period, validate_and_book, BookOptions, BookPlan};
pub use cancel::{cancel, CancelOptions, CancelPlan};
pub use cleanup::{CleanupOperations, PurgeResult};
pub use equipment::{EquipmentDetails, EquipmentListing, EquipmentOperations};
pub use executor::{ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use plan::{OperationPlan, PlanAction};
