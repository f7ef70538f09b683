//! `SQLite` storage for equipment and bookings.
//!
//! Connection management, schema versioning and CRUD operations. Reads are
//! associated functions taking a `&Connection`; writes take `&mut self` and
//! run in an IMMEDIATE transaction.
//!
//! # Examples
//!
//! ```no_run
//! use kitbook::database::{Database, DatabaseConfig};
//! use kitbook::NewEquipment;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/kitbook.db")).unwrap();
//!
//! let tent = NewEquipment::new("tent", 3.2).validate().unwrap();
//! let id = db.insert_equipment(&tent).unwrap();
//!
//! for reservation in Database::list_reservations_for_equipment(db.connection(), id).unwrap() {
//!     println!("{} .. {}", reservation.start(), reservation.end());
//! }
//! ```

mod config;
mod connection;
mod equipment;
pub mod migrations;
mod operations;
mod schema;
#[cfg(test)]
pub(crate) mod test_util;
mod transaction;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE,
    DATA_DIR_ENV,
};
pub use connection::Database;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
