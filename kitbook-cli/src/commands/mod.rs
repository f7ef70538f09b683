//! CLI command implementations.
//!
//! - `init`: create the data directory and database
//! - `book`: book equipment for a period
//! - `cancel`: cancel a booking
//! - `bookings`: list bookings
//! - `purge`: remove bookings that have ended
//! - `equipment`: manage the inventory
//! - `validate`: check a configuration file
//! - `show_data_dir`: print the resolved data directory
//! - `completions`: generate shell completions

pub mod book;
pub mod bookings;
pub mod cancel;
pub mod completions;
pub mod equipment;
pub mod init;
pub mod purge;
pub mod show_data_dir;
pub mod validate;

pub use book::BookCommand;
pub use bookings::BookingsCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use equipment::EquipmentCommand;
pub use init::InitCommand;
pub use purge::PurgeCommand;
pub use show_data_dir::ShowDataDirCommand;
pub use validate::ValidateCommand;
