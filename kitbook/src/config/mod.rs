//! Configuration system for kitbook.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and club `kitbook.yaml` files)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of every field
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`KITBOOK_*`)
//! 3. Machine-local config (`kitbook.local.yaml`)
//! 4. Club config (`kitbook.yaml`)
//! 5. User config (`~/.kitbook/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use kitbook::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/srv/club"))
//!     .build()
//!     .unwrap();
//!
//! println!("Bookings last at most {} days", config.max_duration_days());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{
    BookingConfig, Config, OutputFormat, DEFAULT_MAX_DURATION_DAYS, DEFAULT_PRIVILEGED_POSITIONS,
};
pub use validator::ConfigValidator;
