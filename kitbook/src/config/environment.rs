//! Environment variable handling for configuration overrides.
//!
//! This module applies `KITBOOK_*` environment variables on top of the
//! file-based configuration.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use kitbook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds a value of the wrong shape
    /// (a non-numeric day count, an unrecognized boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("KITBOOK_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("KITBOOK_DISABLE_AUTOINIT", &val)?);
        }

        if let Ok(val) = env::var("KITBOOK_DISABLE_AUTOPURGE") {
            config.disable_autopurge = Some(Self::parse_bool("KITBOOK_DISABLE_AUTOPURGE", &val)?);
        }

        if let Ok(val) = env::var("KITBOOK_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number("KITBOOK_MAXIMUM_LOCK_WAIT_SECONDS", &val)?);
        }

        if let Ok(val) = env::var("KITBOOK_MAX_DURATION_DAYS") {
            let days = Self::parse_number("KITBOOK_MAX_DURATION_DAYS", &val)?;
            config
                .booking
                .get_or_insert_with(Default::default)
                .max_duration_days = Some(days);
        }

        if let Ok(val) = env::var("KITBOOK_PRIVILEGED_POSITIONS") {
            config
                .booking
                .get_or_insert_with(Default::default)
                .privileged_positions = Some(Self::parse_list(&val));
        }

        Ok(())
    }

    /// Accepts true/1/yes/on and false/0/no/off, case-insensitively.
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Must be a positive integer, got '{s}'"),
        })
    }

    /// Comma-separated list; blank entries are dropped.
    fn parse_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}
