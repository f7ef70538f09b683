//! Configuration validation.

use crate::config::schema::{BookingConfig, Config};
use crate::error::{Error, Result};
use crate::reservation::UserId;
use std::collections::{HashMap, HashSet};

/// Longest accepted position name.
const MAX_POSITION_LEN: usize = 20;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use kitbook::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref booking) = config.booking {
            Self::validate_booking(booking)?;
        }

        if let Some(ref members) = config.members {
            Self::validate_members(members)?;
        }

        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        Ok(())
    }

    fn validate_booking(booking: &BookingConfig) -> Result<()> {
        if booking.max_duration_days == Some(0) {
            return Err(Error::Validation {
                field: "booking.max_duration_days".into(),
                message: "Must be > 0".into(),
            });
        }

        if let Some(ref positions) = booking.privileged_positions {
            let mut seen = HashSet::new();
            for (i, position) in positions.iter().enumerate() {
                let field = format!("booking.privileged_positions[{i}]");
                Self::validate_position(&field, position)?;
                if !seen.insert(position.trim().to_lowercase()) {
                    return Err(Error::Validation {
                        field,
                        message: format!("Duplicate position: {position}"),
                    });
                }
            }
        }

        Ok(())
    }

    fn validate_members(members: &HashMap<String, Vec<String>>) -> Result<()> {
        for (user, positions) in members {
            let parsed = UserId::new(user).map_err(|e| Error::Validation {
                field: format!("members.{user}"),
                message: e.message,
            })?;
            if parsed.as_str() != user {
                return Err(Error::Validation {
                    field: format!("members.{user}"),
                    message: "User names cannot have surrounding whitespace".into(),
                });
            }

            for (i, position) in positions.iter().enumerate() {
                Self::validate_position(&format!("members.{user}[{i}]"), position)?;
            }
        }
        Ok(())
    }

    fn validate_position(field: &str, position: &str) -> Result<()> {
        let trimmed = position.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }
        if trimmed.chars().count() > MAX_POSITION_LEN {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("Cannot exceed {MAX_POSITION_LEN} characters"),
            });
        }
        Ok(())
    }
}
