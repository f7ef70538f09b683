//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for kitbook:
//! booking limits, the member roster with positions, and housekeeping
//! switches.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Longest booking allowed when nothing is configured, in days.
pub const DEFAULT_MAX_DURATION_DAYS: u32 = 30;

/// Positions allowed to manage equipment when nothing is configured.
pub const DEFAULT_PRIVILEGED_POSITIONS: [&str; 2] = ["Head", "Equipment manager"];

/// Complete configuration structure.
///
/// Every field is optional so that layers can be merged; the accessor
/// methods apply the built-in defaults.
///
/// # Examples
///
/// ```
/// use kitbook::config::{BookingConfig, Config};
///
/// let config = Config {
///     booking: Some(BookingConfig {
///         max_duration_days: Some(14),
///         privileged_positions: None,
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.max_duration_days(), 14);
/// assert_eq!(Config::default().max_duration_days(), 30);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Booking rules.
    pub booking: Option<BookingConfig>,

    /// Member roster: user name to the positions that user holds.
    pub members: Option<HashMap<String, Vec<String>>>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Disable the purge of ended bookings before listing equipment.
    pub disable_autopurge: Option<bool>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Longest allowed booking in days.
    #[must_use]
    pub fn max_duration_days(&self) -> u32 {
        self.booking
            .as_ref()
            .and_then(|b| b.max_duration_days)
            .unwrap_or(DEFAULT_MAX_DURATION_DAYS)
    }

    /// Positions that may manage equipment and cancel any booking.
    #[must_use]
    pub fn privileged_positions(&self) -> Vec<String> {
        self.booking
            .as_ref()
            .and_then(|b| b.privileged_positions.clone())
            .unwrap_or_else(|| {
                DEFAULT_PRIVILEGED_POSITIONS
                    .iter()
                    .map(ToString::to_string)
                    .collect()
            })
    }

    /// Positions held by `user`, empty for unknown users.
    #[must_use]
    pub fn positions_of(&self, user: &str) -> &[String] {
        self.members
            .as_ref()
            .and_then(|members| members.get(user))
            .map_or(&[], Vec::as_slice)
    }

    /// Whether the ended-booking purge runs before listing equipment.
    #[must_use]
    pub fn autopurge_enabled(&self) -> bool {
        !self.disable_autopurge.unwrap_or(false)
    }
}

/// Booking rule settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BookingConfig {
    /// Longest allowed booking, in whole days between start and end.
    pub max_duration_days: Option<u32>,

    /// Positions with equipment management rights.
    pub privileged_positions: Option<Vec<String>>,
}

/// Output format for list commands.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON array.
    Json,
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
    /// Aligned human-readable table.
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}
