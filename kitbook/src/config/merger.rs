//! Configuration merging and precedence handling.
//!
//! Scalars are overwritten by higher layers. The member roster is merged per
//! user, so a local file can add a member without restating the whole club.

use crate::config::loader::ConfigSource;
use crate::config::schema::{BookingConfig, Config};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use kitbook::config::{Config, ConfigMerger};
///
/// let low = Config { disable_autopurge: Some(false), ..Default::default() };
/// let high = Config { disable_autopurge: Some(true), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.disable_autopurge, Some(true));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Booking config: field-by-field merge
    /// - Members: per-user replacement, users from both sides are kept
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.disable_autopurge.is_some() {
            target.disable_autopurge = source.disable_autopurge;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_booking) = source.booking {
            target.booking = Some(match &target.booking {
                Some(target_booking) => Self::merge_booking(target_booking, source_booking),
                None => source_booking.clone(),
            });
        }

        if let Some(ref source_members) = source.members {
            let members = target.members.get_or_insert_with(Default::default);
            for (user, positions) in source_members {
                members.insert(user.clone(), positions.clone());
            }
        }
    }

    fn merge_booking(target: &BookingConfig, source: &BookingConfig) -> BookingConfig {
        BookingConfig {
            max_duration_days: source.max_duration_days.or(target.max_duration_days),
            privileged_positions: source
                .privileged_positions
                .clone()
                .or_else(|| target.privileged_positions.clone()),
        }
    }
}
