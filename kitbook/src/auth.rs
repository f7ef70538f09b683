//! Role checks for gated operations.
//!
//! Positions (roles) are plain names assigned to members in configuration.
//! Everything that needs a permission decision goes through [`Authorizer`].

use std::collections::HashMap;

use crate::config::Config;
use crate::reservation::UserId;

/// Answers whether a user holds any of a set of positions.
#[cfg_attr(test, mockall::automock)]
pub trait Authorizer {
    /// Returns `true` if `user` holds at least one of `required`.
    fn has_role(&self, user: &UserId, required: &[String]) -> bool;
}

/// [`Authorizer`] backed by the `members` roster in configuration.
///
/// Position names compare case-insensitively.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use kitbook::auth::{Authorizer, ConfigAuthorizer};
/// use kitbook::{Config, UserId};
///
/// let config = Config {
///     members: Some(HashMap::from([("iryna".to_string(), vec!["head".to_string()])])),
///     ..Default::default()
/// };
/// let auth = ConfigAuthorizer::from_config(&config);
///
/// assert!(auth.is_privileged(&UserId::new("iryna").unwrap()));
/// assert!(!auth.is_privileged(&UserId::new("taras").unwrap()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigAuthorizer {
    members: HashMap<String, Vec<String>>,
    privileged: Vec<String>,
}

impl ConfigAuthorizer {
    /// Builds an authorizer from the member roster and privileged positions.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            members: config.members.clone().unwrap_or_default(),
            privileged: config.privileged_positions(),
        }
    }

    /// Whether `user` may manage equipment and cancel any booking.
    #[must_use]
    pub fn is_privileged(&self, user: &UserId) -> bool {
        self.has_role(user, &self.privileged)
    }

    /// The configured privileged positions.
    #[must_use]
    pub fn privileged_positions(&self) -> &[String] {
        &self.privileged
    }
}

impl Authorizer for ConfigAuthorizer {
    fn has_role(&self, user: &UserId, required: &[String]) -> bool {
        let Some(held) = self.members.get(user.as_str()) else {
            return false;
        };
        held.iter()
            .any(|position| required.iter().any(|r| r.eq_ignore_ascii_case(position)))
    }
}
