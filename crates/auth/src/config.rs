//! Process configuration for the authorization layer.
//!
//! The role table itself is compiled in; only evaluation options come from
//! the environment.

use crate::{ConfigError, PermissionTable, WildcardMode};

/// Environment variable selecting [`WildcardMode`].
pub const WILDCARD_MODE_ENV: &str = "STOREFRONT_RBAC_WILDCARDS";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthzConfig {
    /// Explicitly configured mode; `None` when the variable is unset or blank.
    pub wildcard_mode: Option<WildcardMode>,
}

impl AuthzConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (used by tests and embedders).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let wildcard_mode = match lookup(WILDCARD_MODE_ENV) {
            Some(raw) if !raw.trim().is_empty() => Some(raw.parse::<WildcardMode>()?),
            _ => None,
        };

        Ok(Self { wildcard_mode })
    }

    /// Configured mode, falling back to [`WildcardMode::Literal`].
    pub fn effective_wildcard_mode(&self) -> WildcardMode {
        self.wildcard_mode.unwrap_or_default()
    }

    /// The storefront table evaluated with this configuration.
    pub fn storefront_table(&self) -> PermissionTable {
        PermissionTable::storefront_defaults_with(self.effective_wildcard_mode())
    }
}
