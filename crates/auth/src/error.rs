//! Error model for table construction, authorization and configuration.
//!
//! Permission queries themselves never fail; they answer `false`.

use thiserror::Error;

/// Authorization failure surfaced to the request layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

impl AuthzError {
    /// HTTP status the request layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Forbidden(_) => 403,
        }
    }
}

/// Failure while building a [`PermissionTable`](crate::PermissionTable).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The same role was declared twice.
    #[error("duplicate role '{0}'")]
    DuplicateRole(String),

    /// A grant is neither `*` nor `resource.action`.
    #[error("invalid permission grant '{0}'")]
    InvalidPermission(String),

    /// The shared permission document has a version this build cannot read.
    #[error("unsupported permission document version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// The shared permission document is not valid JSON for its schema.
    #[error("malformed permission document: {0}")]
    Document(String),
}

impl From<serde_json::Error> for TableError {
    fn from(value: serde_json::Error) -> Self {
        Self::Document(value.to_string())
    }
}

/// Invalid process configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid wildcard mode '{0}' (expected 'literal' or 'resource-prefix')")]
    InvalidWildcardMode(String),
}
