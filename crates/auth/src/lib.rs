//! `storefront-auth` — role-based permission model for the storefront.
//!
//! This crate is intentionally decoupled from HTTP and storage: request
//! layers extract the caller's role and the `(resource, action)` pair, then
//! ask a [`PermissionTable`] built once at startup.

pub mod authorize;
pub mod config;
pub mod defaults;
pub mod document;
pub mod error;
pub mod permissions;
pub mod registry;
pub mod roles;
pub mod table;

pub use authorize::{
    AuthorizationExplanation, CommandAuthorization, DenialKind, authorize, authorize_command,
    explain_authorization,
};
pub use config::AuthzConfig;
pub use defaults::STOREFRONT_ROLES;
pub use document::{PermissionDocument, RoleGrants};
pub use error::{AuthzError, ConfigError, TableError};
pub use permissions::Permission;
pub use registry::RbacRegistry;
pub use roles::Role;
pub use table::{PermissionTable, PermissionTableBuilder, WildcardMode};
