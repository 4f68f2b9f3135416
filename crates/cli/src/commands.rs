//! Command implementations, separated from argument parsing and IO.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use storefront_auth::{
    AuthzConfig, ConfigError, PermissionTable, Role, WildcardMode, explain_authorization,
};

#[derive(Debug, Parser)]
#[command(name = "storefront-rbac")]
#[command(about = "Inspect and export the storefront role/permission table")]
pub struct Cli {
    /// Wildcard evaluation: `literal` or `resource-prefix`
    /// (defaults to STOREFRONT_RBAC_WILDCARDS, then the document's mode, then `literal`)
    #[arg(long, global = true)]
    pub wildcards: Option<WildcardMode>,

    /// Load the table from an exported permission document instead of the
    /// built-in storefront table
    #[arg(long, global = true)]
    pub document: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List roles in declaration order
    Roles,
    /// Show the grants of a role
    Grants { role: String },
    /// Decide whether a role may perform an action on a resource
    Check {
        role: String,
        resource: String,
        action: String,
    },
    /// Explain an authorization decision as JSON
    Explain {
        role: String,
        resource: String,
        action: String,
    },
    /// Print the shared permission document
    Export,
}

/// Rendered command result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    /// `false` for a denied `check`; maps to a non-zero exit code.
    pub success: bool,
}

impl Output {
    fn ok(text: String) -> Self {
        Self { text, success: true }
    }
}

/// Read configuration, skipping the environment when `--wildcards` already
/// decides the mode so a bad variable cannot block an explicit flag.
pub fn resolve_config<F>(cli: &Cli, lookup: F) -> Result<AuthzConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match cli.wildcards {
        Some(mode) => Ok(AuthzConfig {
            wildcard_mode: Some(mode),
        }),
        None => AuthzConfig::from_lookup(lookup),
    }
}

/// Resolve the table the command runs against.
///
/// Precedence for wildcard mode: `--wildcards`, then the environment, then
/// the document's own mode (when `--document` is given), then `literal`.
pub fn load_table(cli: &Cli, config: &AuthzConfig) -> anyhow::Result<PermissionTable> {
    let table = match &cli.document {
        Some(path) => load_document(path)?,
        None => config.storefront_table(),
    };

    let table = match cli.wildcards.or(config.wildcard_mode) {
        Some(mode) => table.with_wildcard_mode(mode),
        None => table,
    };

    tracing::debug!(
        roles = table.available_roles().len(),
        wildcard_mode = %table.wildcard_mode(),
        "permission table loaded"
    );

    Ok(table)
}

fn load_document(path: &Path) -> anyhow::Result<PermissionTable> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read permission document {}", path.display()))?;

    PermissionTable::from_json(&json)
        .with_context(|| format!("invalid permission document {}", path.display()))
}

pub fn run(table: &PermissionTable, command: &Command, now: DateTime<Utc>) -> anyhow::Result<Output> {
    let output = match command {
        Command::Roles => Output::ok(
            table
                .available_roles()
                .iter()
                .map(Role::as_str)
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        Command::Grants { role } => Output::ok(
            table
                .role_permissions(role)
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        Command::Check {
            role,
            resource,
            action,
        } => {
            let allowed = table.has_permission(role, resource, action);
            Output {
                text: if allowed { "allowed" } else { "denied" }.to_string(),
                success: allowed,
            }
        }
        Command::Explain {
            role,
            resource,
            action,
        } => {
            let explanation = explain_authorization(table, role, resource, action, now);
            Output::ok(serde_json::to_string_pretty(&explanation)?)
        }
        Command::Export => Output::ok(table.to_json_pretty()?),
    };

    Ok(output)
}
