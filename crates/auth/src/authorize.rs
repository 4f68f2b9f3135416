use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{AuthzError, Permission, PermissionTable, Role, WildcardMode};

/// Request-side authorization contract.
///
/// Implement this on commands/requests that need permissions. The request
/// layer enforces these before doing any work.
pub trait CommandAuthorization {
    /// `(resource, action)` pairs the command needs.
    fn required_permissions(&self) -> &[(&'static str, &'static str)];
}

/// Authorize `role` for `action` on `resource`.
///
/// - No IO
/// - No panics
/// - Fails closed (unknown roles are denied)
pub fn authorize(
    table: &PermissionTable,
    role: &str,
    resource: &str,
    action: &str,
) -> Result<(), AuthzError> {
    if table.has_permission(role, resource, action) {
        Ok(())
    } else {
        let required = Permission::for_action(resource, action);
        tracing::debug!(role, permission = %required, "authorization denied");
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

/// Authorize every permission a command declares; stops at the first denial.
pub fn authorize_command<C: CommandAuthorization + ?Sized>(
    table: &PermissionTable,
    role: &str,
    command: &C,
) -> Result<(), AuthzError> {
    for (resource, action) in command.required_permissions() {
        authorize(table, role, resource, action)?;
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
///
/// Answers "why was this request allowed/denied?" for support staff and audit
/// logs. `granted` always agrees with [`PermissionTable::has_permission`].
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    /// The permission that was being checked.
    pub required_permission: String,

    /// Whether the authorization was granted.
    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// Details about the role's state.
    pub role: RoleState,

    /// The grant that authorized the request, if granted.
    pub matched_grant: Option<String>,

    /// Wildcard evaluation in effect.
    pub wildcard_mode: WildcardMode,

    /// If denied, this explains what was missing.
    pub denial_reason: Option<DenialReason>,

    pub evaluated_at: DateTime<Utc>,
}

/// State of the role being checked.
#[derive(Debug, Clone, Serialize)]
pub struct RoleState {
    pub name: String,
    pub known: bool,
    pub grants: Vec<String>,
    pub has_wildcard: bool,
}

/// Detailed reason why authorization was denied.
#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    UnknownRole,
    InvalidRequest,
    MissingPermission,
}

/// Explain the decision for `role` requesting `action` on `resource`.
pub fn explain_authorization(
    table: &PermissionTable,
    role: &str,
    resource: &str,
    action: &str,
    now: DateTime<Utc>,
) -> AuthorizationExplanation {
    let required = Permission::for_action(resource, action);
    let grants = table.role_permissions(role);

    let role_state = RoleState {
        name: role.to_string(),
        known: table.contains_role(role),
        grants: grants.iter().map(|p| p.as_str().to_string()).collect(),
        has_wildcard: grants.iter().any(Permission::is_wildcard),
    };

    if let Some(grant) = table.matching_grant(role, resource, action) {
        let reason = if grant.is_wildcard() {
            format!("Role '{role}' has wildcard permission '*'")
        } else if grant == &required {
            format!("Role '{role}' has explicit permission '{required}'")
        } else {
            format!("Role '{role}' has resource wildcard '{grant}'")
        };

        return AuthorizationExplanation {
            required_permission: required.as_str().to_string(),
            granted: true,
            reason,
            role: role_state,
            matched_grant: Some(grant.as_str().to_string()),
            wildcard_mode: table.wildcard_mode(),
            denial_reason: None,
            evaluated_at: now,
        };
    }

    let denial_reason = if resource.is_empty() || action.is_empty() {
        DenialReason {
            kind: DenialKind::InvalidRequest,
            message: "Resource and action must both be non-empty".to_string(),
            suggestions: vec!["Check the route's resource/action configuration".to_string()],
        }
    } else if !role_state.known {
        DenialReason {
            kind: DenialKind::UnknownRole,
            message: format!("Role '{role}' is not defined in the permission table"),
            suggestions: vec![
                format!(
                    "Use one of the defined roles: {:?}",
                    table.available_roles().iter().map(Role::as_str).collect::<Vec<_>>()
                ),
                "Verify the role claim issued by the authentication layer".to_string(),
            ],
        }
    } else {
        missing_permission_reason(table, &required, resource, action)
    };

    AuthorizationExplanation {
        required_permission: required.as_str().to_string(),
        granted: false,
        reason: format!(
            "Role '{role}' does not grant '{required}'. Current grants: {:?}",
            role_state.grants
        ),
        role: role_state,
        matched_grant: None,
        wildcard_mode: table.wildcard_mode(),
        denial_reason: Some(denial_reason),
        evaluated_at: now,
    }
}

fn missing_permission_reason(
    table: &PermissionTable,
    required: &Permission,
    resource: &str,
    action: &str,
) -> DenialReason {
    let granting_roles: Vec<&str> = table
        .available_roles()
        .iter()
        .filter(|r| table.has_permission(r.as_str(), resource, action))
        .map(Role::as_str)
        .collect();

    let mut suggestions = Vec::new();
    if !granting_roles.is_empty() {
        suggestions.push(format!(
            "The following roles grant this permission: {granting_roles:?}"
        ));
    }
    suggestions.push(format!("Add '{required}' to the role's grants"));

    // The grant is present but only matches under prefix evaluation.
    let resource_wildcard = Permission::resource_wildcard(resource);
    if table.wildcard_mode() == WildcardMode::Literal
        && table
            .role_permissions_of_any()
            .any(|p| *p == resource_wildcard)
    {
        suggestions.push(format!(
            "'{resource_wildcard}' grants are not expanded in literal wildcard mode"
        ));
    }

    DenialReason {
        kind: DenialKind::MissingPermission,
        message: format!("Missing required permission: '{required}'"),
        suggestions,
    }
}

impl PermissionTable {
    fn role_permissions_of_any(&self) -> impl Iterator<Item = &Permission> {
        self.entries().iter().flat_map(|e| e.grants.iter())
    }
}
