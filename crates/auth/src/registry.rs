//! Audit/display view of every role and permission in a table.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::defaults::role_description;
use crate::{Permission, PermissionTable};

/// Role definition with its granted permissions (for audit/display).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleDefinition {
    pub name: String,
    pub permissions: Vec<String>,
    pub description: Option<String>,
}

/// Permission definition (for audit/display).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionDefinition {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Registry of all roles and permissions in a table.
#[derive(Debug, Clone, Serialize)]
pub struct RbacRegistry {
    /// Roles in declaration order.
    pub roles: Vec<RoleDefinition>,
    /// Distinct grants, keyed by name.
    pub permissions: BTreeMap<String, PermissionDefinition>,
}

impl RbacRegistry {
    pub fn from_table(table: &PermissionTable) -> Self {
        let mut roles = Vec::with_capacity(table.available_roles().len());
        let mut permissions = BTreeMap::new();

        for role in table.available_roles() {
            let grants = table.role_permissions(role.as_str());

            roles.push(RoleDefinition {
                name: role.as_str().to_string(),
                permissions: grants.iter().map(|p| p.as_str().to_string()).collect(),
                description: role_description(role.as_str()).map(str::to_string),
            });

            for grant in grants {
                permissions
                    .entry(grant.as_str().to_string())
                    .or_insert_with(|| PermissionDefinition {
                        name: grant.as_str().to_string(),
                        description: permission_description(grant),
                        category: permission_category(grant),
                    });
            }
        }

        Self { roles, permissions }
    }

    pub fn role(&self, name: &str) -> Option<&RoleDefinition> {
        self.roles.iter().find(|r| r.name == name)
    }

    pub fn permission(&self, name: &str) -> Option<&PermissionDefinition> {
        self.permissions.get(name)
    }
}

fn permission_description(perm: &Permission) -> Option<String> {
    if perm.is_wildcard() {
        return Some("Wildcard permission - grants all permissions".to_string());
    }

    let resource = perm.as_str().rsplit_once('.').map(|(resource, _)| resource)?;
    let action = perm.action()?;

    let action_desc = match action {
        "*" => "Any action on",
        "read" => "View/list",
        "create" => "Create new",
        "update" => "Modify",
        "delete" => "Delete",
        _ => action,
    };

    Some(format!("{action_desc} {resource} resources"))
}

fn permission_category(perm: &Permission) -> Option<String> {
    if perm.is_wildcard() {
        return Some("system".to_string());
    }

    perm.resource().map(str::to_string)
}
