//! Role -> permission table and the authorization decision rule.
//!
//! The table is immutable once built. Construct it at startup and hand it
//! (by reference or inside an `Arc`) to whatever needs to make decisions.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, TableError};
use crate::{Permission, Role};

/// How resource-level grants such as `products.*` are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WildcardMode {
    /// Only the bare `*` grant is a wildcard. `resource.*` is compared as a
    /// literal string and therefore never matches a concrete action.
    #[default]
    Literal,

    /// `resource.*` additionally authorizes every action on `resource`.
    ResourcePrefix,
}

impl WildcardMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::ResourcePrefix => "resource-prefix",
        }
    }
}

impl core::fmt::Display for WildcardMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WildcardMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "literal" => Ok(Self::Literal),
            "resource-prefix" | "resource_prefix" | "prefix" => Ok(Self::ResourcePrefix),
            _ => Err(ConfigError::InvalidWildcardMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RoleEntry {
    pub(crate) role: Role,
    pub(crate) grants: Vec<Permission>,
}

/// Immutable mapping from role to its ordered grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable {
    entries: Vec<RoleEntry>,
    roles: Vec<Role>,
    index: HashMap<String, usize>,
    wildcard_mode: WildcardMode,
}

impl PermissionTable {
    pub fn builder() -> PermissionTableBuilder {
        PermissionTableBuilder::default()
    }

    /// Entries must already be validated (unique roles, well-formed grants).
    pub(crate) fn from_entries(entries: Vec<RoleEntry>, wildcard_mode: WildcardMode) -> Self {
        let roles = entries.iter().map(|e| e.role.clone()).collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.role.as_str().to_string(), i))
            .collect();

        Self {
            entries,
            roles,
            index,
            wildcard_mode,
        }
    }

    /// Same grants, different wildcard evaluation.
    pub fn with_wildcard_mode(mut self, wildcard_mode: WildcardMode) -> Self {
        self.wildcard_mode = wildcard_mode;
        self
    }

    pub fn wildcard_mode(&self) -> WildcardMode {
        self.wildcard_mode
    }

    /// Does `role` authorize `action` on `resource`?
    ///
    /// Unknown roles and empty resource/action strings are denied.
    pub fn has_permission(&self, role: &str, resource: &str, action: &str) -> bool {
        self.matching_grant(role, resource, action).is_some()
    }

    /// The grant that authorizes the request, if any.
    ///
    /// Evaluation order: `*`, then the exact `resource.action` grant, then
    /// (in [`WildcardMode::ResourcePrefix`]) the `resource.*` grant.
    pub fn matching_grant(&self, role: &str, resource: &str, action: &str) -> Option<&Permission> {
        if resource.is_empty() || action.is_empty() {
            return None;
        }

        let grants = self.role_permissions(role);

        if let Some(wildcard) = grants.iter().find(|p| p.is_wildcard()) {
            return Some(wildcard);
        }

        let required = Permission::for_action(resource, action);
        if let Some(exact) = grants.iter().find(|p| **p == required) {
            return Some(exact);
        }

        match self.wildcard_mode {
            WildcardMode::Literal => None,
            WildcardMode::ResourcePrefix => {
                let resource_wildcard = Permission::resource_wildcard(resource);
                grants.iter().find(|p| **p == resource_wildcard)
            }
        }
    }

    /// Grants stored for `role`, in declared order. Empty for unknown roles.
    pub fn role_permissions(&self, role: &str) -> &[Permission] {
        self.index
            .get(role)
            .map(|&i| self.entries[i].grants.as_slice())
            .unwrap_or(&[])
    }

    /// Recognized roles, in declaration order.
    pub fn available_roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn contains_role(&self, role: &str) -> bool {
        self.index.contains_key(role)
    }

    pub(crate) fn entries(&self) -> &[RoleEntry] {
        &self.entries
    }
}

/// Builder for [`PermissionTable`]; validation happens in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct PermissionTableBuilder {
    entries: Vec<RoleEntry>,
    wildcard_mode: WildcardMode,
}

impl PermissionTableBuilder {
    pub fn role<R, I, P>(mut self, role: R, grants: I) -> Self
    where
        R: Into<Role>,
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.entries.push(RoleEntry {
            role: role.into(),
            grants: grants.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn wildcard_mode(mut self, wildcard_mode: WildcardMode) -> Self {
        self.wildcard_mode = wildcard_mode;
        self
    }

    pub fn build(self) -> Result<PermissionTable, TableError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !seen.insert(entry.role.as_str()) {
                return Err(TableError::DuplicateRole(entry.role.as_str().to_string()));
            }
            for grant in &entry.grants {
                if !grant.is_well_formed() {
                    return Err(TableError::InvalidPermission(grant.as_str().to_string()));
                }
            }
        }

        tracing::info!(
            roles = self.entries.len(),
            wildcard_mode = %self.wildcard_mode,
            "permission table built"
        );

        Ok(PermissionTable::from_entries(self.entries, self.wildcard_mode))
    }
}
