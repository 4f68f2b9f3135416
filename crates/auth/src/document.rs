//! Shared permission document.
//!
//! The storefront frontend and backend both need the role table. Rather than
//! keeping two hand-maintained copies, the backend exports this JSON document
//! and every other consumer reads it.

use serde::{Deserialize, Serialize};

use crate::table::RoleEntry;
use crate::{Permission, PermissionTable, Role, TableError, WildcardMode};

/// Current document schema version.
pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDocument {
    pub version: u32,
    #[serde(default)]
    pub wildcard_mode: WildcardMode,
    pub roles: Vec<RoleGrants>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrants {
    pub name: Role,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl PermissionTable {
    pub fn to_document(&self) -> PermissionDocument {
        PermissionDocument {
            version: DOCUMENT_VERSION,
            wildcard_mode: self.wildcard_mode(),
            roles: self
                .entries()
                .iter()
                .map(|RoleEntry { role, grants }| RoleGrants {
                    name: role.clone(),
                    permissions: grants.clone(),
                })
                .collect(),
        }
    }

    /// Rebuild a table from a document, applying the same validation as the
    /// builder.
    pub fn from_document(document: PermissionDocument) -> Result<Self, TableError> {
        if document.version != DOCUMENT_VERSION {
            return Err(TableError::UnsupportedVersion {
                found: document.version,
                expected: DOCUMENT_VERSION,
            });
        }

        document
            .roles
            .into_iter()
            .fold(
                PermissionTable::builder().wildcard_mode(document.wildcard_mode),
                |builder, RoleGrants { name, permissions }| builder.role(name, permissions),
            )
            .build()
    }

    pub fn to_json_pretty(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let document: PermissionDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exported_document_reloads_to_same_table() {
        let table = PermissionTable::storefront_defaults_with(WildcardMode::ResourcePrefix);
        let json = table.to_json_pretty().unwrap();

        let reloaded = PermissionTable::from_json(&json).unwrap();
        assert_eq!(reloaded, table);
        assert_eq!(reloaded.available_roles(), table.available_roles());
    }

    #[test]
    fn document_shape_is_stable() {
        let doc = PermissionTable::storefront_defaults().to_document();
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["version"], 1);
        assert_eq!(json["wildcard_mode"], "literal");
        assert_eq!(json["roles"][2]["name"], "manager");
        assert_eq!(json["roles"][2]["permissions"][0], "products.*");
        assert_eq!(json["roles"][0]["permissions"], serde_json::json!([]));
    }

    #[test]
    fn missing_optional_fields_default() {
        let table = PermissionTable::from_json(
            r#"{ "version": 1, "roles": [{ "name": "guest" }, { "name": "clerk", "permissions": ["orders.read"] }] }"#,
        )
        .unwrap();

        assert_eq!(table.wildcard_mode(), WildcardMode::Literal);
        assert!(table.contains_role("guest"));
        assert!(table.has_permission("clerk", "orders", "read"));
    }

    #[test]
    fn rejects_unknown_version() {
        let err = PermissionTable::from_json(r#"{ "version": 7, "roles": [] }"#).unwrap_err();
        assert_eq!(err, TableError::UnsupportedVersion { found: 7, expected: 1 });
    }

    #[test]
    fn rejects_invalid_grants_and_duplicates() {
        let err = PermissionTable::from_json(
            r#"{ "version": 1, "roles": [{ "name": "clerk", "permissions": ["orders"] }] }"#,
        )
        .unwrap_err();
        assert_eq!(err, TableError::InvalidPermission("orders".to_string()));

        let err = PermissionTable::from_json(
            r#"{ "version": 1, "roles": [{ "name": "clerk" }, { "name": "clerk" }] }"#,
        )
        .unwrap_err();
        assert_eq!(err, TableError::DuplicateRole("clerk".to_string()));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = PermissionTable::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TableError::Document(_)));
    }
}
