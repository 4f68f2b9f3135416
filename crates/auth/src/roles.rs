use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier used for RBAC.
///
/// Roles are opaque strings; the [`PermissionTable`](crate::PermissionTable)
/// decides what each one grants. A role missing from the table grants nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const CUSTOMER: Role = Role(Cow::Borrowed("customer"));
    pub const ADMIN: Role = Role(Cow::Borrowed("admin"));
    pub const MANAGER: Role = Role(Cow::Borrowed("manager"));
    pub const SUPPORT: Role = Role(Cow::Borrowed("support"));
    pub const VENDOR: Role = Role(Cow::Borrowed("vendor"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Role {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_constants_compare_equal_to_owned_names() {
        assert_eq!(Role::ADMIN, Role::new("admin".to_string()));
        assert_ne!(Role::ADMIN, Role::MANAGER);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Role::VENDOR).unwrap();
        assert_eq!(json, "\"vendor\"");

        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::VENDOR);
    }
}
