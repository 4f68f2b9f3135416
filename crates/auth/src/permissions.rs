use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Universal grant: authorizes every action on every resource.
pub const WILDCARD: &str = "*";

/// Permission grant.
///
/// Grants are opaque strings of the form `resource.action` (e.g.
/// `"products.create"`), the universal wildcard `"*"`, or a resource-level
/// wildcard `"resource.*"`. Whether a resource-level wildcard matches anything
/// is decided by the table's [`WildcardMode`](crate::WildcardMode).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// The `resource.action` grant required by a concrete request.
    pub fn for_action(resource: &str, action: &str) -> Self {
        Self(Cow::Owned(format!("{resource}.{action}")))
    }

    /// The `resource.*` grant covering every action on `resource`.
    pub fn resource_wildcard(resource: &str) -> Self {
        Self(Cow::Owned(format!("{resource}.*")))
    }

    /// Build a grant, rejecting strings that are neither `*` nor
    /// `resource.action` with both parts present and no whitespace.
    pub fn parse(name: impl Into<Cow<'static, str>>) -> Result<Self, TableError> {
        let permission = Self::new(name);
        if permission.is_well_formed() {
            Ok(permission)
        } else {
            Err(TableError::InvalidPermission(permission.as_str().to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == WILDCARD
    }

    pub fn is_resource_wildcard(&self) -> bool {
        self.as_str().len() > 2 && self.as_str().ends_with(".*")
    }

    /// Resource part of the grant (text before the first `.`), if any.
    pub fn resource(&self) -> Option<&str> {
        self.as_str().split_once('.').map(|(resource, _)| resource)
    }

    /// Action part of the grant (text after the last `.`), if any.
    pub fn action(&self) -> Option<&str> {
        self.as_str().rsplit_once('.').map(|(_, action)| action)
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        if self.is_wildcard() {
            return true;
        }
        if self.as_str().chars().any(char::is_whitespace) {
            return false;
        }
        match self.as_str().rsplit_once('.') {
            Some((resource, action)) => {
                !resource.is_empty()
                    && !action.is_empty()
                    && resource.split('.').all(|part| !part.is_empty() && part != WILDCARD)
            }
            None => false,
        }
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for Permission {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Permission {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
