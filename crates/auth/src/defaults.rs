//! The storefront's built-in role table.

use crate::table::RoleEntry;
use crate::{Permission, PermissionTable, Role, WildcardMode};

/// Built-in roles and their grants, in declaration order.
pub const STOREFRONT_ROLES: &[(&str, &[&str])] = &[
    // Shoppers act only on their own cart/orders, which is enforced by
    // ownership checks rather than grants.
    ("customer", &[]),
    ("admin", &["*"]),
    (
        "manager",
        &["products.*", "orders.*", "customers.read", "analytics.read"],
    ),
    (
        "support",
        &["orders.read", "orders.update", "customers.read", "tickets.*"],
    ),
    ("vendor", &["products.read", "products.update", "orders.read"]),
];

impl PermissionTable {
    /// The storefront table with literal wildcard evaluation.
    pub fn storefront_defaults() -> Self {
        Self::storefront_defaults_with(WildcardMode::Literal)
    }

    pub fn storefront_defaults_with(wildcard_mode: WildcardMode) -> Self {
        let entries = STOREFRONT_ROLES
            .iter()
            .map(|&(role, grants)| RoleEntry {
                role: Role::new(role),
                grants: grants.iter().map(|&g| Permission::new(g)).collect(),
            })
            .collect();

        Self::from_entries(entries, wildcard_mode)
    }
}

/// Human-readable summary of a built-in role.
pub fn role_description(role: &str) -> Option<&'static str> {
    match role {
        "customer" => Some("Shopper; no back-office permissions"),
        "admin" => Some("Full platform administrator with all permissions"),
        "manager" => Some("Store manager for catalog and orders, with customer and analytics read access"),
        "support" => Some("Customer support handling orders, customers and tickets"),
        "vendor" => Some("Marketplace vendor maintaining own products and viewing orders"),
        _ => None,
    }
}
