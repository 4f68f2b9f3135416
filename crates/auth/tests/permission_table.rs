//! Black-box checks of the storefront permission table.

use proptest::prelude::*;

use storefront_auth::{PermissionTable, Role, WildcardMode, authorize};

fn table() -> PermissionTable {
    PermissionTable::storefront_defaults()
}

fn builtin_roles() -> Vec<&'static str> {
    vec!["customer", "admin", "manager", "support", "vendor"]
}

#[test]
fn lists_roles_in_declaration_order() {
    let t = table();
    let roles: Vec<&str> = t.available_roles().iter().map(Role::as_str).collect();
    assert_eq!(roles, builtin_roles());
}

#[test]
fn manager_grants_are_returned_as_declared() {
    let t = table();
    let grants: Vec<&str> = t
        .role_permissions("manager")
        .iter()
        .map(|p| p.as_str())
        .collect();
    assert_eq!(
        grants,
        ["products.*", "orders.*", "customers.read", "analytics.read"]
    );
}

#[test]
fn unknown_role_has_empty_grants() {
    assert!(table().role_permissions("superuser").is_empty());
}

#[test]
fn support_can_read_but_not_delete_orders() {
    let t = table();
    assert!(t.has_permission("support", "orders", "read"));
    assert!(t.has_permission("support", "orders", "update"));
    assert!(!t.has_permission("support", "orders", "delete"));
}

#[test]
fn vendor_can_update_but_not_delete_products() {
    let t = table();
    assert!(t.has_permission("vendor", "products", "update"));
    assert!(!t.has_permission("vendor", "products", "delete"));
}

#[test]
fn literal_mode_treats_resource_wildcards_as_plain_strings() {
    let t = table();
    assert_eq!(t.wildcard_mode(), WildcardMode::Literal);
    assert!(!t.has_permission("manager", "products", "create"));
    assert!(!t.has_permission("support", "tickets", "close"));
    assert!(t.has_permission("manager", "customers", "read"));
}

#[test]
fn prefix_mode_expands_resource_wildcards() {
    let t = PermissionTable::storefront_defaults_with(WildcardMode::ResourcePrefix);
    assert!(t.has_permission("manager", "products", "create"));
    assert!(t.has_permission("manager", "orders", "delete"));
    assert!(t.has_permission("support", "tickets", "close"));
    assert!(!t.has_permission("manager", "customers", "delete"));
    assert!(!t.has_permission("manager", "products", ""));
    assert!(!t.has_permission("vendor", "products", "delete"));
}

#[test]
fn guard_reports_forbidden_permission() {
    let err = authorize(&table(), "customer", "analytics", "read").unwrap_err();
    assert_eq!(err.status_code(), 403);
    assert!(err.to_string().contains("analytics.read"));
}

#[test]
fn table_is_shareable_across_threads() {
    let t = std::sync::Arc::new(table());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let t = t.clone();
            std::thread::spawn(move || t.has_permission("vendor", "orders", "read"))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,11}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: roles absent from the table never grant anything.
    #[test]
    fn unknown_roles_are_denied(role in "[a-z]{1,12}", resource in segment(), action in segment()) {
        prop_assume!(!builtin_roles().contains(&role.as_str()));
        prop_assert!(!table().has_permission(&role, &resource, &action));
        prop_assert!(!PermissionTable::storefront_defaults_with(WildcardMode::ResourcePrefix)
            .has_permission(&role, &resource, &action));
    }

    /// Property: admin is allowed every non-empty resource/action.
    #[test]
    fn admin_is_allowed_everything(resource in segment(), action in segment()) {
        prop_assert!(table().has_permission("admin", &resource, &action));
    }

    /// Property: customer is never allowed anything.
    #[test]
    fn customer_is_denied_everything(resource in ".{0,16}", action in ".{0,16}") {
        prop_assert!(!table().has_permission("customer", &resource, &action));
    }

    /// Property: repeated queries give identical answers.
    #[test]
    fn decisions_are_idempotent(
        role_idx in 0usize..5,
        resource in segment(),
        action in segment(),
    ) {
        let t = table();
        let role = builtin_roles()[role_idx];
        let first = t.has_permission(role, &resource, &action);
        for _ in 0..3 {
            prop_assert_eq!(t.has_permission(role, &resource, &action), first);
        }
    }

    /// Property: prefix evaluation only ever adds permissions.
    #[test]
    fn prefix_mode_is_a_superset_of_literal(
        role_idx in 0usize..5,
        resource in segment(),
        action in segment(),
    ) {
        let literal = table();
        let prefix = PermissionTable::storefront_defaults_with(WildcardMode::ResourcePrefix);
        let role = builtin_roles()[role_idx];
        if literal.has_permission(role, &resource, &action) {
            prop_assert!(prefix.has_permission(role, &resource, &action));
        }
    }
}
