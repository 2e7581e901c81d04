//! Permission Definitions
//!
//! Module-scoped RBAC. Read-only self-service (own leave, own expenses,
//! own tickets, own notifications) needs no permission beyond a valid
//! token; managing other people's data does.

/// Grantable permissions
///
/// `all` and the `module:*` wildcards are not listed; they are accepted by
/// [`is_valid_permission`] separately.
pub const ALL_PERMISSIONS: &[&str] = &[
    // Assets
    "assets:read",
    "assets:manage",
    "assets:assign",
    // Leave
    "leave:manage",
    "leave:approve",
    // Shifts
    "shifts:read",
    "shifts:manage",
    "shift_swaps:approve",
    // Expenses
    "expenses:read_all",
    "expenses:approve",
    // Communication
    "notifications:send",
    "support:manage",
    "email:manage",
    // Reporting
    "reports:view",
    "reports:schedule",
    // Access control
    "roles:read",
    "roles:write",
];

/// Super permission, granted to the Admin role only
pub const SUPER_PERMISSION: &str = "all";

pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &[SUPER_PERMISSION];

/// Managers run the day-to-day approvals but not access control
pub const DEFAULT_MANAGER_PERMISSIONS: &[&str] = &[
    "assets:read",
    "assets:assign",
    "leave:manage",
    "leave:approve",
    "shifts:read",
    "shifts:manage",
    "shift_swaps:approve",
    "expenses:read_all",
    "expenses:approve",
    "notifications:send",
    "support:manage",
    "reports:view",
];

pub const DEFAULT_EMPLOYEE_PERMISSIONS: &[&str] = &["shifts:read"];

/// Get permissions for a seeded role name
pub fn default_permissions(role_name: &str) -> Vec<String> {
    let permissions: &[&str] = match role_name {
        "Admin" => DEFAULT_ADMIN_PERMISSIONS,
        "Manager" => DEFAULT_MANAGER_PERMISSIONS,
        "Employee" => DEFAULT_EMPLOYEE_PERMISSIONS,
        _ => &[],
    };
    permissions.iter().map(|s| s.to_string()).collect()
}

/// Validate if a permission string is grantable
///
/// A wildcard is only valid for a module that has permissions.
pub fn is_valid_permission(permission: &str) -> bool {
    if permission == SUPER_PERMISSION || ALL_PERMISSIONS.contains(&permission) {
        return true;
    }
    match permission.strip_suffix(":*") {
        Some(module) => ALL_PERMISSIONS
            .iter()
            .any(|p| p.split_once(':').is_some_and(|(m, _)| m == module)),
        None => false,
    }
}

/// Whether `granted` covers `required` (`all`, exact match or `module:*`)
pub fn permission_matches(granted: &str, required: &str) -> bool {
    if granted == SUPER_PERMISSION || granted == required {
        return true;
    }
    match (granted.strip_suffix(":*"), required.split_once(':')) {
        (Some(module), Some((required_module, _))) => module == required_module,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_permission() {
        assert!(is_valid_permission("assets:read"));
        assert!(is_valid_permission("all"));
        assert!(is_valid_permission("leave:*"));
        assert!(!is_valid_permission("payroll:*"));
        assert!(!is_valid_permission("assets:steal"));
        assert!(!is_valid_permission(""));
    }

    #[test]
    fn test_permission_matches() {
        assert!(permission_matches("all", "roles:write"));
        assert!(permission_matches("leave:*", "leave:approve"));
        assert!(!permission_matches("leave:*", "expenses:approve"));
        assert!(!permission_matches("leave:approve", "leave:manage"));
    }

    #[test]
    fn test_default_permissions_are_valid() {
        for role in ["Admin", "Manager", "Employee"] {
            let permissions = default_permissions(role);
            assert!(!permissions.is_empty());
            assert!(permissions.iter().all(|p| is_valid_permission(p)));
        }
        assert!(default_permissions("Contractor").is_empty());
    }
}
