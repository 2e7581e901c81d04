//! Role Model (RBAC)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Role entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Permission strings (e.g. `["all"]`, `["assets:read", "leave:approve"]`)
    pub permissions: Vec<String>,
    pub is_system: bool,
    pub user_count: usize,
}

/// Create role payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleDto {
    #[validate(length(min = 1, max = 100, message = "Role name is required (max 100 chars)"))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Update role payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub permissions: Option<Vec<String>>,
}

/// Assign role to user payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleDto {
    #[validate(length(min = 1, max = 100, message = "User ID is required"))]
    pub user_id: String,
    #[validate(range(min = 1, message = "Role ID must be positive"))]
    pub role_id: i64,
}

/// Roles held by a user and the union of their permissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRolesDto {
    pub user_id: String,
    pub roles: Vec<RoleDto>,
    pub permissions: Vec<String>,
}
