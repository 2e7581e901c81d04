//! Role API Handlers

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use shared::models::{AssignRoleDto, CreateRoleDto, RoleDto, UpdateRoleDto, UserRolesDto};

use crate::auth::CurrentUser;
use crate::auth::permissions::{ALL_PERMISSIONS, is_valid_permission};
use crate::core::ServerState;
use crate::utils::extract::{ApiPath, ValidatedJson};
use crate::utils::response::{created, found, not_found_error, success, success_message};
use crate::utils::{ApiResponse, AppError, AppResult};

/// Callers may only grant permissions they hold themselves
fn validate_permission_ceiling(
    current_user: &CurrentUser,
    permissions: &[String],
) -> AppResult<()> {
    for perm in permissions {
        if !is_valid_permission(perm) {
            return Err(AppError::validation(format!("Invalid permission: {perm}"))
                .with_error(format!("permissions: '{perm}' is not a known permission")));
        }
        if !current_user.has_permission(perm) {
            return Err(AppError::forbidden(format!(
                "Cannot grant permission '{perm}': you do not have it yourself"
            )));
        }
    }
    Ok(())
}

/// GET /api/Role
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<RoleDto>>>> {
    Ok(success(state.roles.list_roles().await?))
}

/// GET /api/Role/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<RoleDto>>> {
    let role = found(state.roles.get_role(id).await?, "Role", id)?;
    Ok(success(role))
}

/// GET /api/Role/permissions - every grantable permission
pub async fn all_permissions() -> AppResult<Json<ApiResponse<Vec<String>>>> {
    let permissions = ALL_PERMISSIONS.iter().map(|s| s.to_string()).collect();
    Ok(success(permissions))
}

/// POST /api/Role
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateRoleDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<RoleDto>>)> {
    tracing::info!(
        user_id = %current_user.log_id(),
        role_name = %payload.name,
        "Creating role"
    );
    validate_permission_ceiling(&current_user, &payload.permissions)?;

    let role = state.roles.create_role(payload).await?;
    Ok(created(role, "Role created successfully"))
}

/// PUT /api/Role/{id}
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateRoleDto>,
) -> AppResult<Json<ApiResponse<RoleDto>>> {
    tracing::info!(user_id = %current_user.log_id(), role_id = id, "Updating role");
    if let Some(ref permissions) = payload.permissions {
        validate_permission_ceiling(&current_user, permissions)?;
    }

    let role = found(state.roles.update_role(id, payload).await?, "Role", id)?;
    Ok(success(role))
}

/// DELETE /api/Role/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    tracing::info!(user_id = %current_user.log_id(), role_id = id, "Deleting role");
    if !state.roles.delete_role(id).await? {
        return Err(not_found_error(
            format!("Role with ID {id} not found"),
            Vec::new(),
        ));
    }
    Ok(success_message("Role deleted successfully"))
}

/// POST /api/Role/assign
///
/// Handing out a role grants its permissions, so the same ceiling applies.
pub async fn assign(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<AssignRoleDto>,
) -> AppResult<Json<ApiResponse<UserRolesDto>>> {
    tracing::info!(
        user_id = %current_user.log_id(),
        target_user = %payload.user_id,
        role_id = payload.role_id,
        "Assigning role"
    );
    let role = found(state.roles.get_role(payload.role_id).await?, "Role", payload.role_id)?;
    validate_permission_ceiling(&current_user, &role.permissions)?;

    let roles = state.roles.assign_role(payload).await?;
    Ok(success(roles))
}

/// GET /api/Role/user/{user_id}
pub async fn user_roles(
    State(state): State<ServerState>,
    ApiPath(user_id): ApiPath<String>,
) -> AppResult<Json<ApiResponse<UserRolesDto>>> {
    Ok(success(state.roles.user_roles(&user_id).await?))
}

/// GET /api/Role/my-permissions
///
/// Users without stored role assignments get the permissions their token
/// carries.
pub async fn my_permissions(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<UserRolesDto>>> {
    let user_id = current_user.user_id()?;
    let mut roles = state.roles.user_roles(user_id).await?;
    if roles.roles.is_empty() {
        roles.permissions = current_user.permissions.clone();
    }
    Ok(success(roles))
}
