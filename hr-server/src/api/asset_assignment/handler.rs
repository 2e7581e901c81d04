//! Asset Assignment API Handlers

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use shared::models::{AssetAssignmentDto, CreateAssetAssignmentDto, ReturnAssetDto};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::extract::{ApiPath, ValidatedJson};
use crate::utils::response::{created, found, success_with_message, success};
use crate::utils::{ApiResponse, AppResult};

/// POST /api/AssetAssignment/assign-to-employee
pub async fn assign(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateAssetAssignmentDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<AssetAssignmentDto>>)> {
    let assigned_by = current_user.user_id()?;
    tracing::info!(
        user_id = %assigned_by,
        asset_id = payload.asset_id,
        employee_id = payload.employee_id,
        "Assigning asset"
    );

    let assignment = state.assets.assign_asset(payload, assigned_by).await?;
    Ok(created(assignment, "Asset assigned successfully"))
}

/// POST /api/AssetAssignment/{id}/return
pub async fn return_asset(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<ReturnAssetDto>,
) -> AppResult<Json<ApiResponse<AssetAssignmentDto>>> {
    tracing::info!(user_id = %current_user.log_id(), assignment_id = id, "Returning asset");

    let assignment = found(
        state.assets.return_asset(id, payload).await?,
        "Asset assignment",
        id,
    )?;
    Ok(success_with_message(assignment, "Asset returned successfully"))
}

/// GET /api/AssetAssignment/employee/{employee_id}
pub async fn employee_assignments(
    State(state): State<ServerState>,
    ApiPath(employee_id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<Vec<AssetAssignmentDto>>>> {
    let assignments = state.assets.employee_assignments(employee_id).await?;
    Ok(success(assignments))
}

/// GET /api/AssetAssignment/asset/{asset_id}/history
pub async fn asset_history(
    State(state): State<ServerState>,
    ApiPath(asset_id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<Vec<AssetAssignmentDto>>>> {
    let history = state.assets.asset_history(asset_id).await?;
    Ok(success(history))
}

/// GET /api/AssetAssignment/my-assets - Assets held by the caller
pub async fn my_assets(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<AssetAssignmentDto>>>> {
    let employee_id = current_user.employee_id()?;
    let assignments = state.assets.employee_assignments(employee_id).await?;
    Ok(success(assignments))
}
