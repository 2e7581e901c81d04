//! Shift API Handlers

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use shared::models::{AssignShiftDto, CreateShiftDto, ShiftDto, ShiftQuery, UpdateShiftDto};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::utils::response::{
    created, found, not_found_error, success, success_message, success_with_message,
};
use crate::utils::{ApiResponse, AppResult};

/// GET /api/Shift?from&to&employeeId
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<ShiftQuery>,
) -> AppResult<Json<ApiResponse<Vec<ShiftDto>>>> {
    Ok(success(state.shifts.list_shifts(query).await?))
}

/// GET /api/Shift/my?from&to - The caller's own shifts
pub async fn my_shifts(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiQuery(query): ApiQuery<ShiftQuery>,
) -> AppResult<Json<ApiResponse<Vec<ShiftDto>>>> {
    let employee_id = current_user.employee_id()?;
    let query = ShiftQuery {
        employee_id: Some(employee_id),
        ..query
    };
    Ok(success(state.shifts.list_shifts(query).await?))
}

/// GET /api/Shift/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<ShiftDto>>> {
    let shift = found(state.shifts.get_shift(id).await?, "Shift", id)?;
    Ok(success(shift))
}

/// POST /api/Shift
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateShiftDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<ShiftDto>>)> {
    tracing::info!(
        user_id = %current_user.log_id(),
        employee_id = ?payload.employee_id,
        "Creating shift"
    );
    let shift = state.shifts.create_shift(payload).await?;
    Ok(created(shift, "Shift created successfully"))
}

/// PUT /api/Shift/{id}
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateShiftDto>,
) -> AppResult<Json<ApiResponse<ShiftDto>>> {
    tracing::info!(user_id = %current_user.log_id(), shift_id = id, "Updating shift");
    let shift = found(state.shifts.update_shift(id, payload).await?, "Shift", id)?;
    Ok(success(shift))
}

/// DELETE /api/Shift/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    tracing::info!(user_id = %current_user.log_id(), shift_id = id, "Deleting shift");
    if !state.shifts.delete_shift(id).await? {
        return Err(not_found_error(format!("Shift with ID {id} not found"), Vec::new()));
    }
    Ok(success_message("Shift deleted successfully"))
}

/// POST /api/Shift/{id}/assign
pub async fn assign(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<AssignShiftDto>,
) -> AppResult<Json<ApiResponse<ShiftDto>>> {
    tracing::info!(
        user_id = %current_user.log_id(),
        shift_id = id,
        employee_id = payload.employee_id,
        "Assigning shift"
    );
    let shift = found(
        state.shifts.assign_shift(id, payload.employee_id).await?,
        "Shift",
        id,
    )?;
    Ok(success_with_message(shift, "Shift assigned successfully"))
}
