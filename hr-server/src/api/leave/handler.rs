//! Leave Management API Handlers

use axum::Json;
use axum::extract::State;
use chrono::{Datelike, Utc};
use http::StatusCode;
use shared::models::{
    CreateLeaveRequestDto, LeaveBalanceDto, LeaveBalanceQuery, LeaveDecisionDto, LeaveRequestDto,
    LeaveRequestQuery, LeaveTypeDto,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::utils::response::{created, found, success, success_with_message};
use crate::utils::{ApiResponse, AppResult};

const LEAVE_MANAGE: &str = "leave:manage";

fn year_or_current(query: &LeaveBalanceQuery) -> i32 {
    query.year.unwrap_or_else(|| Utc::now().year())
}

/// GET /api/LeaveManagement/types
pub async fn leave_types(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<LeaveTypeDto>>>> {
    Ok(success(state.leave.leave_types().await?))
}

/// GET /api/LeaveManagement/balances/my?year
pub async fn my_balances(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiQuery(query): ApiQuery<LeaveBalanceQuery>,
) -> AppResult<Json<ApiResponse<Vec<LeaveBalanceDto>>>> {
    let employee_id = current_user.employee_id()?;
    let balances = state
        .leave
        .balances(employee_id, year_or_current(&query))
        .await?;
    Ok(success(balances))
}

/// GET /api/LeaveManagement/balances/{employee_id}?year
pub async fn employee_balances(
    State(state): State<ServerState>,
    ApiPath(employee_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<LeaveBalanceQuery>,
) -> AppResult<Json<ApiResponse<Vec<LeaveBalanceDto>>>> {
    let balances = state
        .leave
        .balances(employee_id, year_or_current(&query))
        .await?;
    Ok(success(balances))
}

/// POST /api/LeaveManagement/requests
pub async fn submit(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateLeaveRequestDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<LeaveRequestDto>>)> {
    let employee_id = current_user.employee_id()?;
    tracing::info!(
        employee_id,
        leave_type_id = payload.leave_type_id,
        start = %payload.start_date,
        end = %payload.end_date,
        "Submitting leave request"
    );

    let request = state.leave.submit_request(employee_id, payload).await?;
    Ok(created(request, "Leave request submitted successfully"))
}

/// GET /api/LeaveManagement/requests/my
pub async fn my_requests(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<LeaveRequestDto>>>> {
    let employee_id = current_user.employee_id()?;
    Ok(success(state.leave.employee_requests(employee_id).await?))
}

/// GET /api/LeaveManagement/requests?status&employeeId
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<LeaveRequestQuery>,
) -> AppResult<Json<ApiResponse<Vec<LeaveRequestDto>>>> {
    Ok(success(state.leave.list_requests(query).await?))
}

/// GET /api/LeaveManagement/requests/{id} - Owner or `leave:manage`
pub async fn get_by_id(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<LeaveRequestDto>>> {
    let request = found(state.leave.get_request(id).await?, "Leave request", id)?;
    current_user.can_access_owned(request.employee_id, LEAVE_MANAGE)?;
    Ok(success(request))
}

/// POST /api/LeaveManagement/requests/{id}/approve
pub async fn approve(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<LeaveDecisionDto>,
) -> AppResult<Json<ApiResponse<LeaveRequestDto>>> {
    let reviewer = current_user.user_id()?;
    tracing::info!(user_id = %reviewer, request_id = id, "Approving leave request");

    let request = found(
        state.leave.approve_request(id, reviewer, payload).await?,
        "Leave request",
        id,
    )?;
    Ok(success_with_message(request, "Leave request approved"))
}

/// POST /api/LeaveManagement/requests/{id}/reject
pub async fn reject(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<LeaveDecisionDto>,
) -> AppResult<Json<ApiResponse<LeaveRequestDto>>> {
    let reviewer = current_user.user_id()?;
    tracing::info!(user_id = %reviewer, request_id = id, "Rejecting leave request");

    let request = found(
        state.leave.reject_request(id, reviewer, payload).await?,
        "Leave request",
        id,
    )?;
    Ok(success_with_message(request, "Leave request rejected"))
}

/// POST /api/LeaveManagement/requests/{id}/cancel - Requester only
pub async fn cancel(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<LeaveRequestDto>>> {
    let employee_id = current_user.employee_id()?;
    tracing::info!(employee_id, request_id = id, "Cancelling leave request");

    let request = found(
        state.leave.cancel_request(id, employee_id).await?,
        "Leave request",
        id,
    )?;
    Ok(success_with_message(request, "Leave request cancelled"))
}
