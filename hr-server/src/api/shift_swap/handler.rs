//! Shift Swap & Coverage API Handlers

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use shared::models::{
    CoverageRequestDto, CreateCoverageRequestDto, CreateShiftSwapRequestDto, RespondShiftSwapDto,
    ShiftSwapDecisionDto, ShiftSwapQuery, ShiftSwapRequestDto,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::utils::response::{created, found, success, success_with_message};
use crate::utils::{ApiResponse, AppResult};

type SwapResponse = AppResult<Json<ApiResponse<ShiftSwapRequestDto>>>;
type CoverageResponse = AppResult<Json<ApiResponse<CoverageRequestDto>>>;

// ========== Swaps ==========

/// POST /api/ShiftSwap
pub async fn create_swap(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateShiftSwapRequestDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<ShiftSwapRequestDto>>)> {
    let employee_id = current_user.employee_id()?;
    tracing::info!(
        employee_id,
        shift_id = payload.requester_shift_id,
        target_employee_id = payload.target_employee_id,
        "Requesting shift swap"
    );
    let swap = state.shifts.create_swap_request(employee_id, payload).await?;
    Ok(created(swap, "Shift swap requested successfully"))
}

/// GET /api/ShiftSwap/my
pub async fn my_swaps(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<ShiftSwapRequestDto>>>> {
    let employee_id = current_user.employee_id()?;
    Ok(success(state.shifts.employee_swap_requests(employee_id).await?))
}

/// GET /api/ShiftSwap?status
pub async fn list_swaps(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<ShiftSwapQuery>,
) -> AppResult<Json<ApiResponse<Vec<ShiftSwapRequestDto>>>> {
    Ok(success(state.shifts.list_swap_requests(query).await?))
}

/// POST /api/ShiftSwap/{id}/respond - Target employee only
pub async fn respond(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<RespondShiftSwapDto>,
) -> SwapResponse {
    let employee_id = current_user.employee_id()?;
    tracing::info!(employee_id, swap_id = id, accept = payload.accept, "Responding to shift swap");
    let swap = found(
        state.shifts.respond_to_swap(id, employee_id, payload.accept).await?,
        "Shift swap request",
        id,
    )?;
    let message = if payload.accept {
        "Shift swap accepted"
    } else {
        "Shift swap declined"
    };
    Ok(success_with_message(swap, message))
}

/// POST /api/ShiftSwap/{id}/approve
pub async fn approve_swap(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<ShiftSwapDecisionDto>,
) -> SwapResponse {
    tracing::info!(user_id = %current_user.log_id(), swap_id = id, "Approving shift swap");
    let swap = found(
        state.shifts.approve_swap(id, payload.comment).await?,
        "Shift swap request",
        id,
    )?;
    Ok(success_with_message(swap, "Shift swap approved"))
}

/// POST /api/ShiftSwap/{id}/reject
pub async fn reject_swap(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<ShiftSwapDecisionDto>,
) -> SwapResponse {
    tracing::info!(user_id = %current_user.log_id(), swap_id = id, "Rejecting shift swap");
    let swap = found(
        state.shifts.reject_swap(id, payload.comment).await?,
        "Shift swap request",
        id,
    )?;
    Ok(success_with_message(swap, "Shift swap rejected"))
}

/// POST /api/ShiftSwap/{id}/cancel - Requester only
pub async fn cancel_swap(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> SwapResponse {
    let employee_id = current_user.employee_id()?;
    tracing::info!(employee_id, swap_id = id, "Cancelling shift swap");
    let swap = found(
        state.shifts.cancel_swap(id, employee_id).await?,
        "Shift swap request",
        id,
    )?;
    Ok(success_with_message(swap, "Shift swap cancelled"))
}

// ========== Coverage ==========

/// POST /api/ShiftSwap/coverage
pub async fn create_coverage(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateCoverageRequestDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<CoverageRequestDto>>)> {
    let employee_id = current_user.employee_id()?;
    tracing::info!(employee_id, shift_id = payload.shift_id, "Requesting shift coverage");
    let coverage = state
        .shifts
        .create_coverage_request(employee_id, payload)
        .await?;
    Ok(created(coverage, "Coverage requested successfully"))
}

/// GET /api/ShiftSwap/coverage/open
pub async fn open_coverage(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<CoverageRequestDto>>>> {
    Ok(success(state.shifts.open_coverage_requests().await?))
}

/// POST /api/ShiftSwap/coverage/{id}/claim
pub async fn claim_coverage(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> CoverageResponse {
    let employee_id = current_user.employee_id()?;
    tracing::info!(employee_id, coverage_id = id, "Claiming shift coverage");
    let coverage = found(
        state.shifts.claim_coverage(id, employee_id).await?,
        "Coverage request",
        id,
    )?;
    Ok(success_with_message(coverage, "Coverage claimed"))
}

/// POST /api/ShiftSwap/coverage/{id}/approve
pub async fn approve_coverage(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> CoverageResponse {
    tracing::info!(user_id = %current_user.log_id(), coverage_id = id, "Approving shift coverage");
    let coverage = found(
        state.shifts.approve_coverage(id).await?,
        "Coverage request",
        id,
    )?;
    Ok(success_with_message(coverage, "Coverage approved"))
}
