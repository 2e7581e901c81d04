//! Report Schedules API Handlers

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use shared::models::{
    CreateReportScheduleDto, ReportRunDto, ReportRunStatus, ReportScheduleDto,
    ToggleScheduleDto, UpdateReportScheduleDto,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::extract::{ApiPath, ValidatedJson};
use crate::utils::response::{
    created, found, not_found_error, success, success_message, success_with_message,
};
use crate::utils::{ApiResponse, AppResult};

/// GET /api/ReportSchedules
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<ReportScheduleDto>>>> {
    Ok(success(state.report_schedules.list_schedules().await?))
}

/// GET /api/ReportSchedules/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<ReportScheduleDto>>> {
    let schedule = found(state.report_schedules.get_schedule(id).await?, "Report schedule", id)?;
    Ok(success(schedule))
}

/// POST /api/ReportSchedules
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateReportScheduleDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<ReportScheduleDto>>)> {
    let created_by = current_user.user_id()?;
    tracing::info!(
        user_id = %created_by,
        name = %payload.name,
        cron = %payload.cron_expression,
        "Creating report schedule"
    );
    let schedule = state
        .report_schedules
        .create_schedule(payload, created_by)
        .await?;
    Ok(created(schedule, "Report schedule created successfully"))
}

/// PUT /api/ReportSchedules/{id}
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateReportScheduleDto>,
) -> AppResult<Json<ApiResponse<ReportScheduleDto>>> {
    tracing::info!(user_id = %current_user.log_id(), schedule_id = id, "Updating report schedule");
    let schedule = found(
        state.report_schedules.update_schedule(id, payload).await?,
        "Report schedule",
        id,
    )?;
    Ok(success(schedule))
}

/// DELETE /api/ReportSchedules/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    tracing::info!(user_id = %current_user.log_id(), schedule_id = id, "Deleting report schedule");
    if !state.report_schedules.delete_schedule(id).await? {
        return Err(not_found_error(
            format!("Report schedule with ID {id} not found"),
            Vec::new(),
        ));
    }
    Ok(success_message("Report schedule deleted successfully"))
}

/// POST /api/ReportSchedules/{id}/toggle
pub async fn toggle(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<ToggleScheduleDto>,
) -> AppResult<Json<ApiResponse<ReportScheduleDto>>> {
    tracing::info!(
        user_id = %current_user.log_id(),
        schedule_id = id,
        is_active = payload.is_active,
        "Toggling report schedule"
    );
    let schedule = found(
        state
            .report_schedules
            .toggle_schedule(id, payload.is_active)
            .await?,
        "Report schedule",
        id,
    )?;
    let message = if schedule.is_active {
        "Report schedule activated"
    } else {
        "Report schedule deactivated"
    };
    Ok(success_with_message(schedule, message))
}

/// POST /api/ReportSchedules/{id}/run - generate now and record the run
pub async fn run_now(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<ReportRunDto>>> {
    tracing::info!(user_id = %current_user.log_id(), schedule_id = id, "Running report schedule");
    let run = found(state.report_schedules.run_now(id).await?, "Report schedule", id)?;
    let message = match run.status {
        ReportRunStatus::Completed => "Report generated",
        ReportRunStatus::Failed => "Report generation failed",
    };
    Ok(success_with_message(run, message))
}

/// GET /api/ReportSchedules/{id}/runs
pub async fn runs(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<Vec<ReportRunDto>>>> {
    let runs = found(state.report_schedules.runs(id).await?, "Report schedule", id)?;
    Ok(success(runs))
}
