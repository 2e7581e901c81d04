//! Support Ticket API Handlers
//!
//! Ticket owners see their tickets and public comments; `support:manage`
//! sees everything including internal notes.

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use shared::models::{
    AddTicketCommentDto, AssignTicketDto, CreateSupportTicketDto, SupportTicketDto,
    SupportTicketQuery, TicketCommentDto, UpdateTicketStatusDto,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::utils::response::{created, found, success, success_with_message};
use crate::utils::{ApiResponse, AppError, AppResult};

const SUPPORT_MANAGE: &str = "support:manage";

type TicketResponse = AppResult<Json<ApiResponse<SupportTicketDto>>>;

/// Load a ticket the caller may see
async fn accessible_ticket(
    state: &ServerState,
    current_user: &CurrentUser,
    id: i64,
) -> AppResult<SupportTicketDto> {
    let ticket = found(state.support_tickets.get_ticket(id).await?, "Support ticket", id)?;
    current_user.can_access_owned(ticket.employee_id, SUPPORT_MANAGE)?;
    Ok(ticket)
}

/// POST /api/SupportTicket
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateSupportTicketDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<SupportTicketDto>>)> {
    let employee_id = current_user.employee_id()?;
    tracing::info!(employee_id, category = %payload.category, "Opening support ticket");
    let ticket = state.support_tickets.create_ticket(employee_id, payload).await?;
    Ok(created(ticket, "Support ticket created successfully"))
}

/// GET /api/SupportTicket/my
pub async fn my_tickets(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<SupportTicketDto>>>> {
    let employee_id = current_user.employee_id()?;
    Ok(success(state.support_tickets.employee_tickets(employee_id).await?))
}

/// GET /api/SupportTicket?status&priority&assignedTo
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<SupportTicketQuery>,
) -> AppResult<Json<ApiResponse<Vec<SupportTicketDto>>>> {
    Ok(success(state.support_tickets.list_tickets(query).await?))
}

/// GET /api/SupportTicket/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> TicketResponse {
    Ok(success(accessible_ticket(&state, &current_user, id).await?))
}

/// PUT /api/SupportTicket/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateTicketStatusDto>,
) -> TicketResponse {
    tracing::info!(
        user_id = %current_user.log_id(),
        ticket_id = id,
        status = ?payload.status,
        "Updating ticket status"
    );
    let ticket = found(
        state.support_tickets.update_status(id, payload).await?,
        "Support ticket",
        id,
    )?;
    Ok(success_with_message(ticket, "Ticket status updated"))
}

/// POST /api/SupportTicket/{id}/assign
pub async fn assign(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<AssignTicketDto>,
) -> TicketResponse {
    tracing::info!(
        user_id = %current_user.log_id(),
        ticket_id = id,
        assignee = payload.assignee_employee_id,
        "Assigning ticket"
    );
    let ticket = found(
        state
            .support_tickets
            .assign_ticket(id, payload.assignee_employee_id)
            .await?,
        "Support ticket",
        id,
    )?;
    Ok(success_with_message(ticket, "Ticket assigned"))
}

/// POST /api/SupportTicket/{id}/comments
pub async fn add_comment(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<AddTicketCommentDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<TicketCommentDto>>)> {
    let author = current_user.employee_id()?;
    accessible_ticket(&state, &current_user, id).await?;
    if payload.is_internal && !current_user.has_permission(SUPPORT_MANAGE) {
        return Err(AppError::access_denied(
            "Only support staff can add internal notes",
        ));
    }

    let comment = found(
        state.support_tickets.add_comment(id, author, payload).await?,
        "Support ticket",
        id,
    )?;
    Ok(created(comment, "Comment added"))
}

/// GET /api/SupportTicket/{id}/comments
pub async fn comments(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<Vec<TicketCommentDto>>>> {
    accessible_ticket(&state, &current_user, id).await?;
    let include_internal = current_user.has_permission(SUPPORT_MANAGE);
    let comments = found(
        state.support_tickets.comments(id, include_internal).await?,
        "Support ticket",
        id,
    )?;
    Ok(success(comments))
}
