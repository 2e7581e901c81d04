//! Email API Handlers

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use shared::models::{
    CampaignSendResultDto, CreateEmailCampaignDto, EmailCampaignDto, EmailSendResultDto,
    EmailTemplateDto, ScheduleCampaignDto, SendEmailDto, UpdateEmailCampaignDto,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::extract::{ApiPath, ValidatedJson};
use crate::utils::response::{
    created, found, not_found_error, success, success_message, success_with_message,
};
use crate::utils::{ApiResponse, AppResult};

type CampaignResponse = AppResult<Json<ApiResponse<EmailCampaignDto>>>;

/// GET /api/Email/campaigns
pub async fn list_campaigns(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<EmailCampaignDto>>>> {
    Ok(success(state.email.list_campaigns().await?))
}

/// GET /api/Email/campaigns/{id}
pub async fn get_campaign(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> CampaignResponse {
    let campaign = found(state.email.get_campaign(id).await?, "Email campaign", id)?;
    Ok(success(campaign))
}

/// POST /api/Email/campaigns
pub async fn create_campaign(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateEmailCampaignDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<EmailCampaignDto>>)> {
    let created_by = current_user.user_id()?;
    tracing::info!(
        user_id = %created_by,
        name = %payload.name,
        recipients = payload.recipients.len(),
        "Creating email campaign"
    );
    let campaign = state.email.create_campaign(payload, created_by).await?;
    Ok(created(campaign, "Email campaign created successfully"))
}

/// PUT /api/Email/campaigns/{id}
pub async fn update_campaign(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateEmailCampaignDto>,
) -> CampaignResponse {
    tracing::info!(user_id = %current_user.log_id(), campaign_id = id, "Updating email campaign");
    let campaign = found(
        state.email.update_campaign(id, payload).await?,
        "Email campaign",
        id,
    )?;
    Ok(success(campaign))
}

/// DELETE /api/Email/campaigns/{id}
pub async fn delete_campaign(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    tracing::info!(user_id = %current_user.log_id(), campaign_id = id, "Deleting email campaign");
    if !state.email.delete_campaign(id).await? {
        return Err(not_found_error(
            format!("Email campaign with ID {id} not found"),
            Vec::new(),
        ));
    }
    Ok(success_message("Email campaign deleted successfully"))
}

/// POST /api/Email/campaigns/{id}/schedule
pub async fn schedule_campaign(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<ScheduleCampaignDto>,
) -> CampaignResponse {
    tracing::info!(
        user_id = %current_user.log_id(),
        campaign_id = id,
        scheduled_at = %payload.scheduled_at,
        "Scheduling email campaign"
    );
    let campaign = found(
        state.email.schedule_campaign(id, payload.scheduled_at).await?,
        "Email campaign",
        id,
    )?;
    Ok(success_with_message(campaign, "Email campaign scheduled"))
}

/// POST /api/Email/campaigns/{id}/send
pub async fn send_campaign(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<CampaignSendResultDto>>> {
    tracing::info!(user_id = %current_user.log_id(), campaign_id = id, "Sending email campaign");
    let result = found(state.email.send_campaign(id).await?, "Email campaign", id)?;
    let message = format!("Email campaign sent to {} recipient(s)", result.sent_count);
    Ok(success_with_message(result, message))
}

/// POST /api/Email/campaigns/{id}/cancel
pub async fn cancel_campaign(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> CampaignResponse {
    tracing::info!(user_id = %current_user.log_id(), campaign_id = id, "Cancelling email campaign");
    let campaign = found(state.email.cancel_campaign(id).await?, "Email campaign", id)?;
    Ok(success_with_message(campaign, "Email campaign cancelled"))
}

/// GET /api/Email/templates
pub async fn templates(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<EmailTemplateDto>>>> {
    Ok(success(state.email.templates().await?))
}

/// POST /api/Email/send
pub async fn send_email(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<SendEmailDto>,
) -> AppResult<Json<ApiResponse<EmailSendResultDto>>> {
    tracing::info!(
        user_id = %current_user.log_id(),
        recipients = payload.to.len(),
        "Sending email"
    );
    let result = state.email.send_email(payload).await?;
    Ok(success(result))
}
