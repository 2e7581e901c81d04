//! Notification API Handlers

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use shared::models::{
    CreateNotificationDto, NotificationDto, NotificationPreferencesDto, NotificationQuery,
    UnreadCountDto,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::utils::response::{created, not_found_error, success, success_message, success_with_message};
use crate::utils::{ApiResponse, AppResult};

/// GET /api/Notification?unreadOnly
pub async fn list(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiQuery(query): ApiQuery<NotificationQuery>,
) -> AppResult<Json<ApiResponse<Vec<NotificationDto>>>> {
    let user_id = current_user.user_id()?;
    let notifications = state
        .notifications
        .list(user_id, query.unread_only.unwrap_or(false))
        .await?;
    Ok(success(notifications))
}

/// GET /api/Notification/unread-count
pub async fn unread_count(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<UnreadCountDto>>> {
    let user_id = current_user.user_id()?;
    let count = state.notifications.unread_count(user_id).await?;
    Ok(success(UnreadCountDto { count }))
}

/// POST /api/Notification/{id}/read
pub async fn mark_read(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    let user_id = current_user.user_id()?;
    if !state.notifications.mark_read(id, user_id).await? {
        return Err(not_found_error(
            format!("Notification with ID {id} not found"),
            Vec::new(),
        ));
    }
    Ok(success_message("Notification marked as read"))
}

/// POST /api/Notification/read-all
pub async fn mark_all_read(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<UnreadCountDto>>> {
    let user_id = current_user.user_id()?;
    let count = state.notifications.mark_all_read(user_id).await?;
    Ok(success_with_message(
        UnreadCountDto { count },
        format!("{count} notification(s) marked as read"),
    ))
}

/// DELETE /api/Notification/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    let user_id = current_user.user_id()?;
    if !state.notifications.delete(id, user_id).await? {
        return Err(not_found_error(
            format!("Notification with ID {id} not found"),
            Vec::new(),
        ));
    }
    Ok(success_message("Notification deleted"))
}

/// POST /api/Notification - Fan out to the listed users
pub async fn send(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateNotificationDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<Vec<NotificationDto>>>)> {
    tracing::info!(
        user_id = %current_user.log_id(),
        recipients = payload.user_ids.len(),
        "Sending notification"
    );
    let delivered = state.notifications.send(payload).await?;
    let message = format!("Notification sent to {} user(s)", delivered.len());
    Ok(created(delivered, message))
}

/// GET /api/Notification/preferences
pub async fn preferences(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<NotificationPreferencesDto>>> {
    let user_id = current_user.user_id()?;
    Ok(success(state.notifications.preferences(user_id).await?))
}

/// PUT /api/Notification/preferences
pub async fn update_preferences(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<NotificationPreferencesDto>,
) -> AppResult<Json<ApiResponse<NotificationPreferencesDto>>> {
    let user_id = current_user.user_id()?;
    let preferences = state
        .notifications
        .update_preferences(user_id, payload)
        .await?;
    Ok(success_with_message(preferences, "Preferences updated"))
}
