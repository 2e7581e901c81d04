//! Notification Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NotificationType {
    #[default]
    Info,
    Warning,
    Approval,
    Reminder,
    System,
}

/// In-app notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: i64,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

/// Send notification payload (fan-out to every listed user)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationDto {
    #[validate(length(min = 1, message = "At least one recipient is required"))]
    pub user_ids: Vec<String>,
    #[validate(length(min = 1, max = 200, message = "Title is required (max 200 chars)"))]
    pub title: String,
    #[validate(length(min = 1, max = 2000, message = "Message is required (max 2000 chars)"))]
    pub message: String,
    #[serde(default)]
    pub notification_type: NotificationType,
    #[validate(length(max = 500))]
    pub link: Option<String>,
}

/// Inbox filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    pub unread_only: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountDto {
    pub count: usize,
}

/// Per-user delivery preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferencesDto {
    pub email_enabled: bool,
    pub in_app_enabled: bool,
    pub leave_updates: bool,
    pub shift_updates: bool,
    pub expense_updates: bool,
    pub ticket_updates: bool,
}

impl Default for NotificationPreferencesDto {
    fn default() -> Self {
        Self {
            email_enabled: true,
            in_app_enabled: true,
            leave_updates: true,
            shift_updates: true,
            expense_updates: true,
            ticket_updates: true,
        }
    }
}
