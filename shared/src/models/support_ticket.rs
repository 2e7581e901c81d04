//! Support Ticket Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Ticket status; `Closed` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Support ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicketDto {
    pub id: i64,
    /// Human-facing reference, e.g. `TCK-000042`
    pub ticket_number: String,
    pub employee_id: i64,
    pub subject: String,
    pub description: String,
    pub category: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub assigned_to: Option<i64>,
    pub resolution_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Open ticket payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupportTicketDto {
    #[validate(length(min = 1, max = 200, message = "Subject is required (max 200 chars)"))]
    pub subject: String,
    #[validate(length(min = 1, max = 4000, message = "Description is required (max 4000 chars)"))]
    pub description: String,
    #[validate(length(min = 1, max = 100, message = "Category is required (max 100 chars)"))]
    pub category: String,
    #[serde(default)]
    pub priority: TicketPriority,
}

/// Status change payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketStatusDto {
    pub status: TicketStatus,
    #[validate(length(max = 2000))]
    pub resolution_note: Option<String>,
}

/// Assign ticket payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignTicketDto {
    #[validate(range(min = 1, message = "Assignee employee ID must be positive"))]
    pub assignee_employee_id: i64,
}

/// Add comment payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddTicketCommentDto {
    #[validate(length(min = 1, max = 4000, message = "Message is required (max 4000 chars)"))]
    pub message: String,
    /// Internal notes are hidden from the ticket owner
    #[serde(default)]
    pub is_internal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCommentDto {
    pub id: i64,
    pub ticket_id: i64,
    pub author_employee_id: i64,
    pub message: String,
    pub is_internal: bool,
    pub created_at: DateTime<Utc>,
}

/// Ticket list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicketQuery {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub assigned_to: Option<i64>,
}
