//! Email Campaign Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Campaign status
///
/// Draft → Scheduled → Sent; Draft | Scheduled → Cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Sent,
    Cancelled,
}

/// Email campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCampaignDto {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub body_html: String,
    pub recipients: Vec<String>,
    pub status: CampaignStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub sent_count: usize,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create campaign payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmailCampaignDto {
    #[validate(length(min = 1, max = 200, message = "Name is required (max 200 chars)"))]
    pub name: String,
    #[validate(length(min = 1, max = 300, message = "Subject is required (max 300 chars)"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Body is required"))]
    pub body_html: String,
    #[validate(length(min = 1, message = "At least one recipient is required"))]
    pub recipients: Vec<String>,
}

/// Update campaign payload (drafts only)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmailCampaignDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 300))]
    pub subject: Option<String>,
    #[validate(length(min = 1))]
    pub body_html: Option<String>,
    #[validate(length(min = 1))]
    pub recipients: Option<Vec<String>>,
}

/// Schedule campaign payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCampaignDto {
    pub scheduled_at: DateTime<Utc>,
}

/// Outcome of sending a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSendResultDto {
    pub campaign_id: i64,
    pub sent_count: usize,
    pub failed_recipients: Vec<String>,
    pub sent_at: DateTime<Utc>,
}

/// Reusable email template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplateDto {
    pub key: String,
    pub name: String,
    pub subject: String,
    pub body_html: String,
}

/// Ad-hoc email payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailDto {
    #[validate(length(min = 1, message = "At least one recipient is required"))]
    pub to: Vec<String>,
    #[validate(length(min = 1, max = 300, message = "Subject is required (max 300 chars)"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Body is required"))]
    pub body_html: String,
}

/// Outcome of an ad-hoc send
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSendResultDto {
    pub accepted: usize,
    pub rejected: Vec<String>,
}
