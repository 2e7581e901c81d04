//! Report Schedule Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::financial_report::ReportType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

/// Scheduled report definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportScheduleDto {
    pub id: i64,
    pub name: String,
    pub report_type: ReportType,
    /// Five-field cron expression (minute hour day-of-month month day-of-week)
    pub cron_expression: String,
    pub recipients: Vec<String>,
    pub format: ReportFormat,
    pub is_active: bool,
    pub created_by: String,
    pub last_run_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Create schedule payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportScheduleDto {
    #[validate(length(min = 1, max = 200, message = "Name is required (max 200 chars)"))]
    pub name: String,
    pub report_type: ReportType,
    #[validate(length(min = 1, max = 100, message = "Cron expression is required"))]
    pub cron_expression: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub format: ReportFormat,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Update schedule payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportScheduleDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub report_type: Option<ReportType>,
    #[validate(length(min = 1, max = 100))]
    pub cron_expression: Option<String>,
    pub recipients: Option<Vec<String>>,
    pub format: Option<ReportFormat>,
}

/// Enable / disable payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ToggleScheduleDto {
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportRunStatus {
    Completed,
    Failed,
}

/// One execution of a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRunDto {
    pub id: i64,
    pub schedule_id: i64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub status: ReportRunStatus,
    pub row_count: usize,
    pub file_name: Option<String>,
    pub error: Option<String>,
}
