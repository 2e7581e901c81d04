//! Setup Wizard Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Wizard steps, in the order they must be completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SetupStep {
    Company,
    Admin,
    Defaults,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStatusDto {
    pub is_complete: bool,
    pub completed_steps: Vec<SetupStep>,
    pub next_step: Option<SetupStep>,
    pub company_name: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Company profile step
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanySetupDto {
    #[validate(length(min = 1, max = 200, message = "Company name is required (max 200 chars)"))]
    pub company_name: String,
    #[validate(length(max = 100))]
    pub industry: Option<String>,
    #[validate(length(min = 1, max = 64, message = "Time zone is required"))]
    pub time_zone: String,
    #[validate(length(equal = 3, message = "Currency must be a 3-letter ISO code"))]
    pub currency: String,
}

/// First administrator step
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminSetupDto {
    #[validate(length(min = 1, max = 200, message = "Full name is required (max 200 chars)"))]
    pub full_name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Created administrator; the token is attached by the API layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupAdminResultDto {
    pub user_id: String,
    pub employee_id: i64,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub token: Option<String>,
}

/// Organisation defaults step
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DefaultsSetupDto {
    #[validate(length(min = 1, message = "At least one department is required"))]
    pub departments: Vec<String>,
    #[validate(range(min = 1, max = 7))]
    pub working_days_per_week: u8,
    #[validate(range(min = 0, max = 365))]
    pub default_annual_leave_days: i32,
}
