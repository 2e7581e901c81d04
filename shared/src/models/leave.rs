//! Leave Management Models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Leave type (annual, sick, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveTypeDto {
    pub id: i64,
    pub name: String,
    /// Entitlement granted at the start of each year
    pub default_days_per_year: i32,
    pub is_paid: bool,
}

/// Per-employee, per-type, per-year balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalanceDto {
    pub employee_id: i64,
    pub leave_type_id: i64,
    pub leave_type_name: String,
    pub year: i32,
    pub entitled_days: i32,
    pub used_days: i32,
    /// Days held by requests still awaiting a decision
    pub pending_days: i32,
    pub remaining_days: i32,
}

/// Leave request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveRequestStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

/// Leave request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestDto {
    pub id: i64,
    pub employee_id: i64,
    pub leave_type_id: i64,
    pub leave_type_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Inclusive calendar days
    pub days: i32,
    pub reason: Option<String>,
    pub status: LeaveRequestStatus,
    pub reviewed_by: Option<String>,
    pub review_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Submit leave request payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequestDto {
    #[validate(range(min = 1, message = "Leave type ID must be positive"))]
    pub leave_type_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

/// Approve / reject payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDecisionDto {
    #[validate(length(max = 500))]
    pub comment: Option<String>,
}

/// Leave request list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestQuery {
    pub status: Option<LeaveRequestStatus>,
    pub employee_id: Option<i64>,
}

/// Balance year selector (defaults to the current year)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalanceQuery {
    pub year: Option<i32>,
}
