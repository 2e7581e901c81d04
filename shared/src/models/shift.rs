//! Shift Models (scheduling, swaps and coverage)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Scheduled shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDto {
    pub id: i64,
    pub title: String,
    /// Unassigned shifts have no employee
    pub employee_id: Option<i64>,
    pub department: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create shift payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateShiftDto {
    #[validate(length(min = 1, max = 100, message = "Title is required (max 100 chars)"))]
    pub title: String,
    #[validate(range(min = 1))]
    pub employee_id: Option<i64>,
    #[validate(length(max = 100))]
    pub department: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Update shift payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShiftDto {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(length(max = 100))]
    pub department: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Assign shift payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignShiftDto {
    #[validate(range(min = 1, message = "Employee ID must be positive"))]
    pub employee_id: i64,
}

/// Shift list filter; `from`/`to` bound the shift start time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub employee_id: Option<i64>,
}

/// Swap request status
///
/// Pending → Accepted (by target) → Approved / Rejected (by manager);
/// Pending → Declined (by target); Pending | Accepted → Cancelled (by requester)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftSwapStatus {
    Pending,
    Accepted,
    Declined,
    Approved,
    Rejected,
    Cancelled,
}

/// Shift swap request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftSwapRequestDto {
    pub id: i64,
    pub requester_id: i64,
    pub requester_shift_id: i64,
    pub target_employee_id: i64,
    /// Shift offered in exchange; a pure give-away when absent
    pub target_shift_id: Option<i64>,
    pub reason: Option<String>,
    pub status: ShiftSwapStatus,
    pub manager_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create swap request payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateShiftSwapRequestDto {
    #[validate(range(min = 1))]
    pub requester_shift_id: i64,
    #[validate(range(min = 1))]
    pub target_employee_id: i64,
    #[validate(range(min = 1))]
    pub target_shift_id: Option<i64>,
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

/// Target employee's answer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RespondShiftSwapDto {
    pub accept: bool,
}

/// Manager decision payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShiftSwapDecisionDto {
    #[validate(length(max = 500))]
    pub comment: Option<String>,
}

/// Swap list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftSwapQuery {
    pub status: Option<ShiftSwapStatus>,
}

/// Coverage request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageStatus {
    Open,
    Claimed,
    Approved,
    Cancelled,
}

/// Request for a colleague to cover a shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRequestDto {
    pub id: i64,
    pub shift_id: i64,
    pub requested_by: i64,
    pub covered_by: Option<i64>,
    pub reason: Option<String>,
    pub status: CoverageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create coverage request payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoverageRequestDto {
    #[validate(range(min = 1))]
    pub shift_id: i64,
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}
