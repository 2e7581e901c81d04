//! Asset Models (tracking and assignment)

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Asset lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssetStatus {
    #[default]
    Available,
    Assigned,
    UnderMaintenance,
    Retired,
}

/// Asset entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDto {
    pub id: i64,
    pub asset_tag: String,
    pub name: String,
    pub category: String,
    pub serial_number: Option<String>,
    pub status: AssetStatus,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_cost: Option<Decimal>,
    pub location: Option<String>,
    pub notes: Option<String>,
    /// Employee currently holding the asset, if assigned
    pub current_employee_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create asset payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetDto {
    #[validate(length(min = 1, max = 50, message = "Asset tag is required (max 50 chars)"))]
    pub asset_tag: String,
    #[validate(length(min = 1, max = 200, message = "Name is required (max 200 chars)"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Category is required (max 100 chars)"))]
    pub category: String,
    #[validate(length(max = 100))]
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_cost: Option<Decimal>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Update asset payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[validate(length(max = 100))]
    pub serial_number: Option<String>,
    pub status: Option<AssetStatus>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_cost: Option<Decimal>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Asset list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetQuery {
    pub category: Option<String>,
    pub status: Option<AssetStatus>,
    /// Case-insensitive match against name, tag and serial number
    pub search: Option<String>,
}

/// Asset assignment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAssignmentDto {
    pub id: i64,
    pub asset_id: i64,
    pub asset_tag: String,
    pub asset_name: String,
    pub employee_id: i64,
    /// User id of the operator who made the assignment
    pub assigned_by: String,
    pub assigned_at: DateTime<Utc>,
    pub expected_return_date: Option<NaiveDate>,
    pub returned_at: Option<DateTime<Utc>>,
    pub condition_on_assignment: Option<String>,
    pub condition_on_return: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
}

/// Assign asset to employee payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetAssignmentDto {
    #[validate(range(min = 1, message = "Asset ID must be positive"))]
    pub asset_id: i64,
    #[validate(range(min = 1, message = "Employee ID must be positive"))]
    pub employee_id: i64,
    pub expected_return_date: Option<NaiveDate>,
    #[validate(length(max = 200))]
    pub condition: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Return asset payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReturnAssetDto {
    #[validate(length(max = 200))]
    pub condition: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}
