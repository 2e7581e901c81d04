//! Expense Models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Expense claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

/// Expense category with its compliance limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategoryDto {
    pub id: i64,
    pub name: String,
    /// Per-claim ceiling, if any
    pub max_amount: Option<Decimal>,
    /// Claims above this amount must carry a receipt
    pub receipt_required_above: Option<Decimal>,
}

/// Expense claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDto {
    pub id: i64,
    pub employee_id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub amount: Decimal,
    pub currency: String,
    pub expense_date: NaiveDate,
    pub description: String,
    pub department: Option<String>,
    pub receipt_url: Option<String>,
    pub status: ExpenseStatus,
    pub reviewed_by: Option<String>,
    pub review_comment: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub fn default_currency() -> String {
    "USD".to_string()
}

/// Create expense payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseDto {
    #[validate(range(min = 1, message = "Category ID must be positive"))]
    pub category_id: i64,
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    #[validate(length(equal = 3, message = "Currency must be a 3-letter ISO code"))]
    pub currency: String,
    pub expense_date: NaiveDate,
    #[validate(length(min = 1, max = 500, message = "Description is required (max 500 chars)"))]
    pub description: String,
    #[validate(length(max = 100))]
    pub department: Option<String>,
    #[validate(url)]
    pub receipt_url: Option<String>,
}

/// Update expense payload (drafts only)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseDto {
    #[validate(range(min = 1))]
    pub category_id: Option<i64>,
    pub amount: Option<Decimal>,
    #[validate(length(equal = 3))]
    pub currency: Option<String>,
    pub expense_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,
    #[validate(length(max = 100))]
    pub department: Option<String>,
    #[validate(url)]
    pub receipt_url: Option<String>,
}

/// Approve / reject payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDecisionDto {
    #[validate(length(max = 500))]
    pub comment: Option<String>,
}

/// Expense list filter; `from`/`to` bound the expense date (inclusive)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseQuery {
    pub status: Option<ExpenseStatus>,
    pub employee_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Result of a policy compliance check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseValidationResultDto {
    pub is_valid: bool,
    /// Blocking policy violations
    pub violations: Vec<String>,
    /// Non-blocking remarks
    pub warnings: Vec<String>,
}
