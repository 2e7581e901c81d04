//! Financial Reporting Models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reports the financial service can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportType {
    ExpenseSummary,
    DepartmentCosts,
}

impl ReportType {
    /// File-name friendly slug
    pub fn slug(&self) -> &'static str {
        match self {
            ReportType::ExpenseSummary => "expense-summary",
            ReportType::DepartmentCosts => "department-costs",
        }
    }
}

/// Inclusive reporting period; open-ended when a bound is absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriodQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotalDto {
    pub category: String,
    pub total_amount: Decimal,
    pub count: usize,
}

/// Expense totals for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummaryDto {
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub expense_count: usize,
    pub total_amount: Decimal,
    pub approved_amount: Decimal,
    pub pending_amount: Decimal,
    pub rejected_amount: Decimal,
    pub by_category: Vec<CategoryTotalDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCostDto {
    pub department: String,
    pub approved_amount: Decimal,
    pub pending_amount: Decimal,
    pub expense_count: usize,
    pub employee_count: usize,
}

/// Expense cost per department for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCostReportDto {
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub total_approved: Decimal,
    pub departments: Vec<DepartmentCostDto>,
}

/// Export request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReportQuery {
    pub report_type: ReportType,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ExportReportQuery {
    pub fn period(&self) -> ReportPeriodQuery {
        ReportPeriodQuery {
            from: self.from,
            to: self.to,
        }
    }
}

/// Rendered report file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportExportDto {
    pub file_name: String,
    pub content_type: String,
    pub content: String,
    pub row_count: usize,
}
