//! Financial reports computed over the expense port

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{
    CategoryTotalDto, DepartmentCostDto, DepartmentCostReportDto, ExpenseDto, ExpenseQuery,
    ExpenseStatus, ExpenseSummaryDto, ExportReportQuery, ReportExportDto, ReportPeriodQuery,
    ReportType,
};

use crate::services::{ExpenseService, FinancialReportingService, ServiceError, ServiceResult};

const UNASSIGNED_DEPARTMENT: &str = "Unassigned";

pub struct MemoryFinancialReportingService {
    expenses: Arc<dyn ExpenseService>,
}

impl MemoryFinancialReportingService {
    pub fn new(expenses: Arc<dyn ExpenseService>) -> Self {
        Self { expenses }
    }

    /// Expenses in the period that have left the draft stage
    async fn reportable(&self, period: ReportPeriodQuery) -> ServiceResult<Vec<ExpenseDto>> {
        if let (Some(from), Some(to)) = (period.from, period.to)
            && from > to
        {
            return Err(ServiceError::validation_with(
                "Invalid reporting period",
                vec!["from: must not be after to".into()],
            ));
        }
        let expenses = self
            .expenses
            .list_expenses(ExpenseQuery {
                from: period.from,
                to: period.to,
                ..Default::default()
            })
            .await?;
        Ok(expenses
            .into_iter()
            .filter(|e| e.status != ExpenseStatus::Draft)
            .collect())
    }
}

/// Quote a CSV field when it contains a delimiter, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn summarize(period: ReportPeriodQuery, expenses: &[ExpenseDto]) -> ExpenseSummaryDto {
    let mut approved = Decimal::ZERO;
    let mut pending = Decimal::ZERO;
    let mut rejected = Decimal::ZERO;
    let mut by_category: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();

    for expense in expenses {
        match expense.status {
            ExpenseStatus::Approved => approved += expense.amount,
            ExpenseStatus::Submitted => pending += expense.amount,
            ExpenseStatus::Rejected => rejected += expense.amount,
            ExpenseStatus::Draft => continue,
        }
        if expense.status != ExpenseStatus::Rejected {
            let entry = by_category
                .entry(expense.category_name.clone())
                .or_insert((Decimal::ZERO, 0));
            entry.0 += expense.amount;
            entry.1 += 1;
        }
    }

    ExpenseSummaryDto {
        period_start: period.from,
        period_end: period.to,
        expense_count: expenses.len(),
        total_amount: approved + pending + rejected,
        approved_amount: approved,
        pending_amount: pending,
        rejected_amount: rejected,
        by_category: by_category
            .into_iter()
            .map(|(category, (total_amount, count))| CategoryTotalDto {
                category,
                total_amount,
                count,
            })
            .collect(),
    }
}

fn department_report(period: ReportPeriodQuery, expenses: &[ExpenseDto]) -> DepartmentCostReportDto {
    #[derive(Default)]
    struct Acc {
        approved: Decimal,
        pending: Decimal,
        count: usize,
        employees: BTreeSet<i64>,
    }

    let mut departments: BTreeMap<String, Acc> = BTreeMap::new();
    for expense in expenses {
        let name = expense
            .department
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(UNASSIGNED_DEPARTMENT)
            .to_string();
        let acc = departments.entry(name).or_default();
        match expense.status {
            ExpenseStatus::Approved => acc.approved += expense.amount,
            ExpenseStatus::Submitted => acc.pending += expense.amount,
            ExpenseStatus::Rejected | ExpenseStatus::Draft => continue,
        }
        acc.count += 1;
        acc.employees.insert(expense.employee_id);
    }

    let mut rows: Vec<DepartmentCostDto> = departments
        .into_iter()
        .filter(|(_, acc)| acc.count > 0)
        .map(|(department, acc)| DepartmentCostDto {
            department,
            approved_amount: acc.approved,
            pending_amount: acc.pending,
            expense_count: acc.count,
            employee_count: acc.employees.len(),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.approved_amount
            .cmp(&a.approved_amount)
            .then_with(|| a.department.cmp(&b.department))
    });

    DepartmentCostReportDto {
        period_start: period.from,
        period_end: period.to,
        total_approved: rows.iter().map(|r| r.approved_amount).sum(),
        departments: rows,
    }
}

fn file_name(report_type: ReportType, period: ReportPeriodQuery) -> String {
    let bound = |d: Option<chrono::NaiveDate>| d.map_or_else(|| "all".to_string(), |d| d.to_string());
    format!(
        "{}_{}_{}.csv",
        report_type.slug(),
        bound(period.from),
        bound(period.to)
    )
}

#[async_trait]
impl FinancialReportingService for MemoryFinancialReportingService {
    async fn expense_summary(&self, period: ReportPeriodQuery) -> ServiceResult<ExpenseSummaryDto> {
        let expenses = self.reportable(period).await?;
        Ok(summarize(period, &expenses))
    }

    async fn department_costs(
        &self,
        period: ReportPeriodQuery,
    ) -> ServiceResult<DepartmentCostReportDto> {
        let expenses = self.reportable(period).await?;
        Ok(department_report(period, &expenses))
    }

    async fn export_report(&self, query: ExportReportQuery) -> ServiceResult<ReportExportDto> {
        let period = query.period();
        let expenses = self.reportable(period).await?;

        let mut lines = Vec::new();
        let row_count = match query.report_type {
            ReportType::ExpenseSummary => {
                let summary = summarize(period, &expenses);
                lines.push(csv_line(&["Category".into(), "Total Amount".into(), "Count".into()]));
                for row in &summary.by_category {
                    lines.push(csv_line(&[
                        row.category.clone(),
                        row.total_amount.to_string(),
                        row.count.to_string(),
                    ]));
                }
                summary.by_category.len()
            }
            ReportType::DepartmentCosts => {
                let report = department_report(period, &expenses);
                lines.push(csv_line(&[
                    "Department".into(),
                    "Approved Amount".into(),
                    "Pending Amount".into(),
                    "Expense Count".into(),
                    "Employee Count".into(),
                ]));
                for row in &report.departments {
                    lines.push(csv_line(&[
                        row.department.clone(),
                        row.approved_amount.to_string(),
                        row.pending_amount.to_string(),
                        row.expense_count.to_string(),
                        row.employee_count.to_string(),
                    ]));
                }
                report.departments.len()
            }
        };

        let mut content = lines.join("\r\n");
        content.push_str("\r\n");

        Ok(ReportExportDto {
            file_name: file_name(query.report_type, period),
            content_type: "text/csv".to_string(),
            content,
            row_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory::MemoryExpenseService;
    use chrono::{Duration, Utc};
    use shared::models::{CreateExpenseDto, ExpenseDecisionDto};

    async fn seeded() -> (Arc<MemoryExpenseService>, MemoryFinancialReportingService) {
        let expenses = Arc::new(MemoryExpenseService::new());
        let today = Utc::now().date_naive();
        let rows = [
            (1, 1, 500, "Sales", true),
            (2, 1, 300, "Sales", false),
            (3, 2, 40, "Engineering", true),
            (4, 3, 100, "Engineering", true),
        ];
        for (employee_id, category_id, amount, department, approve) in rows {
            let created = expenses
                .create_expense(
                    employee_id,
                    CreateExpenseDto {
                        category_id,
                        amount: Decimal::new(amount, 0),
                        currency: "USD".into(),
                        expense_date: today - Duration::days(1),
                        description: "Client visit, \"Q3\"".into(),
                        department: Some(department.into()),
                        receipt_url: Some("https://files.example.com/r.pdf".into()),
                    },
                )
                .await
                .unwrap();
            expenses.submit_expense(created.id, employee_id).await.unwrap();
            if approve {
                expenses
                    .approve_expense(created.id, "cfo", ExpenseDecisionDto::default())
                    .await
                    .unwrap();
            }
        }
        // A draft never shows up in reports
        expenses
            .create_expense(
                9,
                CreateExpenseDto {
                    category_id: 2,
                    amount: Decimal::new(10, 0),
                    currency: "USD".into(),
                    expense_date: today,
                    description: "Coffee".into(),
                    department: None,
                    receipt_url: None,
                },
            )
            .await
            .unwrap();

        let reports = MemoryFinancialReportingService::new(expenses.clone());
        (expenses, reports)
    }

    #[tokio::test]
    async fn test_expense_summary_totals() {
        let (_, reports) = seeded().await;
        let summary = reports.expense_summary(ReportPeriodQuery::default()).await.unwrap();
        assert_eq!(summary.expense_count, 4);
        assert_eq!(summary.approved_amount, Decimal::new(640, 0));
        assert_eq!(summary.pending_amount, Decimal::new(300, 0));
        assert_eq!(summary.total_amount, Decimal::new(940, 0));
        assert_eq!(summary.by_category.len(), 3);
    }

    #[tokio::test]
    async fn test_department_costs_sorted_by_approved() {
        let (_, reports) = seeded().await;
        let report = reports.department_costs(ReportPeriodQuery::default()).await.unwrap();
        assert_eq!(report.departments[0].department, "Sales");
        assert_eq!(report.departments[0].pending_amount, Decimal::new(300, 0));
        assert_eq!(report.departments[1].employee_count, 2);
        assert_eq!(report.total_approved, Decimal::new(640, 0));
    }

    #[tokio::test]
    async fn test_inverted_period_is_validation_error() {
        let (_, reports) = seeded().await;
        let today = Utc::now().date_naive();
        let err = reports
            .expense_summary(ReportPeriodQuery {
                from: Some(today),
                to: Some(today - Duration::days(3)),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_export_csv() {
        let (_, reports) = seeded().await;
        let export = reports
            .export_report(ExportReportQuery {
                report_type: ReportType::DepartmentCosts,
                from: None,
                to: None,
            })
            .await
            .unwrap();
        assert_eq!(export.file_name, "department-costs_all_all.csv");
        assert_eq!(export.content_type, "text/csv");
        assert_eq!(export.row_count, 2);
        assert!(export.content.starts_with("Department,Approved Amount"));
        assert_eq!(export.content.lines().count(), 3);
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
