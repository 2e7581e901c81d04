//! In-memory expense adapter
//!
//! Draft → Submitted → Approved / Rejected. Policy checks run on demand
//! (`validate_expense`) and again on submission, where violations block.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::models::{
    CreateExpenseDto, ExpenseCategoryDto, ExpenseDecisionDto, ExpenseDto, ExpenseQuery,
    ExpenseStatus, ExpenseValidationResultDto, UpdateExpenseDto,
};

use super::MemoryTable;
use crate::services::{ExpenseService, ServiceError, ServiceResult};

/// Claims older than this are flagged
const STALE_AFTER_DAYS: i64 = 90;

#[derive(Debug)]
pub struct MemoryExpenseService {
    categories: Vec<ExpenseCategoryDto>,
    expenses: MemoryTable<ExpenseDto>,
}

impl Default for MemoryExpenseService {
    fn default() -> Self {
        Self::new()
    }
}

fn category(id: i64, name: &str, max: i64, receipt_above: i64) -> ExpenseCategoryDto {
    ExpenseCategoryDto {
        id,
        name: name.to_string(),
        max_amount: Some(Decimal::new(max, 0)),
        receipt_required_above: Some(Decimal::new(receipt_above, 0)),
    }
}

/// Fields the policy looks at, shared by create and stored expenses
struct PolicyInput<'a> {
    category_id: i64,
    amount: Decimal,
    expense_date: NaiveDate,
    receipt_url: Option<&'a str>,
}

impl MemoryExpenseService {
    pub fn new() -> Self {
        Self::with_categories(vec![
            category(1, "Travel", 2000, 25),
            category(2, "Meals", 100, 25),
            category(3, "Office Supplies", 500, 50),
            category(4, "Training", 3000, 0),
        ])
    }

    pub fn with_categories(categories: Vec<ExpenseCategoryDto>) -> Self {
        Self {
            categories,
            expenses: MemoryTable::new(),
        }
    }

    fn find_category(&self, id: i64) -> Option<&ExpenseCategoryDto> {
        self.categories.iter().find(|c| c.id == id)
    }

    fn check_policy(&self, input: &PolicyInput<'_>) -> ExpenseValidationResultDto {
        let mut violations = Vec::new();
        let mut warnings = Vec::new();

        if input.amount <= Decimal::ZERO {
            violations.push("amount: must be greater than zero".to_string());
        }

        match self.find_category(input.category_id) {
            None => violations.push(format!("categoryId: unknown category {}", input.category_id)),
            Some(category) => {
                if let Some(max) = category.max_amount
                    && input.amount > max
                {
                    violations.push(format!(
                        "amount: exceeds the {} limit of {}",
                        category.name, max
                    ));
                }
                if let Some(threshold) = category.receipt_required_above
                    && input.amount > threshold
                    && input.receipt_url.is_none_or(|u| u.trim().is_empty())
                {
                    violations.push(format!(
                        "receiptUrl: a receipt is required for {} expenses above {}",
                        category.name, threshold
                    ));
                }
            }
        }

        let today = Utc::now().date_naive();
        if input.expense_date > today {
            violations.push("expenseDate: must not be in the future".to_string());
        } else if today - input.expense_date > Duration::days(STALE_AFTER_DAYS) {
            warnings.push(format!(
                "expenseDate: older than {STALE_AFTER_DAYS} days and may be rejected"
            ));
        }

        ExpenseValidationResultDto {
            is_valid: violations.is_empty(),
            violations,
            warnings,
        }
    }

    fn owned_draft(expense: &ExpenseDto, employee_id: i64, action: &str) -> ServiceResult<()> {
        if expense.employee_id != employee_id {
            return Err(ServiceError::unauthorized(format!(
                "Only the owner can {action} this expense"
            )));
        }
        if expense.status != ExpenseStatus::Draft {
            return Err(ServiceError::invalid_operation(format!(
                "Cannot {action} an expense in status {:?}; only drafts can change",
                expense.status
            )));
        }
        Ok(())
    }

    fn decide(
        &self,
        id: i64,
        reviewer: &str,
        comment: Option<String>,
        outcome: ExpenseStatus,
    ) -> ServiceResult<Option<ExpenseDto>> {
        self.expenses.update(id, |expense| {
            if expense.status != ExpenseStatus::Submitted {
                return Err(ServiceError::invalid_operation(
                    "Only submitted expenses can be reviewed",
                ));
            }
            expense.status = outcome;
            expense.reviewed_by = Some(reviewer.to_string());
            expense.review_comment = comment;
            expense.reviewed_at = Some(Utc::now());
            Ok(expense.clone())
        })
    }
}

#[async_trait]
impl ExpenseService for MemoryExpenseService {
    async fn categories(&self) -> ServiceResult<Vec<ExpenseCategoryDto>> {
        Ok(self.categories.clone())
    }

    async fn employee_expenses(&self, employee_id: i64) -> ServiceResult<Vec<ExpenseDto>> {
        Ok(self.expenses.filter(|e| e.employee_id == employee_id))
    }

    async fn list_expenses(&self, query: ExpenseQuery) -> ServiceResult<Vec<ExpenseDto>> {
        Ok(self.expenses.filter(|e| {
            query.status.is_none_or(|s| e.status == s)
                && query.employee_id.is_none_or(|id| e.employee_id == id)
                && query.from.is_none_or(|from| e.expense_date >= from)
                && query.to.is_none_or(|to| e.expense_date <= to)
        }))
    }

    async fn get_expense(&self, id: i64) -> ServiceResult<Option<ExpenseDto>> {
        Ok(self.expenses.get(id))
    }

    async fn create_expense(
        &self,
        employee_id: i64,
        dto: CreateExpenseDto,
    ) -> ServiceResult<ExpenseDto> {
        if dto.amount <= Decimal::ZERO {
            return Err(ServiceError::validation_with(
                "Invalid expense data",
                vec!["amount: must be greater than zero".into()],
            ));
        }
        let category = self.find_category(dto.category_id).ok_or_else(|| {
            ServiceError::validation(format!("Unknown expense category {}", dto.category_id))
        })?;

        Ok(self.expenses.insert_with(|id| ExpenseDto {
            id,
            employee_id,
            category_id: category.id,
            category_name: category.name.clone(),
            amount: dto.amount,
            currency: dto.currency.to_uppercase(),
            expense_date: dto.expense_date,
            description: dto.description,
            department: dto.department,
            receipt_url: dto.receipt_url,
            status: ExpenseStatus::Draft,
            reviewed_by: None,
            review_comment: None,
            submitted_at: None,
            reviewed_at: None,
            created_at: Utc::now(),
        }))
    }

    async fn update_expense(
        &self,
        id: i64,
        employee_id: i64,
        dto: UpdateExpenseDto,
    ) -> ServiceResult<Option<ExpenseDto>> {
        let category = match dto.category_id {
            Some(category_id) => Some(self.find_category(category_id).cloned().ok_or_else(
                || ServiceError::validation(format!("Unknown expense category {category_id}")),
            )?),
            None => None,
        };
        if dto.amount.is_some_and(|a| a <= Decimal::ZERO) {
            return Err(ServiceError::validation_with(
                "Invalid expense data",
                vec!["amount: must be greater than zero".into()],
            ));
        }

        self.expenses.update(id, |expense| {
            Self::owned_draft(expense, employee_id, "edit")?;
            if let Some(category) = category {
                expense.category_id = category.id;
                expense.category_name = category.name;
            }
            if let Some(amount) = dto.amount {
                expense.amount = amount;
            }
            if let Some(currency) = dto.currency {
                expense.currency = currency.to_uppercase();
            }
            if let Some(date) = dto.expense_date {
                expense.expense_date = date;
            }
            if let Some(description) = dto.description {
                expense.description = description;
            }
            if dto.department.is_some() {
                expense.department = dto.department;
            }
            if dto.receipt_url.is_some() {
                expense.receipt_url = dto.receipt_url;
            }
            Ok(expense.clone())
        })
    }

    async fn delete_expense(&self, id: i64, employee_id: i64) -> ServiceResult<bool> {
        let removed = self
            .expenses
            .remove_if(id, |expense| Self::owned_draft(expense, employee_id, "delete"))?;
        Ok(removed.is_some())
    }

    async fn submit_expense(&self, id: i64, employee_id: i64) -> ServiceResult<Option<ExpenseDto>> {
        self.expenses.update(id, |expense| {
            Self::owned_draft(expense, employee_id, "submit")?;
            let result = self.check_policy(&PolicyInput {
                category_id: expense.category_id,
                amount: expense.amount,
                expense_date: expense.expense_date,
                receipt_url: expense.receipt_url.as_deref(),
            });
            if !result.is_valid {
                return Err(ServiceError::validation_with(
                    "Expense violates the expense policy",
                    result.violations,
                ));
            }
            expense.status = ExpenseStatus::Submitted;
            expense.submitted_at = Some(Utc::now());
            Ok(expense.clone())
        })
    }

    async fn approve_expense(
        &self,
        id: i64,
        reviewer: &str,
        dto: ExpenseDecisionDto,
    ) -> ServiceResult<Option<ExpenseDto>> {
        self.decide(id, reviewer, dto.comment, ExpenseStatus::Approved)
    }

    async fn reject_expense(
        &self,
        id: i64,
        reviewer: &str,
        dto: ExpenseDecisionDto,
    ) -> ServiceResult<Option<ExpenseDto>> {
        self.decide(id, reviewer, dto.comment, ExpenseStatus::Rejected)
    }

    async fn validate_expense(
        &self,
        dto: CreateExpenseDto,
    ) -> ServiceResult<ExpenseValidationResultDto> {
        Ok(self.check_policy(&PolicyInput {
            category_id: dto.category_id,
            amount: dto.amount,
            expense_date: dto.expense_date,
            receipt_url: dto.receipt_url.as_deref(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(amount: i64, receipt: Option<&str>) -> CreateExpenseDto {
        CreateExpenseDto {
            category_id: 2,
            amount: Decimal::new(amount, 0),
            currency: "usd".into(),
            expense_date: Utc::now().date_naive(),
            description: "Team lunch".into(),
            department: Some("Engineering".into()),
            receipt_url: receipt.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_policy_flags_limit_and_missing_receipt() {
        let service = MemoryExpenseService::new();
        let result = service.validate_expense(meal(150, None)).await.unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.violations.len(), 2);

        let ok = service
            .validate_expense(meal(20, None))
            .await
            .unwrap();
        assert!(ok.is_valid);
        assert!(ok.violations.is_empty());
    }

    #[tokio::test]
    async fn test_old_expense_only_warns() {
        let service = MemoryExpenseService::new();
        let mut dto = meal(20, None);
        dto.expense_date = Utc::now().date_naive() - Duration::days(120);
        let result = service.validate_expense(dto).await.unwrap();
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_lifecycle_draft_submit_approve() {
        let service = MemoryExpenseService::new();
        let expense = service.create_expense(3, meal(20, None)).await.unwrap();
        assert_eq!(expense.status, ExpenseStatus::Draft);
        assert_eq!(expense.currency, "USD");
        assert_eq!(expense.category_name, "Meals");

        // Cannot approve a draft
        let err = service
            .approve_expense(expense.id, "mgr", ExpenseDecisionDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOperation(_)));

        let submitted = service.submit_expense(expense.id, 3).await.unwrap().unwrap();
        assert_eq!(submitted.status, ExpenseStatus::Submitted);
        assert!(submitted.submitted_at.is_some());

        // Submitted expenses are locked for the owner
        let err = service
            .update_expense(expense.id, 3, UpdateExpenseDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOperation(_)));

        let approved = service
            .approve_expense(expense.id, "mgr", ExpenseDecisionDto { comment: Some("ok".into()) })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.status, ExpenseStatus::Approved);
        assert_eq!(approved.reviewed_by.as_deref(), Some("mgr"));
    }

    #[tokio::test]
    async fn test_submit_blocks_policy_violations() {
        let service = MemoryExpenseService::new();
        let expense = service.create_expense(3, meal(80, None)).await.unwrap();
        let err = service.submit_expense(expense.id, 3).await.unwrap_err();
        match err {
            ServiceError::Validation { errors, .. } => assert_eq!(errors.len(), 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_only_owner_can_edit_or_delete() {
        let service = MemoryExpenseService::new();
        let expense = service.create_expense(3, meal(20, None)).await.unwrap();

        let err = service.delete_expense(expense.id, 4).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));

        assert!(service.delete_expense(expense.id, 3).await.unwrap());
        assert!(!service.delete_expense(expense.id, 3).await.unwrap());
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let service = MemoryExpenseService::new();
        let err = service.create_expense(3, meal(0, None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }
}
