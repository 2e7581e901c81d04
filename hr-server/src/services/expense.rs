//! Expense claims port

use async_trait::async_trait;
use shared::models::{
    CreateExpenseDto, ExpenseCategoryDto, ExpenseDecisionDto, ExpenseDto, ExpenseQuery,
    ExpenseValidationResultDto, UpdateExpenseDto,
};

use super::ServiceResult;

#[async_trait]
pub trait ExpenseService: Send + Sync {
    async fn categories(&self) -> ServiceResult<Vec<ExpenseCategoryDto>>;

    async fn employee_expenses(&self, employee_id: i64) -> ServiceResult<Vec<ExpenseDto>>;

    async fn list_expenses(&self, query: ExpenseQuery) -> ServiceResult<Vec<ExpenseDto>>;

    async fn get_expense(&self, id: i64) -> ServiceResult<Option<ExpenseDto>>;

    async fn create_expense(
        &self,
        employee_id: i64,
        dto: CreateExpenseDto,
    ) -> ServiceResult<ExpenseDto>;

    /// Owner only, drafts only
    async fn update_expense(
        &self,
        id: i64,
        employee_id: i64,
        dto: UpdateExpenseDto,
    ) -> ServiceResult<Option<ExpenseDto>>;

    /// Owner only, drafts only; `false` when the expense does not exist
    async fn delete_expense(&self, id: i64, employee_id: i64) -> ServiceResult<bool>;

    async fn submit_expense(&self, id: i64, employee_id: i64) -> ServiceResult<Option<ExpenseDto>>;

    async fn approve_expense(
        &self,
        id: i64,
        reviewer: &str,
        dto: ExpenseDecisionDto,
    ) -> ServiceResult<Option<ExpenseDto>>;

    async fn reject_expense(
        &self,
        id: i64,
        reviewer: &str,
        dto: ExpenseDecisionDto,
    ) -> ServiceResult<Option<ExpenseDto>>;

    /// Policy compliance check without persisting anything
    async fn validate_expense(&self, dto: CreateExpenseDto)
    -> ServiceResult<ExpenseValidationResultDto>;
}
