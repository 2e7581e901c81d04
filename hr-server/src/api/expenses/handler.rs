//! Expense API Handlers

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use shared::models::{
    CreateExpenseDto, ExpenseCategoryDto, ExpenseDecisionDto, ExpenseDto, ExpenseQuery,
    ExpenseValidationResultDto, UpdateExpenseDto,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::utils::response::{
    created, found, not_found_error, success, success_message, success_with_message,
};
use crate::utils::{ApiResponse, AppResult};

const EXPENSES_READ_ALL: &str = "expenses:read_all";

type ExpenseResponse = AppResult<Json<ApiResponse<ExpenseDto>>>;

/// GET /api/Expense/categories
pub async fn categories(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<ExpenseCategoryDto>>>> {
    Ok(success(state.expenses.categories().await?))
}

/// GET /api/Expense/my
pub async fn my_expenses(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<ExpenseDto>>>> {
    let employee_id = current_user.employee_id()?;
    Ok(success(state.expenses.employee_expenses(employee_id).await?))
}

/// GET /api/Expense?status&employeeId&from&to
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<ExpenseQuery>,
) -> AppResult<Json<ApiResponse<Vec<ExpenseDto>>>> {
    Ok(success(state.expenses.list_expenses(query).await?))
}

/// GET /api/Expense/{id} - Owner or `expenses:read_all`
pub async fn get_by_id(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ExpenseResponse {
    let expense = found(state.expenses.get_expense(id).await?, "Expense", id)?;
    current_user.can_access_owned(expense.employee_id, EXPENSES_READ_ALL)?;
    Ok(success(expense))
}

/// POST /api/Expense - Create a draft
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateExpenseDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<ExpenseDto>>)> {
    let employee_id = current_user.employee_id()?;
    tracing::info!(
        employee_id,
        category_id = payload.category_id,
        amount = %payload.amount,
        "Creating expense"
    );
    let expense = state.expenses.create_expense(employee_id, payload).await?;
    Ok(created(expense, "Expense created successfully"))
}

/// PUT /api/Expense/{id} - Owner's draft only
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateExpenseDto>,
) -> ExpenseResponse {
    let employee_id = current_user.employee_id()?;
    tracing::info!(employee_id, expense_id = id, "Updating expense");
    let expense = found(
        state.expenses.update_expense(id, employee_id, payload).await?,
        "Expense",
        id,
    )?;
    Ok(success(expense))
}

/// DELETE /api/Expense/{id} - Owner's draft only
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    let employee_id = current_user.employee_id()?;
    tracing::info!(employee_id, expense_id = id, "Deleting expense");
    if !state.expenses.delete_expense(id, employee_id).await? {
        return Err(not_found_error(format!("Expense with ID {id} not found"), Vec::new()));
    }
    Ok(success_message("Expense deleted successfully"))
}

/// POST /api/Expense/{id}/submit
pub async fn submit(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ExpenseResponse {
    let employee_id = current_user.employee_id()?;
    tracing::info!(employee_id, expense_id = id, "Submitting expense");
    let expense = found(
        state.expenses.submit_expense(id, employee_id).await?,
        "Expense",
        id,
    )?;
    Ok(success_with_message(expense, "Expense submitted for approval"))
}

/// POST /api/Expense/{id}/approve
pub async fn approve(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<ExpenseDecisionDto>,
) -> ExpenseResponse {
    let reviewer = current_user.user_id()?;
    tracing::info!(user_id = %reviewer, expense_id = id, "Approving expense");
    let expense = found(
        state.expenses.approve_expense(id, reviewer, payload).await?,
        "Expense",
        id,
    )?;
    Ok(success_with_message(expense, "Expense approved"))
}

/// POST /api/Expense/{id}/reject
pub async fn reject(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<ExpenseDecisionDto>,
) -> ExpenseResponse {
    let reviewer = current_user.user_id()?;
    tracing::info!(user_id = %reviewer, expense_id = id, "Rejecting expense");
    let expense = found(
        state.expenses.reject_expense(id, reviewer, payload).await?,
        "Expense",
        id,
    )?;
    Ok(success_with_message(expense, "Expense rejected"))
}

/// POST /api/Expense/validate - Policy check without saving
pub async fn validate(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<CreateExpenseDto>,
) -> AppResult<Json<ApiResponse<ExpenseValidationResultDto>>> {
    Ok(success(state.expenses.validate_expense(payload).await?))
}
