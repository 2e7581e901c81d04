//! Financial Reports API Handlers

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use http::header;
use shared::models::{
    DepartmentCostReportDto, ExpenseSummaryDto, ExportReportQuery, ReportPeriodQuery,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::extract::ApiQuery;
use crate::utils::response::success;
use crate::utils::{ApiResponse, AppResult};

/// GET /api/FinancialReports/expense-summary?from&to
pub async fn expense_summary(
    State(state): State<ServerState>,
    ApiQuery(period): ApiQuery<ReportPeriodQuery>,
) -> AppResult<Json<ApiResponse<ExpenseSummaryDto>>> {
    Ok(success(state.financial_reports.expense_summary(period).await?))
}

/// GET /api/FinancialReports/department-costs?from&to
pub async fn department_costs(
    State(state): State<ServerState>,
    ApiQuery(period): ApiQuery<ReportPeriodQuery>,
) -> AppResult<Json<ApiResponse<DepartmentCostReportDto>>> {
    Ok(success(state.financial_reports.department_costs(period).await?))
}

/// GET /api/FinancialReports/export?reportType&from&to - CSV attachment
pub async fn export(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiQuery(query): ApiQuery<ExportReportQuery>,
) -> AppResult<Response> {
    let report = state.financial_reports.export_report(query).await?;
    tracing::info!(
        user_id = %current_user.log_id(),
        file_name = %report.file_name,
        rows = report.row_count,
        "Exported financial report"
    );

    let disposition = format!("attachment; filename=\"{}\"", report.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, report.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.content,
    )
        .into_response())
}
