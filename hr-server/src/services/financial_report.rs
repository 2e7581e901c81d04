//! Financial reporting port

use async_trait::async_trait;
use shared::models::{
    DepartmentCostReportDto, ExpenseSummaryDto, ExportReportQuery, ReportExportDto,
    ReportPeriodQuery,
};

use super::ServiceResult;

#[async_trait]
pub trait FinancialReportingService: Send + Sync {
    async fn expense_summary(&self, period: ReportPeriodQuery) -> ServiceResult<ExpenseSummaryDto>;

    async fn department_costs(
        &self,
        period: ReportPeriodQuery,
    ) -> ServiceResult<DepartmentCostReportDto>;

    /// Render a report as CSV
    async fn export_report(&self, query: ExportReportQuery) -> ServiceResult<ReportExportDto>;
}
