//! Report scheduling port

use async_trait::async_trait;
use shared::models::{
    CreateReportScheduleDto, ReportRunDto, ReportScheduleDto, UpdateReportScheduleDto,
};

use super::ServiceResult;

#[async_trait]
pub trait ReportSchedulingService: Send + Sync {
    async fn list_schedules(&self) -> ServiceResult<Vec<ReportScheduleDto>>;

    async fn get_schedule(&self, id: i64) -> ServiceResult<Option<ReportScheduleDto>>;

    async fn create_schedule(
        &self,
        dto: CreateReportScheduleDto,
        created_by: &str,
    ) -> ServiceResult<ReportScheduleDto>;

    async fn update_schedule(
        &self,
        id: i64,
        dto: UpdateReportScheduleDto,
    ) -> ServiceResult<Option<ReportScheduleDto>>;

    async fn delete_schedule(&self, id: i64) -> ServiceResult<bool>;

    async fn toggle_schedule(
        &self,
        id: i64,
        is_active: bool,
    ) -> ServiceResult<Option<ReportScheduleDto>>;

    /// Generate the report immediately and record the run
    async fn run_now(&self, id: i64) -> ServiceResult<Option<ReportRunDto>>;

    /// Newest first
    async fn runs(&self, schedule_id: i64) -> ServiceResult<Option<Vec<ReportRunDto>>>;
}
