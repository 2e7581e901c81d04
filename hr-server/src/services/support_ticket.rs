//! Support ticket port

use async_trait::async_trait;
use shared::models::{
    AddTicketCommentDto, CreateSupportTicketDto, SupportTicketDto, SupportTicketQuery,
    TicketCommentDto, UpdateTicketStatusDto,
};

use super::ServiceResult;

#[async_trait]
pub trait SupportTicketService: Send + Sync {
    async fn create_ticket(
        &self,
        employee_id: i64,
        dto: CreateSupportTicketDto,
    ) -> ServiceResult<SupportTicketDto>;

    async fn employee_tickets(&self, employee_id: i64) -> ServiceResult<Vec<SupportTicketDto>>;

    async fn list_tickets(&self, query: SupportTicketQuery) -> ServiceResult<Vec<SupportTicketDto>>;

    async fn get_ticket(&self, id: i64) -> ServiceResult<Option<SupportTicketDto>>;

    async fn update_status(
        &self,
        id: i64,
        dto: UpdateTicketStatusDto,
    ) -> ServiceResult<Option<SupportTicketDto>>;

    async fn assign_ticket(
        &self,
        id: i64,
        assignee_employee_id: i64,
    ) -> ServiceResult<Option<SupportTicketDto>>;

    async fn add_comment(
        &self,
        ticket_id: i64,
        author_employee_id: i64,
        dto: AddTicketCommentDto,
    ) -> ServiceResult<Option<TicketCommentDto>>;

    /// Oldest first; internal notes only when `include_internal`
    async fn comments(
        &self,
        ticket_id: i64,
        include_internal: bool,
    ) -> ServiceResult<Option<Vec<TicketCommentDto>>>;
}
