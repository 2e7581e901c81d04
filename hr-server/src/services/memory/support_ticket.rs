//! In-memory support ticket adapter

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{
    AddTicketCommentDto, CreateSupportTicketDto, SupportTicketDto, SupportTicketQuery,
    TicketCommentDto, TicketStatus, UpdateTicketStatusDto,
};

use super::MemoryTable;
use crate::services::{ServiceError, ServiceResult, SupportTicketService};

#[derive(Debug, Default)]
pub struct MemorySupportTicketService {
    tickets: MemoryTable<SupportTicketDto>,
    comments: MemoryTable<TicketCommentDto>,
}

/// Allowed status moves; `Closed` is terminal
fn can_transition(from: TicketStatus, to: TicketStatus) -> bool {
    use TicketStatus::*;
    matches!(
        (from, to),
        (Open, InProgress)
            | (Open, Resolved)
            | (Open, Closed)
            | (InProgress, Open)
            | (InProgress, Resolved)
            | (InProgress, Closed)
            | (Resolved, InProgress)
            | (Resolved, Closed)
    )
}

impl MemorySupportTicketService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SupportTicketService for MemorySupportTicketService {
    async fn create_ticket(
        &self,
        employee_id: i64,
        dto: CreateSupportTicketDto,
    ) -> ServiceResult<SupportTicketDto> {
        let now = Utc::now();
        Ok(self.tickets.insert_with(|id| SupportTicketDto {
            id,
            ticket_number: format!("TCK-{id:06}"),
            employee_id,
            subject: dto.subject,
            description: dto.description,
            category: dto.category,
            priority: dto.priority,
            status: TicketStatus::Open,
            assigned_to: None,
            resolution_note: None,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        }))
    }

    async fn employee_tickets(&self, employee_id: i64) -> ServiceResult<Vec<SupportTicketDto>> {
        Ok(self.tickets.filter(|t| t.employee_id == employee_id))
    }

    async fn list_tickets(&self, query: SupportTicketQuery) -> ServiceResult<Vec<SupportTicketDto>> {
        let mut tickets = self.tickets.filter(|t| {
            query.status.is_none_or(|s| t.status == s)
                && query.priority.is_none_or(|p| t.priority == p)
                && query.assigned_to.is_none_or(|a| t.assigned_to == Some(a))
        });
        // Most urgent first, then oldest
        tickets.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)));
        Ok(tickets)
    }

    async fn get_ticket(&self, id: i64) -> ServiceResult<Option<SupportTicketDto>> {
        Ok(self.tickets.get(id))
    }

    async fn update_status(
        &self,
        id: i64,
        dto: UpdateTicketStatusDto,
    ) -> ServiceResult<Option<SupportTicketDto>> {
        self.tickets.update(id, |ticket| {
            if !can_transition(ticket.status, dto.status) {
                return Err(ServiceError::invalid_operation(format!(
                    "Cannot move ticket from {:?} to {:?}",
                    ticket.status, dto.status
                )));
            }
            let now = Utc::now();
            ticket.status = dto.status;
            match dto.status {
                TicketStatus::Resolved => {
                    ticket.resolved_at = Some(now);
                    if dto.resolution_note.is_some() {
                        ticket.resolution_note = dto.resolution_note;
                    }
                }
                TicketStatus::Closed => {
                    ticket.resolved_at.get_or_insert(now);
                    if dto.resolution_note.is_some() {
                        ticket.resolution_note = dto.resolution_note;
                    }
                }
                TicketStatus::Open | TicketStatus::InProgress => ticket.resolved_at = None,
            }
            ticket.updated_at = now;
            Ok(ticket.clone())
        })
    }

    async fn assign_ticket(
        &self,
        id: i64,
        assignee_employee_id: i64,
    ) -> ServiceResult<Option<SupportTicketDto>> {
        self.tickets.update(id, |ticket| {
            if ticket.status == TicketStatus::Closed {
                return Err(ServiceError::invalid_operation(
                    "Closed tickets cannot be reassigned",
                ));
            }
            ticket.assigned_to = Some(assignee_employee_id);
            if ticket.status == TicketStatus::Open {
                ticket.status = TicketStatus::InProgress;
            }
            ticket.updated_at = Utc::now();
            Ok(ticket.clone())
        })
    }

    async fn add_comment(
        &self,
        ticket_id: i64,
        author_employee_id: i64,
        dto: AddTicketCommentDto,
    ) -> ServiceResult<Option<TicketCommentDto>> {
        let touched = self.tickets.update(ticket_id, |ticket| {
            if ticket.status == TicketStatus::Closed {
                return Err(ServiceError::invalid_operation(
                    "Cannot comment on a closed ticket",
                ));
            }
            ticket.updated_at = Utc::now();
            Ok(())
        })?;
        if touched.is_none() {
            return Ok(None);
        }

        Ok(Some(self.comments.insert_with(|id| TicketCommentDto {
            id,
            ticket_id,
            author_employee_id,
            message: dto.message,
            is_internal: dto.is_internal,
            created_at: Utc::now(),
        })))
    }

    async fn comments(
        &self,
        ticket_id: i64,
        include_internal: bool,
    ) -> ServiceResult<Option<Vec<TicketCommentDto>>> {
        if self.tickets.get(ticket_id).is_none() {
            return Ok(None);
        }
        Ok(Some(self.comments.filter(|c| {
            c.ticket_id == ticket_id && (include_internal || !c.is_internal)
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::TicketPriority;

    fn ticket(priority: TicketPriority) -> CreateSupportTicketDto {
        CreateSupportTicketDto {
            subject: "VPN down".into(),
            description: "Cannot connect since this morning".into(),
            category: "IT".into(),
            priority,
        }
    }

    fn status(status: TicketStatus) -> UpdateTicketStatusDto {
        UpdateTicketStatusDto {
            status,
            resolution_note: Some("Restarted gateway".into()),
        }
    }

    #[tokio::test]
    async fn test_ticket_number_format() {
        let service = MemorySupportTicketService::new();
        let t = service.create_ticket(1, ticket(TicketPriority::Low)).await.unwrap();
        assert_eq!(t.ticket_number, "TCK-000001");
        assert_eq!(t.status, TicketStatus::Open);
    }

    #[tokio::test]
    async fn test_closed_is_terminal() {
        let service = MemorySupportTicketService::new();
        let t = service.create_ticket(1, ticket(TicketPriority::Low)).await.unwrap();

        let resolved = service
            .update_status(t.id, status(TicketStatus::Resolved))
            .await
            .unwrap()
            .unwrap();
        assert!(resolved.resolved_at.is_some());
        assert_eq!(resolved.resolution_note.as_deref(), Some("Restarted gateway"));

        service.update_status(t.id, status(TicketStatus::Closed)).await.unwrap();
        let err = service
            .update_status(t.id, status(TicketStatus::InProgress))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOperation(_)));

        let err = service.assign_ticket(t.id, 9).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOperation(_)));
    }

    #[tokio::test]
    async fn test_assignment_starts_work() {
        let service = MemorySupportTicketService::new();
        let t = service.create_ticket(1, ticket(TicketPriority::High)).await.unwrap();
        let assigned = service.assign_ticket(t.id, 9).await.unwrap().unwrap();
        assert_eq!(assigned.assigned_to, Some(9));
        assert_eq!(assigned.status, TicketStatus::InProgress);
    }

    #[tokio::test]
    async fn test_internal_comments_are_filtered() {
        let service = MemorySupportTicketService::new();
        let t = service.create_ticket(1, ticket(TicketPriority::Low)).await.unwrap();
        service
            .add_comment(
                t.id,
                1,
                AddTicketCommentDto {
                    message: "Any update?".into(),
                    is_internal: false,
                },
            )
            .await
            .unwrap();
        service
            .add_comment(
                t.id,
                9,
                AddTicketCommentDto {
                    message: "Escalated to network team".into(),
                    is_internal: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(service.comments(t.id, false).await.unwrap().unwrap().len(), 1);
        assert_eq!(service.comments(t.id, true).await.unwrap().unwrap().len(), 2);
        assert!(service.comments(99, true).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_priority() {
        let service = MemorySupportTicketService::new();
        service.create_ticket(1, ticket(TicketPriority::Low)).await.unwrap();
        service.create_ticket(1, ticket(TicketPriority::Critical)).await.unwrap();
        service.create_ticket(1, ticket(TicketPriority::Medium)).await.unwrap();

        let list = service.list_tickets(SupportTicketQuery::default()).await.unwrap();
        let priorities: Vec<_> = list.iter().map(|t| t.priority).collect();
        assert_eq!(
            priorities,
            vec![TicketPriority::Critical, TicketPriority::Medium, TicketPriority::Low]
        );
    }
}
