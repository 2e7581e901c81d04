//! In-memory leave management adapter
//!
//! Balances are derived from the leave types and the stored requests, so
//! they can never drift from the request history.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use shared::models::{
    CreateLeaveRequestDto, LeaveBalanceDto, LeaveDecisionDto, LeaveRequestDto, LeaveRequestQuery,
    LeaveRequestStatus, LeaveTypeDto,
};
use tokio::sync::Mutex;

use super::MemoryTable;
use crate::services::{LeaveManagementService, ServiceError, ServiceResult};

#[derive(Debug)]
pub struct MemoryLeaveService {
    leave_types: Vec<LeaveTypeDto>,
    requests: MemoryTable<LeaveRequestDto>,
    /// Serializes submissions so two requests cannot both spend the same days
    submit_lock: Mutex<()>,
}

impl Default for MemoryLeaveService {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLeaveService {
    pub fn new() -> Self {
        Self::with_leave_types(vec![
            LeaveTypeDto {
                id: 1,
                name: "Annual Leave".into(),
                default_days_per_year: 20,
                is_paid: true,
            },
            LeaveTypeDto {
                id: 2,
                name: "Sick Leave".into(),
                default_days_per_year: 10,
                is_paid: true,
            },
            LeaveTypeDto {
                id: 3,
                name: "Unpaid Leave".into(),
                default_days_per_year: 30,
                is_paid: false,
            },
        ])
    }

    pub fn with_leave_types(leave_types: Vec<LeaveTypeDto>) -> Self {
        Self {
            leave_types,
            requests: MemoryTable::new(),
            submit_lock: Mutex::new(()),
        }
    }

    fn balance_for(&self, employee_id: i64, leave_type: &LeaveTypeDto, year: i32) -> LeaveBalanceDto {
        let mut used = 0;
        let mut pending = 0;
        for request in self.requests.filter(|r| {
            r.employee_id == employee_id
                && r.leave_type_id == leave_type.id
                && r.start_date.year() == year
        }) {
            match request.status {
                LeaveRequestStatus::Approved => used += request.days,
                LeaveRequestStatus::Pending => pending += request.days,
                LeaveRequestStatus::Rejected | LeaveRequestStatus::Cancelled => {}
            }
        }

        LeaveBalanceDto {
            employee_id,
            leave_type_id: leave_type.id,
            leave_type_name: leave_type.name.clone(),
            year,
            entitled_days: leave_type.default_days_per_year,
            used_days: used,
            pending_days: pending,
            remaining_days: leave_type.default_days_per_year - used - pending,
        }
    }

    fn decide(
        &self,
        id: i64,
        reviewer: &str,
        comment: Option<String>,
        outcome: LeaveRequestStatus,
    ) -> ServiceResult<Option<LeaveRequestDto>> {
        self.requests.update(id, |request| {
            if request.status != LeaveRequestStatus::Pending {
                return Err(ServiceError::invalid_operation(format!(
                    "Only pending leave requests can be reviewed (current status: {:?})",
                    request.status
                )));
            }
            request.status = outcome;
            request.reviewed_by = Some(reviewer.to_string());
            request.review_comment = comment;
            request.reviewed_at = Some(Utc::now());
            Ok(request.clone())
        })
    }

    fn newest_first(mut rows: Vec<LeaveRequestDto>) -> Vec<LeaveRequestDto> {
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows
    }
}

#[async_trait]
impl LeaveManagementService for MemoryLeaveService {
    async fn leave_types(&self) -> ServiceResult<Vec<LeaveTypeDto>> {
        Ok(self.leave_types.clone())
    }

    async fn balances(&self, employee_id: i64, year: i32) -> ServiceResult<Vec<LeaveBalanceDto>> {
        Ok(self
            .leave_types
            .iter()
            .map(|t| self.balance_for(employee_id, t, year))
            .collect())
    }

    async fn submit_request(
        &self,
        employee_id: i64,
        dto: CreateLeaveRequestDto,
    ) -> ServiceResult<LeaveRequestDto> {
        if dto.end_date < dto.start_date {
            return Err(ServiceError::validation_with(
                "Invalid leave period",
                vec!["endDate: must not be before startDate".into()],
            ));
        }
        if dto.start_date.year() != dto.end_date.year() {
            return Err(ServiceError::validation(
                "Leave requests cannot span two calendar years",
            ));
        }
        let leave_type = self
            .leave_types
            .iter()
            .find(|t| t.id == dto.leave_type_id)
            .ok_or_else(|| {
                ServiceError::validation(format!("Unknown leave type {}", dto.leave_type_id))
            })?;

        let days = (dto.end_date - dto.start_date).num_days() as i32 + 1;

        let _guard = self.submit_lock.lock().await;

        let overlapping = self.requests.find(|r| {
            r.employee_id == employee_id
                && matches!(
                    r.status,
                    LeaveRequestStatus::Pending | LeaveRequestStatus::Approved
                )
                && r.start_date <= dto.end_date
                && dto.start_date <= r.end_date
        });
        if let Some(existing) = overlapping {
            return Err(ServiceError::conflict(format!(
                "Leave request overlaps existing request {}",
                existing.id
            )));
        }

        let balance = self.balance_for(employee_id, leave_type, dto.start_date.year());
        if days > balance.remaining_days {
            return Err(ServiceError::validation(format!(
                "Insufficient {} balance: requested {} days, {} remaining",
                leave_type.name, days, balance.remaining_days
            )));
        }

        Ok(self.requests.insert_with(|id| LeaveRequestDto {
            id,
            employee_id,
            leave_type_id: leave_type.id,
            leave_type_name: leave_type.name.clone(),
            start_date: dto.start_date,
            end_date: dto.end_date,
            days,
            reason: dto.reason,
            status: LeaveRequestStatus::Pending,
            reviewed_by: None,
            review_comment: None,
            created_at: Utc::now(),
            reviewed_at: None,
        }))
    }

    async fn employee_requests(&self, employee_id: i64) -> ServiceResult<Vec<LeaveRequestDto>> {
        Ok(Self::newest_first(
            self.requests.filter(|r| r.employee_id == employee_id),
        ))
    }

    async fn list_requests(&self, query: LeaveRequestQuery) -> ServiceResult<Vec<LeaveRequestDto>> {
        Ok(Self::newest_first(self.requests.filter(|r| {
            query.status.is_none_or(|s| r.status == s)
                && query.employee_id.is_none_or(|e| r.employee_id == e)
        })))
    }

    async fn get_request(&self, id: i64) -> ServiceResult<Option<LeaveRequestDto>> {
        Ok(self.requests.get(id))
    }

    async fn approve_request(
        &self,
        id: i64,
        reviewer: &str,
        dto: LeaveDecisionDto,
    ) -> ServiceResult<Option<LeaveRequestDto>> {
        self.decide(id, reviewer, dto.comment, LeaveRequestStatus::Approved)
    }

    async fn reject_request(
        &self,
        id: i64,
        reviewer: &str,
        dto: LeaveDecisionDto,
    ) -> ServiceResult<Option<LeaveRequestDto>> {
        self.decide(id, reviewer, dto.comment, LeaveRequestStatus::Rejected)
    }

    async fn cancel_request(
        &self,
        id: i64,
        employee_id: i64,
    ) -> ServiceResult<Option<LeaveRequestDto>> {
        self.requests.update(id, |request| {
            if request.employee_id != employee_id {
                return Err(ServiceError::unauthorized(
                    "Only the requesting employee can cancel this leave request",
                ));
            }
            if request.status != LeaveRequestStatus::Pending {
                return Err(ServiceError::invalid_operation(
                    "Only pending leave requests can be cancelled",
                ));
            }
            request.status = LeaveRequestStatus::Cancelled;
            Ok(request.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn annual(start: NaiveDate, end: NaiveDate) -> CreateLeaveRequestDto {
        CreateLeaveRequestDto {
            leave_type_id: 1,
            start_date: start,
            end_date: end,
            reason: Some("Holiday".into()),
        }
    }

    #[tokio::test]
    async fn test_days_are_inclusive_and_held_as_pending() {
        let service = MemoryLeaveService::new();
        let request = service
            .submit_request(5, annual(date(2026, 3, 2), date(2026, 3, 6)))
            .await
            .unwrap();
        assert_eq!(request.days, 5);
        assert_eq!(request.status, LeaveRequestStatus::Pending);

        let balances = service.balances(5, 2026).await.unwrap();
        let annual = balances.iter().find(|b| b.leave_type_id == 1).unwrap();
        assert_eq!(annual.pending_days, 5);
        assert_eq!(annual.remaining_days, 15);
    }

    #[tokio::test]
    async fn test_approval_moves_days_to_used() {
        let service = MemoryLeaveService::new();
        let request = service
            .submit_request(5, annual(date(2026, 3, 2), date(2026, 3, 3)))
            .await
            .unwrap();
        let approved = service
            .approve_request(request.id, "manager-1", LeaveDecisionDto::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.status, LeaveRequestStatus::Approved);
        assert_eq!(approved.reviewed_by.as_deref(), Some("manager-1"));

        let balance = &service.balances(5, 2026).await.unwrap()[0];
        assert_eq!(balance.used_days, 2);
        assert_eq!(balance.pending_days, 0);
        assert_eq!(balance.remaining_days, 18);
    }

    #[tokio::test]
    async fn test_exceeding_balance_is_validation_error() {
        let service = MemoryLeaveService::new();
        let err = service
            .submit_request(5, annual(date(2026, 1, 1), date(2026, 1, 25)))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_end_before_start_is_rejected() {
        let service = MemoryLeaveService::new();
        let err = service
            .submit_request(5, annual(date(2026, 1, 5), date(2026, 1, 1)))
            .await
            .unwrap_err();
        match err {
            ServiceError::Validation { errors, .. } => {
                assert_eq!(errors, vec!["endDate: must not be before startDate"])
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_overlapping_request_conflicts() {
        let service = MemoryLeaveService::new();
        service
            .submit_request(5, annual(date(2026, 6, 1), date(2026, 6, 5)))
            .await
            .unwrap();
        let err = service
            .submit_request(5, annual(date(2026, 6, 5), date(2026, 6, 8)))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        // Another employee is unaffected
        service
            .submit_request(6, annual(date(2026, 6, 1), date(2026, 6, 5)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_only_pending_can_be_decided() {
        let service = MemoryLeaveService::new();
        let request = service
            .submit_request(5, annual(date(2026, 3, 2), date(2026, 3, 3)))
            .await
            .unwrap();
        service
            .reject_request(request.id, "manager-1", LeaveDecisionDto::default())
            .await
            .unwrap();
        let err = service
            .approve_request(request.id, "manager-1", LeaveDecisionDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOperation(_)));
    }

    #[tokio::test]
    async fn test_only_owner_can_cancel() {
        let service = MemoryLeaveService::new();
        let request = service
            .submit_request(5, annual(date(2026, 3, 2), date(2026, 3, 3)))
            .await
            .unwrap();

        let err = service.cancel_request(request.id, 6).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));

        let cancelled = service.cancel_request(request.id, 5).await.unwrap().unwrap();
        assert_eq!(cancelled.status, LeaveRequestStatus::Cancelled);
        assert_eq!(service.balances(5, 2026).await.unwrap()[0].remaining_days, 20);
    }

    #[tokio::test]
    async fn test_unknown_request_is_none() {
        let service = MemoryLeaveService::new();
        assert!(service.cancel_request(42, 5).await.unwrap().is_none());
        assert!(service.get_request(42).await.unwrap().is_none());
    }
}
