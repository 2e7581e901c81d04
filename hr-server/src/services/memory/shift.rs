//! In-memory shift adapter (shifts, swaps, coverage)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{
    CoverageRequestDto, CoverageStatus, CreateCoverageRequestDto, CreateShiftDto,
    CreateShiftSwapRequestDto, ShiftDto, ShiftQuery, ShiftSwapQuery, ShiftSwapRequestDto,
    ShiftSwapStatus, UpdateShiftDto,
};

use super::MemoryTable;
use crate::services::{ServiceError, ServiceResult, ShiftService};

#[derive(Debug, Default)]
pub struct MemoryShiftService {
    shifts: MemoryTable<ShiftDto>,
    swaps: MemoryTable<ShiftSwapRequestDto>,
    coverage: MemoryTable<CoverageRequestDto>,
}

fn check_window(start: DateTime<Utc>, end: DateTime<Utc>) -> ServiceResult<()> {
    if end <= start {
        return Err(ServiceError::validation_with(
            "Invalid shift times",
            vec!["endTime: must be after startTime".into()],
        ));
    }
    Ok(())
}

impl MemoryShiftService {
    pub fn new() -> Self {
        Self::default()
    }

    fn require_shift(&self, id: i64) -> ServiceResult<ShiftDto> {
        self.shifts
            .get(id)
            .ok_or_else(|| ServiceError::not_found(format!("Shift with ID {id} not found")))
    }

    fn set_employee(&self, shift_id: i64, employee_id: Option<i64>) -> ServiceResult<()> {
        self.shifts.update(shift_id, |shift| {
            shift.employee_id = employee_id;
            shift.updated_at = Utc::now();
            Ok(())
        })?;
        Ok(())
    }

    fn decide_swap(
        &self,
        id: i64,
        comment: Option<String>,
        outcome: ShiftSwapStatus,
    ) -> ServiceResult<Option<ShiftSwapRequestDto>> {
        let decided = self.swaps.update(id, |swap| {
            if swap.status != ShiftSwapStatus::Accepted {
                return Err(ServiceError::invalid_operation(
                    "Only swaps accepted by the target employee can be reviewed",
                ));
            }
            if outcome == ShiftSwapStatus::Approved {
                // Both shifts must still be held by the same people
                let own = self.require_shift(swap.requester_shift_id)?;
                if own.employee_id != Some(swap.requester_id) {
                    return Err(ServiceError::conflict(
                        "The requester no longer holds the offered shift",
                    ));
                }
                if let Some(target_shift_id) = swap.target_shift_id {
                    let target = self.require_shift(target_shift_id)?;
                    if target.employee_id != Some(swap.target_employee_id) {
                        return Err(ServiceError::conflict(
                            "The target employee no longer holds the requested shift",
                        ));
                    }
                }
            }
            swap.status = outcome;
            swap.manager_comment = comment;
            swap.updated_at = Utc::now();
            Ok(swap.clone())
        })?;

        if let Some(swap) = &decided
            && swap.status == ShiftSwapStatus::Approved
        {
            self.set_employee(swap.requester_shift_id, Some(swap.target_employee_id))?;
            if let Some(target_shift_id) = swap.target_shift_id {
                self.set_employee(target_shift_id, Some(swap.requester_id))?;
            }
        }

        Ok(decided)
    }
}

#[async_trait]
impl ShiftService for MemoryShiftService {
    async fn list_shifts(&self, query: ShiftQuery) -> ServiceResult<Vec<ShiftDto>> {
        let mut shifts = self.shifts.filter(|s| {
            query.from.is_none_or(|from| s.start_time >= from)
                && query.to.is_none_or(|to| s.start_time <= to)
                && query.employee_id.is_none_or(|e| s.employee_id == Some(e))
        });
        shifts.sort_by_key(|s| (s.start_time, s.id));
        Ok(shifts)
    }

    async fn get_shift(&self, id: i64) -> ServiceResult<Option<ShiftDto>> {
        Ok(self.shifts.get(id))
    }

    async fn create_shift(&self, dto: CreateShiftDto) -> ServiceResult<ShiftDto> {
        check_window(dto.start_time, dto.end_time)?;
        let now = Utc::now();
        Ok(self.shifts.insert_with(|id| ShiftDto {
            id,
            title: dto.title,
            employee_id: dto.employee_id,
            department: dto.department,
            start_time: dto.start_time,
            end_time: dto.end_time,
            notes: dto.notes,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn update_shift(&self, id: i64, dto: UpdateShiftDto) -> ServiceResult<Option<ShiftDto>> {
        self.shifts.update(id, |shift| {
            let start = dto.start_time.unwrap_or(shift.start_time);
            let end = dto.end_time.unwrap_or(shift.end_time);
            check_window(start, end)?;
            shift.start_time = start;
            shift.end_time = end;
            if let Some(title) = dto.title {
                shift.title = title;
            }
            if dto.department.is_some() {
                shift.department = dto.department;
            }
            if dto.notes.is_some() {
                shift.notes = dto.notes;
            }
            shift.updated_at = Utc::now();
            Ok(shift.clone())
        })
    }

    async fn delete_shift(&self, id: i64) -> ServiceResult<bool> {
        let has_open_swap = self
            .swaps
            .find(|s| {
                (s.requester_shift_id == id || s.target_shift_id == Some(id))
                    && matches!(s.status, ShiftSwapStatus::Pending | ShiftSwapStatus::Accepted)
            })
            .is_some();
        if has_open_swap {
            return Err(ServiceError::conflict(
                "Shift has an open swap request and cannot be deleted",
            ));
        }
        Ok(self.shifts.remove_if(id, |_| Ok(()))?.is_some())
    }

    async fn assign_shift(&self, id: i64, employee_id: i64) -> ServiceResult<Option<ShiftDto>> {
        self.shifts.update(id, |shift| {
            shift.employee_id = Some(employee_id);
            shift.updated_at = Utc::now();
            Ok(shift.clone())
        })
    }

    async fn create_swap_request(
        &self,
        requester_id: i64,
        dto: CreateShiftSwapRequestDto,
    ) -> ServiceResult<ShiftSwapRequestDto> {
        if dto.target_employee_id == requester_id {
            return Err(ServiceError::validation(
                "A shift cannot be swapped with yourself",
            ));
        }
        let own = self.require_shift(dto.requester_shift_id)?;
        if own.employee_id != Some(requester_id) {
            return Err(ServiceError::unauthorized(
                "You can only offer shifts assigned to you",
            ));
        }
        if let Some(target_shift_id) = dto.target_shift_id {
            let target = self.require_shift(target_shift_id)?;
            if target.employee_id != Some(dto.target_employee_id) {
                return Err(ServiceError::validation(
                    "The requested shift is not assigned to the target employee",
                ));
            }
        }
        let duplicate = self.swaps.find(|s| {
            s.requester_shift_id == dto.requester_shift_id
                && matches!(s.status, ShiftSwapStatus::Pending | ShiftSwapStatus::Accepted)
        });
        if duplicate.is_some() {
            return Err(ServiceError::conflict(
                "This shift already has an open swap request",
            ));
        }

        let now = Utc::now();
        Ok(self.swaps.insert_with(|id| ShiftSwapRequestDto {
            id,
            requester_id,
            requester_shift_id: dto.requester_shift_id,
            target_employee_id: dto.target_employee_id,
            target_shift_id: dto.target_shift_id,
            reason: dto.reason,
            status: ShiftSwapStatus::Pending,
            manager_comment: None,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn employee_swap_requests(
        &self,
        employee_id: i64,
    ) -> ServiceResult<Vec<ShiftSwapRequestDto>> {
        Ok(self
            .swaps
            .filter(|s| s.requester_id == employee_id || s.target_employee_id == employee_id))
    }

    async fn list_swap_requests(
        &self,
        query: ShiftSwapQuery,
    ) -> ServiceResult<Vec<ShiftSwapRequestDto>> {
        Ok(self.swaps.filter(|s| query.status.is_none_or(|st| s.status == st)))
    }

    async fn respond_to_swap(
        &self,
        id: i64,
        employee_id: i64,
        accept: bool,
    ) -> ServiceResult<Option<ShiftSwapRequestDto>> {
        self.swaps.update(id, |swap| {
            if swap.target_employee_id != employee_id {
                return Err(ServiceError::unauthorized(
                    "Only the target employee can respond to this swap request",
                ));
            }
            if swap.status != ShiftSwapStatus::Pending {
                return Err(ServiceError::invalid_operation(
                    "This swap request is no longer awaiting a response",
                ));
            }
            swap.status = if accept {
                ShiftSwapStatus::Accepted
            } else {
                ShiftSwapStatus::Declined
            };
            swap.updated_at = Utc::now();
            Ok(swap.clone())
        })
    }

    async fn approve_swap(
        &self,
        id: i64,
        comment: Option<String>,
    ) -> ServiceResult<Option<ShiftSwapRequestDto>> {
        self.decide_swap(id, comment, ShiftSwapStatus::Approved)
    }

    async fn reject_swap(
        &self,
        id: i64,
        comment: Option<String>,
    ) -> ServiceResult<Option<ShiftSwapRequestDto>> {
        self.decide_swap(id, comment, ShiftSwapStatus::Rejected)
    }

    async fn cancel_swap(
        &self,
        id: i64,
        employee_id: i64,
    ) -> ServiceResult<Option<ShiftSwapRequestDto>> {
        self.swaps.update(id, |swap| {
            if swap.requester_id != employee_id {
                return Err(ServiceError::unauthorized(
                    "Only the requester can cancel this swap request",
                ));
            }
            if !matches!(swap.status, ShiftSwapStatus::Pending | ShiftSwapStatus::Accepted) {
                return Err(ServiceError::invalid_operation(
                    "This swap request can no longer be cancelled",
                ));
            }
            swap.status = ShiftSwapStatus::Cancelled;
            swap.updated_at = Utc::now();
            Ok(swap.clone())
        })
    }

    async fn create_coverage_request(
        &self,
        employee_id: i64,
        dto: CreateCoverageRequestDto,
    ) -> ServiceResult<CoverageRequestDto> {
        let shift = self.require_shift(dto.shift_id)?;
        if shift.employee_id != Some(employee_id) {
            return Err(ServiceError::unauthorized(
                "You can only request coverage for your own shifts",
            ));
        }
        let open = self.coverage.find(|c| {
            c.shift_id == dto.shift_id
                && matches!(c.status, CoverageStatus::Open | CoverageStatus::Claimed)
        });
        if open.is_some() {
            return Err(ServiceError::conflict(
                "This shift already has an open coverage request",
            ));
        }

        let now = Utc::now();
        Ok(self.coverage.insert_with(|id| CoverageRequestDto {
            id,
            shift_id: dto.shift_id,
            requested_by: employee_id,
            covered_by: None,
            reason: dto.reason,
            status: CoverageStatus::Open,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn open_coverage_requests(&self) -> ServiceResult<Vec<CoverageRequestDto>> {
        Ok(self.coverage.filter(|c| c.status == CoverageStatus::Open))
    }

    async fn claim_coverage(
        &self,
        id: i64,
        employee_id: i64,
    ) -> ServiceResult<Option<CoverageRequestDto>> {
        self.coverage.update(id, |request| {
            if request.status != CoverageStatus::Open {
                return Err(ServiceError::invalid_operation(
                    "This coverage request is no longer open",
                ));
            }
            if request.requested_by == employee_id {
                return Err(ServiceError::invalid_operation(
                    "You cannot cover your own shift",
                ));
            }
            request.status = CoverageStatus::Claimed;
            request.covered_by = Some(employee_id);
            request.updated_at = Utc::now();
            Ok(request.clone())
        })
    }

    async fn approve_coverage(&self, id: i64) -> ServiceResult<Option<CoverageRequestDto>> {
        let approved = self.coverage.update(id, |request| {
            if request.status != CoverageStatus::Claimed {
                return Err(ServiceError::invalid_operation(
                    "Only claimed coverage requests can be approved",
                ));
            }
            request.status = CoverageStatus::Approved;
            request.updated_at = Utc::now();
            Ok(request.clone())
        })?;

        if let Some(request) = &approved {
            self.set_employee(request.shift_id, request.covered_by)?;
        }
        Ok(approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn shift_for(employee_id: Option<i64>, hours_from_now: i64) -> CreateShiftDto {
        let start = Utc::now() + Duration::hours(hours_from_now);
        CreateShiftDto {
            title: "Front desk".into(),
            employee_id,
            department: Some("Operations".into()),
            start_time: start,
            end_time: start + Duration::hours(8),
            notes: None,
        }
    }

    fn swap(requester_shift_id: i64, target_employee_id: i64, target_shift_id: Option<i64>)
    -> CreateShiftSwapRequestDto {
        CreateShiftSwapRequestDto {
            requester_shift_id,
            target_employee_id,
            target_shift_id,
            reason: None,
        }
    }

    #[tokio::test]
    async fn test_end_must_follow_start() {
        let service = MemoryShiftService::new();
        let mut dto = shift_for(Some(1), 1);
        dto.end_time = dto.start_time;
        let err = service.create_shift(dto).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_approved_swap_exchanges_employees() {
        let service = MemoryShiftService::new();
        let a = service.create_shift(shift_for(Some(1), 1)).await.unwrap();
        let b = service.create_shift(shift_for(Some(2), 30)).await.unwrap();

        let request = service.create_swap_request(1, swap(a.id, 2, Some(b.id))).await.unwrap();
        assert_eq!(request.status, ShiftSwapStatus::Pending);

        // Manager cannot approve before the target accepts
        let err = service.approve_swap(request.id, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOperation(_)));

        let accepted = service.respond_to_swap(request.id, 2, true).await.unwrap().unwrap();
        assert_eq!(accepted.status, ShiftSwapStatus::Accepted);

        let approved = service
            .approve_swap(request.id, Some("ok".into()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.status, ShiftSwapStatus::Approved);

        assert_eq!(service.get_shift(a.id).await.unwrap().unwrap().employee_id, Some(2));
        assert_eq!(service.get_shift(b.id).await.unwrap().unwrap().employee_id, Some(1));
    }

    #[tokio::test]
    async fn test_only_target_responds_and_only_requester_cancels() {
        let service = MemoryShiftService::new();
        let a = service.create_shift(shift_for(Some(1), 1)).await.unwrap();
        let request = service.create_swap_request(1, swap(a.id, 2, None)).await.unwrap();

        let err = service.respond_to_swap(request.id, 3, true).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));

        let err = service.cancel_swap(request.id, 2).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));

        let cancelled = service.cancel_swap(request.id, 1).await.unwrap().unwrap();
        assert_eq!(cancelled.status, ShiftSwapStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_cannot_offer_someone_elses_shift() {
        let service = MemoryShiftService::new();
        let a = service.create_shift(shift_for(Some(1), 1)).await.unwrap();
        let err = service.create_swap_request(3, swap(a.id, 2, None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_coverage_flow_reassigns_shift() {
        let service = MemoryShiftService::new();
        let a = service.create_shift(shift_for(Some(1), 1)).await.unwrap();

        let request = service
            .create_coverage_request(
                1,
                CreateCoverageRequestDto {
                    shift_id: a.id,
                    reason: Some("Doctor".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(service.open_coverage_requests().await.unwrap().len(), 1);

        let err = service.claim_coverage(request.id, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOperation(_)));

        let claimed = service.claim_coverage(request.id, 4).await.unwrap().unwrap();
        assert_eq!(claimed.covered_by, Some(4));
        assert!(service.open_coverage_requests().await.unwrap().is_empty());

        let approved = service.approve_coverage(request.id).await.unwrap().unwrap();
        assert_eq!(approved.status, CoverageStatus::Approved);
        assert_eq!(service.get_shift(a.id).await.unwrap().unwrap().employee_id, Some(4));
    }

    #[tokio::test]
    async fn test_shift_with_open_swap_cannot_be_deleted() {
        let service = MemoryShiftService::new();
        let a = service.create_shift(shift_for(Some(1), 1)).await.unwrap();
        service.create_swap_request(1, swap(a.id, 2, None)).await.unwrap();
        let err = service.delete_shift(a.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_start_and_filtered() {
        let service = MemoryShiftService::new();
        service.create_shift(shift_for(Some(1), 48)).await.unwrap();
        service.create_shift(shift_for(Some(1), 2)).await.unwrap();
        service.create_shift(shift_for(Some(2), 5)).await.unwrap();

        let mine = service
            .list_shifts(ShiftQuery {
                employee_id: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine[0].start_time < mine[1].start_time);
    }
}
