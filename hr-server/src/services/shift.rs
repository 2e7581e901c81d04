//! Shift scheduling port (shifts, swaps, coverage)

use async_trait::async_trait;
use shared::models::{
    CoverageRequestDto, CreateCoverageRequestDto, CreateShiftDto, CreateShiftSwapRequestDto,
    ShiftDto, ShiftQuery, ShiftSwapQuery, ShiftSwapRequestDto, UpdateShiftDto,
};

use super::ServiceResult;

#[async_trait]
pub trait ShiftService: Send + Sync {
    // ========== Shifts ==========

    async fn list_shifts(&self, query: ShiftQuery) -> ServiceResult<Vec<ShiftDto>>;

    async fn get_shift(&self, id: i64) -> ServiceResult<Option<ShiftDto>>;

    async fn create_shift(&self, dto: CreateShiftDto) -> ServiceResult<ShiftDto>;

    async fn update_shift(&self, id: i64, dto: UpdateShiftDto) -> ServiceResult<Option<ShiftDto>>;

    async fn delete_shift(&self, id: i64) -> ServiceResult<bool>;

    async fn assign_shift(&self, id: i64, employee_id: i64) -> ServiceResult<Option<ShiftDto>>;

    // ========== Swaps ==========

    async fn create_swap_request(
        &self,
        requester_id: i64,
        dto: CreateShiftSwapRequestDto,
    ) -> ServiceResult<ShiftSwapRequestDto>;

    /// Swaps the employee asked for or was asked about
    async fn employee_swap_requests(&self, employee_id: i64)
    -> ServiceResult<Vec<ShiftSwapRequestDto>>;

    async fn list_swap_requests(&self, query: ShiftSwapQuery)
    -> ServiceResult<Vec<ShiftSwapRequestDto>>;

    /// Target employee accepts or declines
    async fn respond_to_swap(
        &self,
        id: i64,
        employee_id: i64,
        accept: bool,
    ) -> ServiceResult<Option<ShiftSwapRequestDto>>;

    async fn approve_swap(
        &self,
        id: i64,
        comment: Option<String>,
    ) -> ServiceResult<Option<ShiftSwapRequestDto>>;

    async fn reject_swap(
        &self,
        id: i64,
        comment: Option<String>,
    ) -> ServiceResult<Option<ShiftSwapRequestDto>>;

    async fn cancel_swap(&self, id: i64, employee_id: i64)
    -> ServiceResult<Option<ShiftSwapRequestDto>>;

    // ========== Coverage ==========

    async fn create_coverage_request(
        &self,
        employee_id: i64,
        dto: CreateCoverageRequestDto,
    ) -> ServiceResult<CoverageRequestDto>;

    async fn open_coverage_requests(&self) -> ServiceResult<Vec<CoverageRequestDto>>;

    async fn claim_coverage(
        &self,
        id: i64,
        employee_id: i64,
    ) -> ServiceResult<Option<CoverageRequestDto>>;

    /// Approving hands the shift to the claiming employee
    async fn approve_coverage(&self, id: i64) -> ServiceResult<Option<CoverageRequestDto>>;
}
