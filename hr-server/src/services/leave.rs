//! Leave management port

use async_trait::async_trait;
use shared::models::{
    CreateLeaveRequestDto, LeaveBalanceDto, LeaveDecisionDto, LeaveRequestDto, LeaveRequestQuery,
    LeaveTypeDto,
};

use super::ServiceResult;

#[async_trait]
pub trait LeaveManagementService: Send + Sync {
    async fn leave_types(&self) -> ServiceResult<Vec<LeaveTypeDto>>;

    async fn balances(&self, employee_id: i64, year: i32) -> ServiceResult<Vec<LeaveBalanceDto>>;

    async fn submit_request(
        &self,
        employee_id: i64,
        dto: CreateLeaveRequestDto,
    ) -> ServiceResult<LeaveRequestDto>;

    async fn employee_requests(&self, employee_id: i64) -> ServiceResult<Vec<LeaveRequestDto>>;

    async fn list_requests(&self, query: LeaveRequestQuery) -> ServiceResult<Vec<LeaveRequestDto>>;

    async fn get_request(&self, id: i64) -> ServiceResult<Option<LeaveRequestDto>>;

    async fn approve_request(
        &self,
        id: i64,
        reviewer: &str,
        dto: LeaveDecisionDto,
    ) -> ServiceResult<Option<LeaveRequestDto>>;

    async fn reject_request(
        &self,
        id: i64,
        reviewer: &str,
        dto: LeaveDecisionDto,
    ) -> ServiceResult<Option<LeaveRequestDto>>;

    /// Only the requesting employee may cancel
    async fn cancel_request(
        &self,
        id: i64,
        employee_id: i64,
    ) -> ServiceResult<Option<LeaveRequestDto>>;
}
