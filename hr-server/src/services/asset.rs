//! Asset tracking port

use async_trait::async_trait;
use shared::models::{
    AssetAssignmentDto, AssetDto, AssetQuery, CreateAssetAssignmentDto, CreateAssetDto,
    ReturnAssetDto, UpdateAssetDto,
};

use super::ServiceResult;

#[async_trait]
pub trait AssetService: Send + Sync {
    async fn list_assets(&self, query: AssetQuery) -> ServiceResult<Vec<AssetDto>>;

    async fn get_asset(&self, id: i64) -> ServiceResult<Option<AssetDto>>;

    async fn create_asset(&self, dto: CreateAssetDto) -> ServiceResult<AssetDto>;

    async fn update_asset(&self, id: i64, dto: UpdateAssetDto) -> ServiceResult<Option<AssetDto>>;

    /// `false` when the asset does not exist
    async fn delete_asset(&self, id: i64) -> ServiceResult<bool>;

    /// Hand an asset to an employee; `assigned_by` is the operator's user id
    async fn assign_asset(
        &self,
        dto: CreateAssetAssignmentDto,
        assigned_by: &str,
    ) -> ServiceResult<AssetAssignmentDto>;

    async fn return_asset(
        &self,
        assignment_id: i64,
        dto: ReturnAssetDto,
    ) -> ServiceResult<Option<AssetAssignmentDto>>;

    /// Assignments (active and past) of one employee, newest first
    async fn employee_assignments(&self, employee_id: i64) -> ServiceResult<Vec<AssetAssignmentDto>>;

    /// Assignment history of one asset, newest first; `NotFound` for unknown assets
    async fn asset_history(&self, asset_id: i64) -> ServiceResult<Vec<AssetAssignmentDto>>;
}
