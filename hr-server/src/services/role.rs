//! Role management port (RBAC)

use async_trait::async_trait;
use shared::models::{AssignRoleDto, CreateRoleDto, RoleDto, UpdateRoleDto, UserRolesDto};

use super::ServiceResult;

#[async_trait]
pub trait RoleService: Send + Sync {
    async fn list_roles(&self) -> ServiceResult<Vec<RoleDto>>;

    async fn get_role(&self, id: i64) -> ServiceResult<Option<RoleDto>>;

    async fn find_role_by_name(&self, name: &str) -> ServiceResult<Option<RoleDto>>;

    async fn create_role(&self, dto: CreateRoleDto) -> ServiceResult<RoleDto>;

    async fn update_role(&self, id: i64, dto: UpdateRoleDto) -> ServiceResult<Option<RoleDto>>;

    async fn delete_role(&self, id: i64) -> ServiceResult<bool>;

    async fn assign_role(&self, dto: AssignRoleDto) -> ServiceResult<UserRolesDto>;

    async fn user_roles(&self, user_id: &str) -> ServiceResult<UserRolesDto>;
}
