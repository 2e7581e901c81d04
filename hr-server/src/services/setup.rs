//! Setup wizard port

use async_trait::async_trait;
use shared::models::{
    AdminSetupDto, CompanySetupDto, DefaultsSetupDto, SetupAdminResultDto, SetupStatusDto,
};

use super::ServiceResult;

#[async_trait]
pub trait SetupService: Send + Sync {
    async fn status(&self) -> ServiceResult<SetupStatusDto>;

    async fn configure_company(&self, dto: CompanySetupDto) -> ServiceResult<SetupStatusDto>;

    /// Creates the first administrator; the returned `token` is left empty
    async fn create_admin(&self, dto: AdminSetupDto) -> ServiceResult<SetupAdminResultDto>;

    async fn apply_defaults(&self, dto: DefaultsSetupDto) -> ServiceResult<SetupStatusDto>;

    async fn complete(&self) -> ServiceResult<SetupStatusDto>;
}
