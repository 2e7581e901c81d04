//! Email campaigns port

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{
    CampaignSendResultDto, CreateEmailCampaignDto, EmailCampaignDto, EmailSendResultDto,
    EmailTemplateDto, SendEmailDto, UpdateEmailCampaignDto,
};

use super::ServiceResult;

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn list_campaigns(&self) -> ServiceResult<Vec<EmailCampaignDto>>;

    async fn get_campaign(&self, id: i64) -> ServiceResult<Option<EmailCampaignDto>>;

    async fn create_campaign(
        &self,
        dto: CreateEmailCampaignDto,
        created_by: &str,
    ) -> ServiceResult<EmailCampaignDto>;

    async fn update_campaign(
        &self,
        id: i64,
        dto: UpdateEmailCampaignDto,
    ) -> ServiceResult<Option<EmailCampaignDto>>;

    async fn delete_campaign(&self, id: i64) -> ServiceResult<bool>;

    async fn schedule_campaign(
        &self,
        id: i64,
        scheduled_at: DateTime<Utc>,
    ) -> ServiceResult<Option<EmailCampaignDto>>;

    async fn send_campaign(&self, id: i64) -> ServiceResult<Option<CampaignSendResultDto>>;

    async fn cancel_campaign(&self, id: i64) -> ServiceResult<Option<EmailCampaignDto>>;

    async fn templates(&self) -> ServiceResult<Vec<EmailTemplateDto>>;

    async fn send_email(&self, dto: SendEmailDto) -> ServiceResult<EmailSendResultDto>;
}
