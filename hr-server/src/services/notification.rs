//! In-app notifications port

use async_trait::async_trait;
use shared::models::{CreateNotificationDto, NotificationDto, NotificationPreferencesDto};

use super::ServiceResult;

#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn list(&self, user_id: &str, unread_only: bool) -> ServiceResult<Vec<NotificationDto>>;

    async fn unread_count(&self, user_id: &str) -> ServiceResult<usize>;

    /// `false` when the notification does not exist or belongs to someone else
    async fn mark_read(&self, id: i64, user_id: &str) -> ServiceResult<bool>;

    /// Returns how many notifications changed
    async fn mark_all_read(&self, user_id: &str) -> ServiceResult<usize>;

    async fn delete(&self, id: i64, user_id: &str) -> ServiceResult<bool>;

    /// Fan out to every recipient; returns the delivered notifications
    async fn send(&self, dto: CreateNotificationDto) -> ServiceResult<Vec<NotificationDto>>;

    async fn preferences(&self, user_id: &str) -> ServiceResult<NotificationPreferencesDto>;

    async fn update_preferences(
        &self,
        user_id: &str,
        dto: NotificationPreferencesDto,
    ) -> ServiceResult<NotificationPreferencesDto>;
}
