//! In-memory notification adapter

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use shared::models::{CreateNotificationDto, NotificationDto, NotificationPreferencesDto};

use super::MemoryTable;
use crate::services::{NotificationService, ServiceResult};

#[derive(Debug, Default)]
pub struct MemoryNotificationService {
    notifications: MemoryTable<NotificationDto>,
    preferences: DashMap<String, NotificationPreferencesDto>,
}

impl MemoryNotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    fn prefs_of(&self, user_id: &str) -> NotificationPreferencesDto {
        self.preferences
            .get(user_id)
            .map(|p| p.value().clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NotificationService for MemoryNotificationService {
    async fn list(&self, user_id: &str, unread_only: bool) -> ServiceResult<Vec<NotificationDto>> {
        let mut rows = self
            .notifications
            .filter(|n| n.user_id == user_id && (!unread_only || !n.is_read));
        rows.reverse();
        Ok(rows)
    }

    async fn unread_count(&self, user_id: &str) -> ServiceResult<usize> {
        Ok(self
            .notifications
            .filter(|n| n.user_id == user_id && !n.is_read)
            .len())
    }

    async fn mark_read(&self, id: i64, user_id: &str) -> ServiceResult<bool> {
        let updated = self.notifications.update(id, |n| {
            if n.user_id != user_id {
                return Ok(false);
            }
            if !n.is_read {
                n.is_read = true;
                n.read_at = Some(Utc::now());
            }
            Ok(true)
        })?;
        Ok(updated.unwrap_or(false))
    }

    async fn mark_all_read(&self, user_id: &str) -> ServiceResult<usize> {
        let unread: Vec<i64> = self
            .notifications
            .filter(|n| n.user_id == user_id && !n.is_read)
            .into_iter()
            .map(|n| n.id)
            .collect();
        let now = Utc::now();
        let mut changed = 0;
        for id in unread {
            let flipped = self.notifications.update(id, |n| {
                let was_unread = !n.is_read;
                n.is_read = true;
                n.read_at.get_or_insert(now);
                Ok(was_unread)
            })?;
            if flipped == Some(true) {
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn delete(&self, id: i64, user_id: &str) -> ServiceResult<bool> {
        match self.notifications.get(id) {
            Some(n) if n.user_id == user_id => {
                Ok(self.notifications.remove_if(id, |_| Ok(()))?.is_some())
            }
            _ => Ok(false),
        }
    }

    async fn send(&self, dto: CreateNotificationDto) -> ServiceResult<Vec<NotificationDto>> {
        let recipients: BTreeSet<String> = dto
            .user_ids
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();

        let now = Utc::now();
        let delivered = recipients
            .into_iter()
            .filter(|user_id| self.prefs_of(user_id).in_app_enabled)
            .map(|user_id| {
                self.notifications.insert_with(|id| NotificationDto {
                    id,
                    user_id,
                    title: dto.title.clone(),
                    message: dto.message.clone(),
                    notification_type: dto.notification_type,
                    link: dto.link.clone(),
                    is_read: false,
                    created_at: now,
                    read_at: None,
                })
            })
            .collect::<Vec<_>>();

        tracing::debug!(count = delivered.len(), "Notifications delivered");
        Ok(delivered)
    }

    async fn preferences(&self, user_id: &str) -> ServiceResult<NotificationPreferencesDto> {
        Ok(self.prefs_of(user_id))
    }

    async fn update_preferences(
        &self,
        user_id: &str,
        dto: NotificationPreferencesDto,
    ) -> ServiceResult<NotificationPreferencesDto> {
        self.preferences.insert(user_id.to_string(), dto.clone());
        Ok(dto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::NotificationType;

    fn notice(users: &[&str]) -> CreateNotificationDto {
        CreateNotificationDto {
            user_ids: users.iter().map(|u| u.to_string()).collect(),
            title: "Payroll".into(),
            message: "Payslips are available".into(),
            notification_type: NotificationType::Info,
            link: None,
        }
    }

    #[tokio::test]
    async fn test_send_dedupes_recipients() {
        let service = MemoryNotificationService::new();
        let sent = service.send(notice(&["u1", "u2", "u1", " "])).await.unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(service.unread_count("u1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_in_app_opt_out_skips_delivery() {
        let service = MemoryNotificationService::new();
        let prefs = NotificationPreferencesDto {
            in_app_enabled: false,
            ..Default::default()
        };
        service.update_preferences("u2", prefs).await.unwrap();

        let sent = service.send(notice(&["u1", "u2"])).await.unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].user_id, "u1");
    }

    #[tokio::test]
    async fn test_read_flags_are_per_user() {
        let service = MemoryNotificationService::new();
        let sent = service.send(notice(&["u1"])).await.unwrap();
        let id = sent[0].id;

        assert!(!service.mark_read(id, "u2").await.unwrap());
        assert!(service.mark_read(id, "u1").await.unwrap());
        assert_eq!(service.unread_count("u1").await.unwrap(), 0);

        let unread = service.list("u1", true).await.unwrap();
        assert!(unread.is_empty());
        assert_eq!(service.list("u1", false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mark_all_read_counts_changes() {
        let service = MemoryNotificationService::new();
        service.send(notice(&["u1"])).await.unwrap();
        service.send(notice(&["u1"])).await.unwrap();
        assert_eq!(service.mark_all_read("u1").await.unwrap(), 2);
        assert_eq!(service.mark_all_read("u1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_only_own() {
        let service = MemoryNotificationService::new();
        let id = service.send(notice(&["u1"])).await.unwrap()[0].id;
        assert!(!service.delete(id, "u2").await.unwrap());
        assert!(service.delete(id, "u1").await.unwrap());
        assert!(service.list("u1", false).await.unwrap().is_empty());
    }
}
