//! In-memory email adapter
//!
//! Nothing leaves the process: "sending" appends to an outbox that tests
//! and operators can inspect.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{
    CampaignSendResultDto, CampaignStatus, CreateEmailCampaignDto, EmailCampaignDto,
    EmailSendResultDto, EmailTemplateDto, SendEmailDto, UpdateEmailCampaignDto,
};
use validator::ValidateEmail;

use super::MemoryTable;
use crate::services::{EmailService, ServiceError, ServiceResult};

/// A message accepted for delivery
#[derive(Debug, Clone, PartialEq)]
pub struct OutboxMessage {
    pub id: i64,
    pub to: String,
    pub subject: String,
    pub body_html: String,
    pub campaign_id: Option<i64>,
    pub queued_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct MemoryEmailService {
    campaigns: MemoryTable<EmailCampaignDto>,
    outbox: MemoryTable<OutboxMessage>,
    templates: Vec<EmailTemplateDto>,
}

impl Default for MemoryEmailService {
    fn default() -> Self {
        Self::new()
    }
}

fn template(key: &str, name: &str, subject: &str, body_html: &str) -> EmailTemplateDto {
    EmailTemplateDto {
        key: key.into(),
        name: name.into(),
        subject: subject.into(),
        body_html: body_html.into(),
    }
}

/// Trimmed, de-duplicated recipients plus `field: message` errors for bad ones
fn normalize_recipients(raw: &[String]) -> (Vec<String>, Vec<String>) {
    let mut valid: Vec<String> = Vec::new();
    let mut errors = Vec::new();
    for address in raw {
        let address = address.trim();
        if !address.validate_email() {
            errors.push(format!("recipients: '{address}' is not a valid email address"));
        } else if !valid.iter().any(|v| v.eq_ignore_ascii_case(address)) {
            valid.push(address.to_string());
        }
    }
    (valid, errors)
}

pub(super) fn require_recipients(raw: &[String]) -> ServiceResult<Vec<String>> {
    let (valid, errors) = normalize_recipients(raw);
    if !errors.is_empty() {
        return Err(ServiceError::validation_with("Invalid recipients", errors));
    }
    Ok(valid)
}

impl MemoryEmailService {
    pub fn new() -> Self {
        Self {
            campaigns: MemoryTable::new(),
            outbox: MemoryTable::new(),
            templates: vec![
                template(
                    "welcome",
                    "Welcome aboard",
                    "Welcome to the team",
                    "<p>We are glad to have you with us.</p>",
                ),
                template(
                    "leave_approved",
                    "Leave approved",
                    "Your leave request was approved",
                    "<p>Your leave request has been approved.</p>",
                ),
                template(
                    "payslip_ready",
                    "Payslip ready",
                    "Your payslip is available",
                    "<p>Your latest payslip can be viewed in the portal.</p>",
                ),
            ],
        }
    }

    /// Messages queued so far, oldest first
    pub fn outbox(&self) -> Vec<OutboxMessage> {
        self.outbox.values()
    }

    fn queue(&self, to: &str, subject: &str, body_html: &str, campaign_id: Option<i64>) {
        self.outbox.insert_with(|id| OutboxMessage {
            id,
            to: to.to_string(),
            subject: subject.to_string(),
            body_html: body_html.to_string(),
            campaign_id,
            queued_at: Utc::now(),
        });
    }
}

#[async_trait]
impl EmailService for MemoryEmailService {
    async fn list_campaigns(&self) -> ServiceResult<Vec<EmailCampaignDto>> {
        Ok(self.campaigns.values())
    }

    async fn get_campaign(&self, id: i64) -> ServiceResult<Option<EmailCampaignDto>> {
        Ok(self.campaigns.get(id))
    }

    async fn create_campaign(
        &self,
        dto: CreateEmailCampaignDto,
        created_by: &str,
    ) -> ServiceResult<EmailCampaignDto> {
        let recipients = require_recipients(&dto.recipients)?;
        let now = Utc::now();
        Ok(self.campaigns.insert_with(|id| EmailCampaignDto {
            id,
            name: dto.name,
            subject: dto.subject,
            body_html: dto.body_html,
            recipients,
            status: CampaignStatus::Draft,
            scheduled_at: None,
            sent_at: None,
            sent_count: 0,
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        }))
    }

    async fn update_campaign(
        &self,
        id: i64,
        dto: UpdateEmailCampaignDto,
    ) -> ServiceResult<Option<EmailCampaignDto>> {
        let recipients = dto.recipients.as_deref().map(require_recipients).transpose()?;
        self.campaigns.update(id, |campaign| {
            if campaign.status != CampaignStatus::Draft {
                return Err(ServiceError::invalid_operation(
                    "Only draft campaigns can be edited",
                ));
            }
            if let Some(name) = dto.name {
                campaign.name = name;
            }
            if let Some(subject) = dto.subject {
                campaign.subject = subject;
            }
            if let Some(body) = dto.body_html {
                campaign.body_html = body;
            }
            if let Some(recipients) = recipients {
                campaign.recipients = recipients;
            }
            campaign.updated_at = Utc::now();
            Ok(campaign.clone())
        })
    }

    async fn delete_campaign(&self, id: i64) -> ServiceResult<bool> {
        let removed = self.campaigns.remove_if(id, |campaign| {
            if campaign.status == CampaignStatus::Sent {
                return Err(ServiceError::invalid_operation(
                    "Sent campaigns are kept for the record and cannot be deleted",
                ));
            }
            Ok(())
        })?;
        Ok(removed.is_some())
    }

    async fn schedule_campaign(
        &self,
        id: i64,
        scheduled_at: DateTime<Utc>,
    ) -> ServiceResult<Option<EmailCampaignDto>> {
        if scheduled_at <= Utc::now() {
            return Err(ServiceError::validation_with(
                "Invalid schedule",
                vec!["scheduledAt: must be in the future".into()],
            ));
        }
        self.campaigns.update(id, |campaign| {
            if !matches!(campaign.status, CampaignStatus::Draft | CampaignStatus::Scheduled) {
                return Err(ServiceError::invalid_operation(format!(
                    "A {:?} campaign cannot be scheduled",
                    campaign.status
                )));
            }
            campaign.status = CampaignStatus::Scheduled;
            campaign.scheduled_at = Some(scheduled_at);
            campaign.updated_at = Utc::now();
            Ok(campaign.clone())
        })
    }

    async fn send_campaign(&self, id: i64) -> ServiceResult<Option<CampaignSendResultDto>> {
        // Flip the status first so a concurrent send sees Sent
        let campaign = self.campaigns.update(id, |campaign| {
            if !matches!(campaign.status, CampaignStatus::Draft | CampaignStatus::Scheduled) {
                return Err(ServiceError::invalid_operation(format!(
                    "A {:?} campaign cannot be sent",
                    campaign.status
                )));
            }
            let now = Utc::now();
            campaign.status = CampaignStatus::Sent;
            campaign.sent_at = Some(now);
            campaign.updated_at = now;
            Ok(campaign.clone())
        })?;
        let Some(campaign) = campaign else {
            return Ok(None);
        };

        let (valid, _) = normalize_recipients(&campaign.recipients);
        let failed_recipients: Vec<String> = campaign
            .recipients
            .iter()
            .filter(|r| !valid.contains(r))
            .cloned()
            .collect();
        for to in &valid {
            self.queue(to, &campaign.subject, &campaign.body_html, Some(campaign.id));
        }

        let sent_count = valid.len();
        self.campaigns.update(id, |c| {
            c.sent_count = sent_count;
            Ok(())
        })?;

        tracing::info!(campaign_id = id, sent_count, "Email campaign sent");
        Ok(Some(CampaignSendResultDto {
            campaign_id: campaign.id,
            sent_count,
            failed_recipients,
            sent_at: campaign.sent_at.unwrap_or_else(Utc::now),
        }))
    }

    async fn cancel_campaign(&self, id: i64) -> ServiceResult<Option<EmailCampaignDto>> {
        self.campaigns.update(id, |campaign| {
            if !matches!(campaign.status, CampaignStatus::Draft | CampaignStatus::Scheduled) {
                return Err(ServiceError::invalid_operation(format!(
                    "A {:?} campaign cannot be cancelled",
                    campaign.status
                )));
            }
            campaign.status = CampaignStatus::Cancelled;
            campaign.scheduled_at = None;
            campaign.updated_at = Utc::now();
            Ok(campaign.clone())
        })
    }

    async fn templates(&self) -> ServiceResult<Vec<EmailTemplateDto>> {
        Ok(self.templates.clone())
    }

    async fn send_email(&self, dto: SendEmailDto) -> ServiceResult<EmailSendResultDto> {
        let (valid, errors) = normalize_recipients(&dto.to);
        if valid.is_empty() {
            return Err(ServiceError::validation_with("No valid recipients", errors));
        }
        for to in &valid {
            self.queue(to, &dto.subject, &dto.body_html, None);
        }
        let rejected = dto
            .to
            .iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.validate_email())
            .collect();
        Ok(EmailSendResultDto {
            accepted: valid.len(),
            rejected,
        })
    }
}
