//! In-memory report schedules
//!
//! Schedules are stored and can be run on demand; there is no background
//! cron runner in this adapter.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{
    CreateReportScheduleDto, ExportReportQuery, ReportRunDto, ReportRunStatus, ReportScheduleDto,
    UpdateReportScheduleDto,
};

use super::MemoryTable;
use super::email::require_recipients;
use crate::services::error::required_trimmed;
use crate::services::{FinancialReportingService, ReportSchedulingService, ServiceError, ServiceResult};

/// Inclusive bounds for minute, hour, day-of-month, month, day-of-week
const CRON_FIELDS: [(&str, u32, u32); 5] = [
    ("minute", 0, 59),
    ("hour", 0, 23),
    ("day-of-month", 1, 31),
    ("month", 1, 12),
    ("day-of-week", 0, 7),
];

fn parse_cron_value(value: &str, min: u32, max: u32) -> Option<u32> {
    value.parse::<u32>().ok().filter(|v| (min..=max).contains(v))
}

/// Check one cron field: `*`, `*/n`, `a`, `a-b`, `a-b/n` and comma lists
fn check_cron_field(field: &str, min: u32, max: u32) -> bool {
    field.split(',').all(|part| {
        let (range, step) = match part.split_once('/') {
            Some((range, step)) => (range, Some(step)),
            None => (part, None),
        };
        if let Some(step) = step
            && !step.parse::<u32>().is_ok_and(|s| s > 0)
        {
            return false;
        }
        if range == "*" {
            return true;
        }
        match range.split_once('-') {
            Some((lo, hi)) => match (parse_cron_value(lo, min, max), parse_cron_value(hi, min, max)) {
                (Some(lo), Some(hi)) => lo <= hi,
                _ => false,
            },
            None => parse_cron_value(range, min, max).is_some(),
        }
    })
}

/// Validate a five-field cron expression, returning the normalized form
fn validate_cron(expression: &str) -> ServiceResult<String> {
    let fields: Vec<&str> = expression.split_whitespace().collect();
    if fields.len() != CRON_FIELDS.len() {
        return Err(ServiceError::validation_with(
            "Invalid cron expression",
            vec![format!(
                "cronExpression: expected 5 fields, found {}",
                fields.len()
            )],
        ));
    }
    let errors: Vec<String> = fields
        .iter()
        .zip(CRON_FIELDS)
        .filter(|(field, (_, min, max))| !check_cron_field(field, *min, *max))
        .map(|(field, (name, _, _))| format!("cronExpression: invalid {name} field '{field}'"))
        .collect();
    if !errors.is_empty() {
        return Err(ServiceError::validation_with("Invalid cron expression", errors));
    }
    Ok(fields.join(" "))
}

pub struct MemoryReportSchedulingService {
    schedules: MemoryTable<ReportScheduleDto>,
    runs: MemoryTable<ReportRunDto>,
    reports: Arc<dyn FinancialReportingService>,
}

impl MemoryReportSchedulingService {
    pub fn new(reports: Arc<dyn FinancialReportingService>) -> Self {
        Self {
            schedules: MemoryTable::new(),
            runs: MemoryTable::new(),
            reports,
        }
    }

    fn check_name_unique(&self, name: &str, except: Option<i64>) -> ServiceResult<()> {
        let taken = self
            .schedules
            .find(|s| Some(s.id) != except && s.name.eq_ignore_ascii_case(name))
            .is_some();
        if taken {
            return Err(ServiceError::conflict(format!(
                "A report schedule named '{name}' already exists"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ReportSchedulingService for MemoryReportSchedulingService {
    async fn list_schedules(&self) -> ServiceResult<Vec<ReportScheduleDto>> {
        Ok(self.schedules.values())
    }

    async fn get_schedule(&self, id: i64) -> ServiceResult<Option<ReportScheduleDto>> {
        Ok(self.schedules.get(id))
    }

    async fn create_schedule(
        &self,
        dto: CreateReportScheduleDto,
        created_by: &str,
    ) -> ServiceResult<ReportScheduleDto> {
        let name = required_trimmed(&dto.name, "name", "Invalid report schedule data")?;
        self.check_name_unique(&name, None)?;
        let cron_expression = validate_cron(&dto.cron_expression)?;
        let recipients = require_recipients(&dto.recipients)?;
        let now = Utc::now();

        Ok(self.schedules.insert_with(|id| ReportScheduleDto {
            id,
            name,
            report_type: dto.report_type,
            cron_expression,
            recipients,
            format: dto.format,
            is_active: dto.is_active,
            created_by: created_by.to_string(),
            last_run_at: None,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn update_schedule(
        &self,
        id: i64,
        dto: UpdateReportScheduleDto,
    ) -> ServiceResult<Option<ReportScheduleDto>> {
        let name = dto
            .name
            .as_deref()
            .map(|n| required_trimmed(n, "name", "Invalid report schedule data"))
            .transpose()?;
        if let Some(name) = &name {
            self.check_name_unique(name, Some(id))?;
        }
        let cron_expression = dto.cron_expression.as_deref().map(validate_cron).transpose()?;
        let recipients = dto.recipients.as_deref().map(require_recipients).transpose()?;

        self.schedules.update(id, |schedule| {
            if let Some(name) = name {
                schedule.name = name;
            }
            if let Some(report_type) = dto.report_type {
                schedule.report_type = report_type;
            }
            if let Some(cron_expression) = cron_expression {
                schedule.cron_expression = cron_expression;
            }
            if let Some(recipients) = recipients {
                schedule.recipients = recipients;
            }
            if let Some(format) = dto.format {
                schedule.format = format;
            }
            schedule.updated_at = Utc::now();
            Ok(schedule.clone())
        })
    }

    async fn delete_schedule(&self, id: i64) -> ServiceResult<bool> {
        Ok(self.schedules.remove_if(id, |_| Ok(()))?.is_some())
    }

    async fn toggle_schedule(
        &self,
        id: i64,
        is_active: bool,
    ) -> ServiceResult<Option<ReportScheduleDto>> {
        self.schedules.update(id, |schedule| {
            schedule.is_active = is_active;
            schedule.updated_at = Utc::now();
            Ok(schedule.clone())
        })
    }

    async fn run_now(&self, id: i64) -> ServiceResult<Option<ReportRunDto>> {
        let Some(schedule) = self.schedules.get(id) else {
            return Ok(None);
        };
        let started_at = Utc::now();
        let outcome = self
            .reports
            .export_report(ExportReportQuery {
                report_type: schedule.report_type,
                from: None,
                to: None,
            })
            .await;
        let finished_at = Utc::now();

        let run = self.runs.insert_with(|run_id| match outcome {
            Ok(export) => ReportRunDto {
                id: run_id,
                schedule_id: id,
                started_at,
                finished_at,
                status: ReportRunStatus::Completed,
                row_count: export.row_count,
                file_name: Some(export.file_name),
                error: None,
            },
            Err(e) => {
                tracing::warn!(schedule_id = id, error = %e, "Scheduled report run failed");
                ReportRunDto {
                    id: run_id,
                    schedule_id: id,
                    started_at,
                    finished_at,
                    status: ReportRunStatus::Failed,
                    row_count: 0,
                    file_name: None,
                    error: Some(e.to_string()),
                }
            }
        });

        // The schedule may have been deleted while the report ran
        self.schedules.update(id, |schedule| {
            schedule.last_run_at = Some(finished_at);
            Ok(())
        })?;
        Ok(Some(run))
    }

    async fn runs(&self, schedule_id: i64) -> ServiceResult<Option<Vec<ReportRunDto>>> {
        if self.schedules.get(schedule_id).is_none() {
            return Ok(None);
        }
        let mut runs = self.runs.filter(|r| r.schedule_id == schedule_id);
        runs.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(Some(runs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory::{MemoryExpenseService, MemoryFinancialReportingService};
    use shared::models::{ReportFormat, ReportType};

    fn service() -> MemoryReportSchedulingService {
        let expenses = Arc::new(MemoryExpenseService::new());
        let reports = Arc::new(MemoryFinancialReportingService::new(expenses));
        MemoryReportSchedulingService::new(reports)
    }

    fn create_dto(name: &str, cron: &str) -> CreateReportScheduleDto {
        CreateReportScheduleDto {
            name: name.into(),
            report_type: ReportType::ExpenseSummary,
            cron_expression: cron.into(),
            recipients: vec!["finance@example.com".into()],
            format: ReportFormat::Csv,
            is_active: true,
        }
    }

    #[test]
    fn test_validate_cron() {
        assert_eq!(validate_cron("0  8 * * 1-5").unwrap(), "0 8 * * 1-5");
        assert!(validate_cron("*/15 * * * *").is_ok());
        assert!(validate_cron("0 0 1,15 * *").is_ok());
        assert!(validate_cron("0 24 * * *").is_err());
        assert!(validate_cron("0 8 * *").is_err());
        assert!(validate_cron("*/0 * * * *").is_err());
        assert!(validate_cron("5-1 * * * *").is_err());
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let svc = service();
        let err = svc
            .create_schedule(create_dto("   ", "0 6 1 * *"), "user-1")
            .await
            .unwrap_err();
        assert!(
            matches!(&err, ServiceError::Validation { errors, .. } if errors == &["name: must not be blank"])
        );

        let schedule = svc
            .create_schedule(create_dto("Monthly", "0 6 1 * *"), "user-1")
            .await
            .unwrap();
        let err = svc
            .update_schedule(
                schedule.id,
                UpdateReportScheduleDto {
                    name: Some(" ".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name_and_bad_recipients() {
        let svc = service();
        svc.create_schedule(create_dto("Monthly", "0 6 1 * *"), "user-1")
            .await
            .unwrap();

        let err = svc
            .create_schedule(create_dto("monthly", "0 6 1 * *"), "user-1")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let mut dto = create_dto("Weekly", "0 6 * * 1");
        dto.recipients = vec!["not-an-email".into()];
        let err = svc.create_schedule(dto, "user-1").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_run_now_records_run() {
        let svc = service();
        let schedule = svc
            .create_schedule(create_dto("Daily", "0 7 * * *"), "user-1")
            .await
            .unwrap();

        let run = svc.run_now(schedule.id).await.unwrap().unwrap();
        assert_eq!(run.status, ReportRunStatus::Completed);
        assert_eq!(run.row_count, 0);
        assert!(run.file_name.unwrap().starts_with("expense-summary"));

        svc.run_now(schedule.id).await.unwrap();
        let runs = svc.runs(schedule.id).await.unwrap().unwrap();
        assert_eq!(runs.len(), 2);
        assert!(runs[0].id > runs[1].id);

        let schedule = svc.get_schedule(schedule.id).await.unwrap().unwrap();
        assert!(schedule.last_run_at.is_some());
    }

    #[tokio::test]
    async fn test_unknown_schedule() {
        let svc = service();
        assert!(svc.run_now(42).await.unwrap().is_none());
        assert!(svc.runs(42).await.unwrap().is_none());
        assert!(svc.toggle_schedule(42, false).await.unwrap().is_none());
        assert!(!svc.delete_schedule(42).await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle() {
        let svc = service();
        let schedule = svc
            .create_schedule(create_dto("Daily", "0 7 * * *"), "user-1")
            .await
            .unwrap();
        let toggled = svc.toggle_schedule(schedule.id, false).await.unwrap().unwrap();
        assert!(!toggled.is_active);
    }
}
