//! In-memory setup wizard
//!
//! Steps run in order: company, admin, defaults, complete. Once the wizard
//! is complete every step answers with a conflict.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{
    AdminSetupDto, AssignRoleDto, CompanySetupDto, DefaultsSetupDto, SetupAdminResultDto,
    SetupStatusDto, SetupStep,
};
use tokio::sync::RwLock;

use crate::services::error::required_trimmed;
use crate::services::{RoleService, ServiceError, ServiceResult, SetupService};

/// Role granted to the administrator created by the wizard
pub const ADMIN_ROLE: &str = "Admin";

#[derive(Debug, Clone)]
struct AdminAccount {
    user_id: String,
    employee_id: i64,
    email: String,
    full_name: String,
    /// Argon2 PHC string; nothing outside the tests verifies it yet
    #[cfg_attr(not(test), allow(dead_code))]
    password_hash: String,
}

#[derive(Debug, Default)]
struct WizardState {
    company: Option<CompanySetupDto>,
    admin: Option<AdminAccount>,
    defaults: Option<DefaultsSetupDto>,
    completed_at: Option<DateTime<Utc>>,
}

impl WizardState {
    fn completed_steps(&self) -> Vec<SetupStep> {
        let mut steps = Vec::new();
        if self.company.is_some() {
            steps.push(SetupStep::Company);
        }
        if self.admin.is_some() {
            steps.push(SetupStep::Admin);
        }
        if self.defaults.is_some() {
            steps.push(SetupStep::Defaults);
        }
        if self.completed_at.is_some() {
            steps.push(SetupStep::Complete);
        }
        steps
    }

    fn next_step(&self) -> Option<SetupStep> {
        if self.company.is_none() {
            Some(SetupStep::Company)
        } else if self.admin.is_none() {
            Some(SetupStep::Admin)
        } else if self.defaults.is_none() {
            Some(SetupStep::Defaults)
        } else if self.completed_at.is_none() {
            Some(SetupStep::Complete)
        } else {
            None
        }
    }

    fn status(&self) -> SetupStatusDto {
        SetupStatusDto {
            is_complete: self.completed_at.is_some(),
            completed_steps: self.completed_steps(),
            next_step: self.next_step(),
            company_name: self.company.as_ref().map(|c| c.company_name.clone()),
            completed_at: self.completed_at,
        }
    }

    /// Reject steps after completion and steps whose predecessor is missing
    fn ensure_can_run(&self, step: SetupStep) -> ServiceResult<()> {
        if self.completed_at.is_some() {
            return Err(ServiceError::conflict("Setup has already been completed"));
        }
        let missing = match step {
            SetupStep::Company => None,
            SetupStep::Admin => self.company.is_none().then_some(SetupStep::Company),
            SetupStep::Defaults => self.admin.is_none().then_some(SetupStep::Admin),
            SetupStep::Complete => self.defaults.is_none().then_some(SetupStep::Defaults),
        };
        match missing {
            Some(missing) => Err(ServiceError::invalid_operation(format!(
                "Setup step {missing:?} must be completed before {step:?}"
            ))),
            None => Ok(()),
        }
    }
}

fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub struct MemorySetupService {
    state: RwLock<WizardState>,
    roles: Arc<dyn RoleService>,
}

impl MemorySetupService {
    pub fn new(roles: Arc<dyn RoleService>) -> Self {
        Self {
            state: RwLock::new(WizardState::default()),
            roles,
        }
    }
}

#[async_trait]
impl SetupService for MemorySetupService {
    async fn status(&self) -> ServiceResult<SetupStatusDto> {
        Ok(self.state.read().await.status())
    }

    async fn configure_company(&self, dto: CompanySetupDto) -> ServiceResult<SetupStatusDto> {
        let mut state = self.state.write().await;
        state.ensure_can_run(SetupStep::Company)?;
        let company_name =
            required_trimmed(&dto.company_name, "companyName", "Invalid company data")?;
        state.company = Some(CompanySetupDto {
            company_name,
            currency: dto.currency.to_ascii_uppercase(),
            ..dto
        });
        tracing::info!("Setup: company profile saved");
        Ok(state.status())
    }

    async fn create_admin(&self, dto: AdminSetupDto) -> ServiceResult<SetupAdminResultDto> {
        let mut state = self.state.write().await;
        state.ensure_can_run(SetupStep::Admin)?;
        if state.admin.is_some() {
            return Err(ServiceError::conflict("An administrator has already been created"));
        }
        let full_name =
            required_trimmed(&dto.full_name, "fullName", "Invalid administrator data")?;

        let password = dto.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .context("password hashing task failed")?
            .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?;

        let admin_role = self
            .roles
            .find_role_by_name(ADMIN_ROLE)
            .await?
            .ok_or_else(|| anyhow::anyhow!("system role '{ADMIN_ROLE}' is missing"))?;

        let account = AdminAccount {
            user_id: "user-1".to_string(),
            employee_id: 1,
            email: dto.email.trim().to_ascii_lowercase(),
            full_name,
            password_hash,
        };
        self.roles
            .assign_role(AssignRoleDto {
                user_id: account.user_id.clone(),
                role_id: admin_role.id,
            })
            .await?;

        tracing::info!(user_id = %account.user_id, "Setup: administrator created");
        let result = SetupAdminResultDto {
            user_id: account.user_id.clone(),
            employee_id: account.employee_id,
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            role: admin_role.name,
            token: None,
        };
        state.admin = Some(account);
        Ok(result)
    }

    async fn apply_defaults(&self, dto: DefaultsSetupDto) -> ServiceResult<SetupStatusDto> {
        let mut state = self.state.write().await;
        state.ensure_can_run(SetupStep::Defaults)?;

        let mut departments: Vec<String> = Vec::new();
        for department in dto.departments.iter().map(|d| d.trim()) {
            if department.is_empty() {
                return Err(ServiceError::validation_with(
                    "Invalid defaults",
                    vec!["departments: names must not be blank".into()],
                ));
            }
            if !departments.iter().any(|d| d.eq_ignore_ascii_case(department)) {
                departments.push(department.to_string());
            }
        }
        state.defaults = Some(DefaultsSetupDto { departments, ..dto });
        tracing::info!("Setup: organisation defaults applied");
        Ok(state.status())
    }

    async fn complete(&self) -> ServiceResult<SetupStatusDto> {
        let mut state = self.state.write().await;
        state.ensure_can_run(SetupStep::Complete)?;
        state.completed_at = Some(Utc::now());
        tracing::info!("Setup completed");
        Ok(state.status())
    }
}
