use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::services::memory::{
    MemoryAssetService, MemoryEmailService, MemoryExpenseService, MemoryFinancialReportingService,
    MemoryLeaveService, MemoryNotificationService, MemoryReportSchedulingService,
    MemoryRoleService, MemorySetupService, MemoryShiftService, MemorySupportTicketService,
};
use crate::services::{
    AssetService, EmailService, ExpenseService, FinancialReportingService,
    LeaveManagementService, NotificationService, ReportSchedulingService, RoleService,
    SetupService, ShiftService, SupportTicketService,
};

/// Server state - shared references to every service port
///
/// Cloned into every handler; all fields are `Arc`s so a clone is cheap.
/// Ports are trait objects, so tests and alternative deployments can swap
/// any adapter after construction.
///
/// | Field | Port |
/// |------|------|
/// | assets | [`AssetService`] |
/// | leave | [`LeaveManagementService`] |
/// | shifts | [`ShiftService`] |
/// | expenses | [`ExpenseService`] |
/// | notifications | [`NotificationService`] |
/// | support_tickets | [`SupportTicketService`] |
/// | email | [`EmailService`] |
/// | financial_reports | [`FinancialReportingService`] |
/// | report_schedules | [`ReportSchedulingService`] |
/// | roles | [`RoleService`] |
/// | setup | [`SetupService`] |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub jwt_service: Arc<JwtService>,
    pub assets: Arc<dyn AssetService>,
    pub leave: Arc<dyn LeaveManagementService>,
    pub shifts: Arc<dyn ShiftService>,
    pub expenses: Arc<dyn ExpenseService>,
    pub notifications: Arc<dyn NotificationService>,
    pub support_tickets: Arc<dyn SupportTicketService>,
    pub email: Arc<dyn EmailService>,
    pub financial_reports: Arc<dyn FinancialReportingService>,
    pub report_schedules: Arc<dyn ReportSchedulingService>,
    pub roles: Arc<dyn RoleService>,
    pub setup: Arc<dyn SetupService>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("jwt_service", &self.jwt_service)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// State backed by the in-memory adapters
    pub fn in_memory(config: &Config) -> Self {
        let expenses: Arc<dyn ExpenseService> = Arc::new(MemoryExpenseService::new());
        let financial_reports: Arc<dyn FinancialReportingService> =
            Arc::new(MemoryFinancialReportingService::new(expenses.clone()));
        let roles: Arc<dyn RoleService> = Arc::new(MemoryRoleService::new());

        Self {
            config: config.clone(),
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            assets: Arc::new(MemoryAssetService::new()),
            leave: Arc::new(MemoryLeaveService::new()),
            shifts: Arc::new(MemoryShiftService::new()),
            notifications: Arc::new(MemoryNotificationService::new()),
            support_tickets: Arc::new(MemorySupportTicketService::new()),
            email: Arc::new(MemoryEmailService::new()),
            report_schedules: Arc::new(MemoryReportSchedulingService::new(
                financial_reports.clone(),
            )),
            setup: Arc::new(MemorySetupService::new(roles.clone())),
            expenses,
            financial_reports,
            roles,
        }
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
