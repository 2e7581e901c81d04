//! Service ports
//!
//! Each controller talks to exactly one port through `Arc<dyn XService>`.
//! [`memory`] holds the in-process reference adapters wired by
//! `ServerState::in_memory`.

pub mod error;
pub mod memory;

pub mod asset;
pub mod email;
pub mod expense;
pub mod financial_report;
pub mod leave;
pub mod notification;
pub mod report_schedule;
pub mod role;
pub mod setup;
pub mod shift;
pub mod support_ticket;

pub use asset::AssetService;
pub use email::EmailService;
pub use error::{ServiceError, ServiceResult};
pub use expense::ExpenseService;
pub use financial_report::FinancialReportingService;
pub use leave::LeaveManagementService;
pub use notification::NotificationService;
pub use report_schedule::ReportSchedulingService;
pub use role::RoleService;
pub use setup::SetupService;
pub use shift::ShiftService;
pub use support_ticket::SupportTicketService;
