//! In-memory service adapters
//!
//! One adapter per service port. They keep state in process memory and
//! are what the binary wires up by default; swap them for persistent
//! adapters through [`crate::core::ServerState`].

mod table;

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

pub use table::MemoryTable;

pub use asset::MemoryAssetService;
pub use email::{MemoryEmailService, OutboxMessage};
pub use expense::MemoryExpenseService;
pub use financial_report::MemoryFinancialReportingService;
pub use leave::MemoryLeaveService;
pub use notification::MemoryNotificationService;
pub use report_schedule::MemoryReportSchedulingService;
pub use role::MemoryRoleService;
pub use setup::MemorySetupService;
pub use shift::MemoryShiftService;
pub use support_ticket::MemorySupportTicketService;
