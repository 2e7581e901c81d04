//! Data models
//!
//! Request/response DTOs of every controller. Field names are camelCase on
//! the wire; enum variants serialize as their PascalCase names. All IDs are
//! `i64`, user ids (token subject) are strings.

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

// Re-exports
pub use asset::*;
pub use email::*;
pub use expense::*;
pub use financial_report::*;
pub use leave::*;
pub use notification::*;
pub use report_schedule::*;
pub use role::*;
pub use setup::*;
pub use shift::*;
pub use support_ticket::*;
