//! API routes
//!
//! One module per controller; each exposes `router()` with absolute
//! `/api/...` paths and its own permission layers.
//!
//! - [`health`] - liveness probe (public)
//! - [`assets`] - asset catalogue
//! - [`asset_assignment`] - handing assets to employees
//! - [`leave`] - leave types, balances and requests
//! - [`shifts`] - shift scheduling
//! - [`shift_swap`] - swaps and coverage
//! - [`expenses`] - expense claims
//! - [`notifications`] - per-user inbox
//! - [`support_tickets`] - helpdesk tickets
//! - [`email`] - campaigns and transactional mail
//! - [`financial_reports`] - expense reporting and CSV export
//! - [`report_schedules`] - scheduled reports
//! - [`roles`] - RBAC roles and assignments
//! - [`setup`] - first-run setup wizard

use axum::Router;

use crate::core::ServerState;

pub mod asset_assignment;
pub mod assets;
pub mod email;
pub mod expenses;
pub mod financial_reports;
pub mod health;
pub mod leave;
pub mod notifications;
pub mod report_schedules;
pub mod roles;
pub mod setup;
pub mod shift_swap;
pub mod shifts;
pub mod support_tickets;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// All API routes (without state)
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(setup::router())
        .merge(roles::router())
        .merge(assets::router())
        .merge(asset_assignment::router())
        .merge(leave::router())
        .merge(shifts::router())
        .merge(shift_swap::router())
        .merge(expenses::router())
        .merge(notifications::router())
        .merge(support_tickets::router())
        .merge(email::router())
        .merge(financial_reports::router())
        .merge(report_schedules::router())
}
