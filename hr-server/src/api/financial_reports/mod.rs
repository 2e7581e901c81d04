//! Financial Reports API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/FinancialReports/expense-summary",
            get(handler::expense_summary),
        )
        .route(
            "/api/FinancialReports/department-costs",
            get(handler::department_costs),
        )
        .route("/api/FinancialReports/export", get(handler::export))
        .route_layer(middleware::from_fn(require_permission("reports:view")))
}
