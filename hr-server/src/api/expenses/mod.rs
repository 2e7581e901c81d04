//! Expense API Module
//!
//! Employees manage their own drafts; `expenses:read_all` lists everyone's
//! claims and `expenses:approve` decides them.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let self_routes = Router::new()
        .route("/api/Expense", post(handler::create))
        .route("/api/Expense/categories", get(handler::categories))
        .route("/api/Expense/my", get(handler::my_expenses))
        .route("/api/Expense/validate", post(handler::validate))
        .route(
            "/api/Expense/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/api/Expense/{id}/submit", post(handler::submit));

    let read_all_routes = Router::new()
        .route("/api/Expense", get(handler::list))
        .route_layer(middleware::from_fn(require_permission("expenses:read_all")));

    let approve_routes = Router::new()
        .route("/api/Expense/{id}/approve", post(handler::approve))
        .route("/api/Expense/{id}/reject", post(handler::reject))
        .route_layer(middleware::from_fn(require_permission("expenses:approve")));

    self_routes.merge(read_all_routes).merge(approve_routes)
}
