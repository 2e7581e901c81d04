//! Leave Management API Module
//!
//! Self-service routes need only a valid token; managing other employees'
//! leave needs `leave:manage`, deciding requests needs `leave:approve`.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let self_routes = Router::new()
        .route("/api/LeaveManagement/types", get(handler::leave_types))
        .route("/api/LeaveManagement/balances/my", get(handler::my_balances))
        .route("/api/LeaveManagement/requests", post(handler::submit))
        .route("/api/LeaveManagement/requests/my", get(handler::my_requests))
        .route("/api/LeaveManagement/requests/{id}", get(handler::get_by_id))
        .route("/api/LeaveManagement/requests/{id}/cancel", post(handler::cancel));

    let manage_routes = Router::new()
        .route("/api/LeaveManagement/balances/{employee_id}", get(handler::employee_balances))
        .route("/api/LeaveManagement/requests", get(handler::list))
        .route_layer(middleware::from_fn(require_permission("leave:manage")));

    let approve_routes = Router::new()
        .route("/api/LeaveManagement/requests/{id}/approve", post(handler::approve))
        .route("/api/LeaveManagement/requests/{id}/reject", post(handler::reject))
        .route_layer(middleware::from_fn(require_permission("leave:approve")));

    self_routes.merge(manage_routes).merge(approve_routes)
}
