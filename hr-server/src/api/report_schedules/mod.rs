//! Report Schedules API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/ReportSchedules",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/ReportSchedules/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/api/ReportSchedules/{id}/toggle", post(handler::toggle))
        .route("/api/ReportSchedules/{id}/run", post(handler::run_now))
        .route("/api/ReportSchedules/{id}/runs", get(handler::runs))
        .route_layer(middleware::from_fn(require_permission("reports:schedule")))
}
