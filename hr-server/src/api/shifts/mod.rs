//! Shift API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/api/Shift", get(handler::list))
        .route("/api/Shift/{id}", get(handler::get_by_id))
        .route_layer(middleware::from_fn(require_permission("shifts:read")));

    let manage_routes = Router::new()
        .route("/api/Shift", post(handler::create))
        .route(
            "/api/Shift/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
        .route("/api/Shift/{id}/assign", post(handler::assign))
        .route_layer(middleware::from_fn(require_permission("shifts:manage")));

    let self_routes = Router::new().route("/api/Shift/my", get(handler::my_shifts));

    read_routes.merge(manage_routes).merge(self_routes)
}
