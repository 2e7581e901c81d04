//! Asset API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

/// Asset router - read needs `assets:read`, writes need `assets:manage`
pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .nest("/api/Asset", read_routes())
        .route_layer(middleware::from_fn(require_permission("assets:read")));

    let write_routes = Router::new()
        .nest("/api/Asset", write_routes())
        .route_layer(middleware::from_fn(require_permission("assets:manage")));

    read_routes.merge(write_routes)
}

fn read_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
}

fn write_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", axum::routing::put(handler::update).delete(handler::delete))
}
