//! Role API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/api/Role", get(handler::list))
        .route("/api/Role/{id}", get(handler::get_by_id))
        .route("/api/Role/permissions", get(handler::all_permissions))
        .route("/api/Role/user/{user_id}", get(handler::user_roles))
        .route_layer(middleware::from_fn(require_permission("roles:read")));

    let write_routes = Router::new()
        .route("/api/Role", post(handler::create))
        .route("/api/Role/{id}", put(handler::update).delete(handler::delete))
        .route("/api/Role/assign", post(handler::assign))
        .route_layer(middleware::from_fn(require_permission("roles:write")));

    let self_routes = Router::new().route("/api/Role/my-permissions", get(handler::my_permissions));

    read_routes.merge(write_routes).merge(self_routes)
}
