//! Asset Assignment API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let assign_routes = Router::new()
        .route("/api/AssetAssignment/assign-to-employee", post(handler::assign))
        .route("/api/AssetAssignment/{id}/return", post(handler::return_asset))
        .route_layer(middleware::from_fn(require_permission("assets:assign")));

    let read_routes = Router::new()
        .route("/api/AssetAssignment/employee/{employee_id}", get(handler::employee_assignments))
        .route("/api/AssetAssignment/asset/{asset_id}/history", get(handler::asset_history))
        .route_layer(middleware::from_fn(require_permission("assets:read")));

    // Any authenticated employee
    let self_routes =
        Router::new().route("/api/AssetAssignment/my-assets", get(handler::my_assets));

    assign_routes.merge(read_routes).merge(self_routes)
}
