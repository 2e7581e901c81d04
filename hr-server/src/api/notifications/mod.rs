//! Notification API Module
//!
//! Inbox routes act on the caller's own notifications; sending needs
//! `notifications:send`.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let inbox_routes = Router::new()
        .route("/api/Notification", get(handler::list))
        .route("/api/Notification/unread-count", get(handler::unread_count))
        .route("/api/Notification/read-all", post(handler::mark_all_read))
        .route("/api/Notification/{id}", axum::routing::delete(handler::delete))
        .route("/api/Notification/{id}/read", post(handler::mark_read))
        .route(
            "/api/Notification/preferences",
            get(handler::preferences).put(handler::update_preferences),
        );

    let send_routes = Router::new()
        .route("/api/Notification", post(handler::send))
        .route_layer(middleware::from_fn(require_permission("notifications:send")));

    inbox_routes.merge(send_routes)
}
