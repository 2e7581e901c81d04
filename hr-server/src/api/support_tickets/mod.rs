//! Support Ticket API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let self_routes = Router::new()
        .route("/api/SupportTicket", post(handler::create))
        .route("/api/SupportTicket/my", get(handler::my_tickets))
        .route("/api/SupportTicket/{id}", get(handler::get_by_id))
        .route(
            "/api/SupportTicket/{id}/comments",
            get(handler::comments).post(handler::add_comment),
        );

    let manage_routes = Router::new()
        .route("/api/SupportTicket", get(handler::list))
        .route("/api/SupportTicket/{id}/status", put(handler::update_status))
        .route("/api/SupportTicket/{id}/assign", post(handler::assign))
        .route_layer(middleware::from_fn(require_permission("support:manage")));

    self_routes.merge(manage_routes)
}
