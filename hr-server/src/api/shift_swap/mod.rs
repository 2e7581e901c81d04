//! Shift Swap & Coverage API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let self_routes = Router::new()
        .route("/api/ShiftSwap", post(handler::create_swap))
        .route("/api/ShiftSwap/my", get(handler::my_swaps))
        .route("/api/ShiftSwap/{id}/respond", post(handler::respond))
        .route("/api/ShiftSwap/{id}/cancel", post(handler::cancel_swap))
        .route("/api/ShiftSwap/coverage", post(handler::create_coverage))
        .route("/api/ShiftSwap/coverage/open", get(handler::open_coverage))
        .route("/api/ShiftSwap/coverage/{id}/claim", post(handler::claim_coverage));

    let approve_routes = Router::new()
        .route("/api/ShiftSwap", get(handler::list_swaps))
        .route("/api/ShiftSwap/{id}/approve", post(handler::approve_swap))
        .route("/api/ShiftSwap/{id}/reject", post(handler::reject_swap))
        .route("/api/ShiftSwap/coverage/{id}/approve", post(handler::approve_coverage))
        .route_layer(middleware::from_fn(require_permission("shift_swaps:approve")));

    self_routes.merge(approve_routes)
}
