//! Setup Wizard API Module
//!
//! Public until the wizard completes; `require_auth` enforces that.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/Setup/status", get(handler::status))
        .route("/api/Setup/company", post(handler::company))
        .route("/api/Setup/admin", post(handler::admin))
        .route("/api/Setup/defaults", post(handler::defaults))
        .route("/api/Setup/complete", post(handler::complete))
}
