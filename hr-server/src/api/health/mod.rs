//! Health check route
//!
//! | Path | Method | Auth |
//! |------|------|------|
//! | /health | GET | none |
//!
//! ```json
//! { "success": true, "message": "Success",
//!   "data": { "status": "ok", "version": "0.1.0", "uptimeSeconds": 12 }, "errors": [] }
//! ```

use axum::{Json, Router, routing::get};
use serde::Serialize;
use std::time::SystemTime;

use crate::core::ServerState;
use crate::utils::ApiResponse;
use crate::utils::response::success;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
}

// Set on first use
static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

fn get_uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// GET /health
async fn health() -> Json<ApiResponse<HealthResponse>> {
    success(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: get_uptime_seconds(),
    })
}
