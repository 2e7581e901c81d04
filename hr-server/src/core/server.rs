//! Server Implementation
//!
//! Router assembly and the HTTP listener

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::{Config, ServerState};
use crate::utils::AppError;

/// HTTP access log
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        request_id = %request_id,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "{} {} {}",
        method,
        uri,
        response.status()
    );

    response
}

/// Unmatched routes answer with a 404 envelope
async fn fallback(uri: http::Uri) -> AppError {
    AppError::not_found(format!("No route for {}", uri.path()))
}

/// Known path, unsupported method: answered like an unknown route
async fn method_fallback(method: http::Method, uri: http::Uri) -> AppError {
    AppError::not_found(format!("No route for {method} {}", uri.path()))
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    crate::api::router()
}

/// Build the complete application: routes, auth and tower-http layers
pub fn build_router(state: ServerState) -> Router {
    let cors_allow_any = state.config.cors_allow_any;

    let app = build_app()
        .fallback(fallback)
        .method_not_allowed_fallback(method_fallback)
        // require_auth skips public routes itself
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    let app = if cors_allow_any {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    // Outermost last: request id is set before tracing and the access log run
    app.layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn new(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let app = build_router(self.state.clone());
        let addr = self.config.bind_addr();

        let listener = tokio::net::TcpListener::bind(addr.as_str())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind {addr}: {e}"))?;
        tracing::info!("HR server listening on {}", addr);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
