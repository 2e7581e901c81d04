//! Authentication middleware
//!
//! Axum middleware for JWT authentication and route permissions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::extractor::token_rejection;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

const SETUP_PREFIX: &str = "/api/Setup/";
const SETUP_STATUS_PATH: &str = "/api/Setup/status";

/// Require a valid bearer token
///
/// Verifies `Authorization: Bearer <token>` and stores the resulting
/// [`CurrentUser`] in the request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths (health, unknown routes fall through to 404)
/// - `/api/Setup/status`
/// - `/api/Setup/*` while the setup wizard is incomplete
///
/// # Errors
///
/// | Error | Status |
/// |------|------------|
/// | No Authorization header | 401 NotAuthenticated |
/// | Expired token | 401 TokenExpired |
/// | Invalid token | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path().to_owned();
    if !path.starts_with("/api/") || path == SETUP_STATUS_PATH {
        return Ok(next.run(req).await);
    }

    if path.starts_with(SETUP_PREFIX) && !state.setup.status().await?.is_complete {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = path.clone());
            return Err(AppError::unauthorized());
        }
    };

    match state.get_jwt_service().validate_token(token) {
        Ok(claims) => {
            req.extensions_mut().insert(CurrentUser::from(claims));
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!("WARN", "auth_failed", error = format!("{}", e), uri = path);
            Err(token_rejection(e))
        }
    }
}

/// Require a permission for every route of a router
///
/// Apply with `route_layer` so unmatched paths still fall through to the
/// 404 fallback:
///
/// ```ignore
/// Router::new()
///     .route("/", get(handler::list))
///     .route_layer(middleware::from_fn(require_permission("assets:read")));
/// ```
///
/// Missing permission answers 403.
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::unauthorized)?;

            if !user.has_permission(permission) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.log_id().to_string(),
                    required_permission = permission
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {}",
                    permission
                )));
            }

            Ok(next.run(req).await)
        })
    }
}
