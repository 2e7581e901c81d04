//! Error types and the API response envelope

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used by success envelopes when the caller gives none
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Success";

/// Application error with structured error code and field errors
///
/// Rendered to clients as a failure envelope. System-category errors keep
/// their message for the server log only; the client sees the code's
/// generic message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Ordered field/detail errors, copied to the envelope's `errors`
    pub errors: Vec<String>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            errors: Vec::new(),
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Replace the error list
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    /// Append one entry to the error list
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.errors.push(error.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Message safe to show to the client
    pub fn client_message(&self) -> &str {
        if self.code.category() == ErrorCategory::System {
            self.code.message()
        } else {
            &self.message
        }
    }

    // ==================== Convenience constructors ====================

    /// Validation error (400)
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Generic bad request (400)
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Operation not allowed in the current state (400)
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidOperation, msg)
    }

    /// Not found with the message used verbatim (404)
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, msg)
    }

    /// Conflict with existing state (409)
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    /// Missing bearer token (401)
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Expired token (401)
    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// Invalid token (401)
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    /// Verified token without a usable identity claim (401)
    pub fn identity_claim_missing(claim: &str) -> Self {
        Self::with_message(
            ErrorCode::IdentityClaimMissing,
            format!("Invalid or missing '{claim}' claim"),
        )
    }

    /// Route permission denied (403)
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Resource-level access denied (403)
    pub fn access_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ResourceAccessDenied, msg)
    }

    /// Unexpected failure (500); the message is logged, not returned
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}

/// Uniform API response envelope
///
/// ```json
/// { "success": true, "message": "Success", "data": { ... }, "errors": [] }
/// ```
///
/// `data` is always serialized (as `null` when absent) and `errors` is
/// always an array.
/// Handlers return it wrapped in `Json`; failure envelopes are only
/// rendered through [`AppError`], which picks the status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl<T> ApiResponse<T> {
    /// Success envelope carrying `data` with the default message
    pub fn success(data: T) -> Self {
        Self::success_with_message(data, DEFAULT_SUCCESS_MESSAGE)
    }

    /// Success envelope carrying `data` with a custom message
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Failure envelope; `data` is always null
    pub fn error(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors,
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope without payload
    pub fn ok() -> Self {
        Self::ok_with_message(DEFAULT_SUCCESS_MESSAGE)
    }

    /// Success envelope without payload, custom message
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            errors: Vec::new(),
        }
    }
}

impl<T> From<&AppError> for ApiResponse<T> {
    fn from(err: &AppError) -> Self {
        if err.code.category() == ErrorCategory::System {
            Self::error(err.client_message(), Vec::new())
        } else {
            Self::error(err.client_message(), err.errors.clone())
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        if self.code.category() == ErrorCategory::System {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        } else {
            tracing::debug!(code = %self.code, message = %self.message, "Request failed");
        }

        let body = ApiResponse::<()>::from(&self);
        (status, Json(body)).into_response()
    }
}
