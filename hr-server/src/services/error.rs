//! Service-layer error type
//!
//! Ports return [`ServiceError`]; handlers propagate it with `?` and the
//! `From<ServiceError> for AppError` conversion picks the HTTP status.
//!
//! | Kind | Status |
//! |------|--------|
//! | `Validation` | 400 (message + field errors) |
//! | `InvalidOperation` | 400 |
//! | `Conflict` | 409 |
//! | `Unauthorized` | 403 |
//! | `NotFound` | 404 |
//! | `Internal` | 500, generic message, detail logged |

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Argument or business-rule validation failure
    #[error("{message}")]
    Validation { message: String, errors: Vec<String> },

    /// Operation not allowed in the resource's current state
    #[error("{0}")]
    InvalidOperation(String),

    /// Conflicts with existing state (duplicate, already assigned, ...)
    #[error("{0}")]
    Conflict(String),

    /// Caller may not act on this resource
    #[error("{0}")]
    Unauthorized(String),

    /// Referenced resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Anything unexpected; never shown to clients
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn validation_with(message: impl Into<String>, errors: Vec<String>) -> Self {
        ServiceError::Validation {
            message: message.into(),
            errors,
        }
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        ServiceError::InvalidOperation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ServiceError::Conflict(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ServiceError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation { message, errors } => {
                AppError::validation(message).with_errors(errors)
            }
            ServiceError::InvalidOperation(message) => AppError::invalid_operation(message),
            ServiceError::Conflict(message) => AppError::conflict(message),
            ServiceError::Unauthorized(message) => AppError::access_denied(message),
            ServiceError::NotFound(message) => AppError::not_found(message),
            ServiceError::Internal(err) => {
                tracing::error!(error = ?err, "Service internal error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Trims a required string, rejecting values that are blank once trimmed.
///
/// `context` is the envelope message; `field` names the camelCase field in
/// the error list.
pub fn required_trimmed(value: &str, field: &str, context: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation_with(
            context,
            vec![format!("{field}: must not be blank")],
        ));
    }
    Ok(trimmed.to_string())
}
