//! Unified error system for the HR server
//!
//! - [`ErrorCode`]: Standardized error codes, mapped to HTTP statuses
//! - [`ErrorCategory`]: Classification of errors by code range
//! - [`AppError`]: Error type rendered as a failure envelope
//! - [`ApiResponse`]: The `{success, message, data, errors}` envelope
//!
//! # Example
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::validation("Invalid request data")
//!     .with_error("name: must not be empty");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//!
//! let response = ApiResponse::<()>::from(&err);
//! assert!(!response.success);
//! assert_eq!(response.errors, vec!["name: must not be empty"]);
//! ```

mod category;
mod codes;
mod http;
mod types;
mod validation;

pub use category::ErrorCategory;
pub use codes::ErrorCode;
pub use types::{ApiResponse, AppError, AppResult, DEFAULT_SUCCESS_MESSAGE};
pub use validation::{INVALID_MODEL_MESSAGE, flatten_validation_errors};
