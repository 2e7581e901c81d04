//! Shared types for the HR server
//!
//! Wire-level types used by the server and its clients: the response
//! envelope, error codes and every request/response DTO.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
