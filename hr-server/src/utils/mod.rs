//! Utilities - logger, response helpers and request extractors
//!
//! - [`AppError`] / [`ApiResponse`] come from `shared::error`
//! - [`response`] builds the envelope for handlers
//! - [`extract`] wraps axum extractors so rejections stay enveloped

pub mod extract;
pub mod logger;
pub mod response;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
