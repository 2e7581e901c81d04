//! Response envelope helpers
//!
//! Success paths build `Json<ApiResponse<T>>`; failure paths build an
//! [`AppError`] whose `IntoResponse` renders the same envelope with the
//! mapped status.

use axum::Json;
use http::StatusCode;

use super::{ApiResponse, AppError, AppResult};

/// 200 with `data` and the default message
pub fn success<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// 200 with `data` and a custom message
pub fn success_with_message<T>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(data, message))
}

/// 200 without payload (`data: null`)
pub fn success_message(message: impl Into<String>) -> Json<ApiResponse<()>> {
    Json(ApiResponse::ok_with_message(message))
}

/// 201 with the created resource
pub fn created<T>(data: T, message: impl Into<String>) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(data, message)),
    )
}

/// 400 failure envelope
pub fn error(message: impl Into<String>, errors: Vec<String>) -> AppError {
    AppError::bad_request(message).with_errors(errors)
}

/// 404 failure envelope
pub fn not_found_error(message: impl Into<String>, errors: Vec<String>) -> AppError {
    AppError::not_found(message).with_errors(errors)
}

/// Turn a lookup result into the resource or a 404
pub fn found<T>(value: Option<T>, entity: &str, id: impl std::fmt::Display) -> AppResult<T> {
    value.ok_or_else(|| not_found_error(format!("{entity} with ID {id} not found"), Vec::new()))
}
