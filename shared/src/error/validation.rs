//! Conversion of request-model validation failures into [`AppError`]

use super::types::AppError;
use validator::ValidationErrors;

/// Message of the envelope returned for invalid request models
pub const INVALID_MODEL_MESSAGE: &str = "Invalid request data";

/// Flatten validator output into ordered `field: message` strings
pub fn flatten_validation_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, messages)| {
            messages
                .into_iter()
                .map(move |m| format!("{field}: {m}"))
        })
        .collect()
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::validation(INVALID_MODEL_MESSAGE).with_errors(flatten_validation_errors(&errors))
    }
}
