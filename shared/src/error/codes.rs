//! Unified error codes for the HR server
//!
//! Codes never travel on the wire (the envelope carries only
//! `success`/`message`/`data`/`errors`); they drive the HTTP status mapping
//! and show up in server-side logs.
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 9xxx: System errors

use std::fmt;

/// Unified error code enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Request model or argument validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists or conflicts with current state
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Operation not allowed in the resource's current state
    InvalidOperation = 6,

    // ==================== 1xxx: Auth ====================
    /// No bearer token supplied
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid (signature, issuer, audience, format)
    TokenInvalid = 1004,
    /// Token verified but a required identity claim is absent or malformed
    IdentityClaimMissing = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied by route guard
    PermissionDenied = 2001,
    /// Caller may not touch this particular resource
    ResourceAccessDenied = 2002,

    // ==================== 9xxx: System ====================
    /// Unexpected failure
    InternalError = 9001,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidOperation => "Operation is not allowed in the current state",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::IdentityClaimMissing => "Caller identity could not be determined",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::ResourceAccessDenied => "Access to this resource is denied",

            // System
            ErrorCode::InternalError => "An unexpected error occurred",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(ErrorCode::NotFound.to_string(), "E0003");
        assert_eq!(ErrorCode::IdentityClaimMissing.to_string(), "E1008");
    }
}
