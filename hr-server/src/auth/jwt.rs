//! JWT token service
//!
//! Verifies HS256 bearer tokens and turns their claims into the caller
//! identity ([`CurrentUser`]).

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::permissions::permission_matches;
use crate::security_log;
use crate::utils::{AppError, AppResult};

pub const DEFAULT_ISSUER: &str = "hr-server";
pub const DEFAULT_AUDIENCE: &str = "hr-clients";
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 1440;
/// Upper bound on token lifetime (one year)
pub const MAX_EXPIRATION_MINUTES: i64 = 525_600;
pub const MIN_SECRET_LEN: usize = 32;

/// Claim carrying the user id when `sub` is absent
pub const NAME_IDENTIFIER_CLAIM: &str =
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";
pub const EMPLOYEE_ID_CLAIM: &str = "EmployeeId";

/// Role that bypasses permission checks
pub const ADMIN_ROLE: &str = "Admin";

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HS256 key (at least 32 characters)
    pub secret: String,
    /// Lifetime of issued tokens (minutes)
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// Config with the default issuer, audience and lifetime
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }

    /// Config with a freshly generated secret (development only)
    pub fn generated() -> Self {
        Self::new(generate_secure_printable_jwt_secret())
    }
}

/// Claims carried by the token
///
/// Identity claims are optional at the type level; [`CurrentUser`]
/// accessors fail closed when the one a handler needs is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(
        rename = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name_identifier: Option<String>,
    /// String or number; must parse as a positive integer
    #[serde(rename = "EmployeeId", default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// Generate a 64-character alphanumeric secret
pub fn generate_secure_printable_jwt_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for a user
    pub fn generate_token(
        &self,
        user_id: &str,
        employee_id: Option<i64>,
        name: &str,
        role: &str,
        permissions: &[String],
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = Duration::try_minutes(self.config.expiration_minutes)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                JwtError::GenerationFailed(format!(
                    "token lifetime of {} minutes is out of range",
                    self.config.expiration_minutes
                ))
            })?;

        let claims = Claims {
            sub: Some(user_id.to_string()),
            name_identifier: None,
            employee_id: employee_id.map(serde_json::Value::from),
            name: Some(name.to_string()),
            role: Some(role.to_string()),
            permissions: permissions.to_vec(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        self.encode_claims(&claims)
    }

    /// Sign arbitrary claims with this service's key
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Verify signature, issuer, audience and expiry, then decode
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an `Authorization` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Positive integer from a string or number claim value
fn parse_employee_id(value: &serde_json::Value) -> Option<i64> {
    let id = match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    id.filter(|id| *id > 0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Caller identity, built from verified claims
///
/// Created by the auth middleware and injected into handlers through the
/// extractor. Identity accessors never fall back to a default identity.
///
/// ```ignore
/// async fn handler(user: CurrentUser) -> AppResult<Json<()>> {
///     let employee_id = user.employee_id()?;
///     if user.has_permission("leave:manage") { /* ... */ }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    user_id: Option<String>,
    employee_id: Option<i64>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub permissions: Vec<String>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: non_empty(claims.sub).or_else(|| non_empty(claims.name_identifier)),
            employee_id: claims.employee_id.as_ref().and_then(parse_employee_id),
            name: non_empty(claims.name),
            role: non_empty(claims.role),
            permissions: claims.permissions,
        }
    }
}

impl CurrentUser {
    /// User id from `sub`, falling back to the name-identifier claim
    pub fn user_id(&self) -> AppResult<&str> {
        self.user_id.as_deref().ok_or_else(|| {
            security_log!("WARN", "identity_claim_missing", claim = "sub");
            AppError::identity_claim_missing("sub")
        })
    }

    /// Employee id from the `EmployeeId` claim
    pub fn employee_id(&self) -> AppResult<i64> {
        self.employee_id.ok_or_else(|| {
            security_log!("WARN", "identity_claim_missing", claim = EMPLOYEE_ID_CLAIM);
            AppError::identity_claim_missing(EMPLOYEE_ID_CLAIM)
        })
    }

    /// Best-effort label for logs
    pub fn log_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or("-")
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }

    /// Whether the caller holds `permission`
    ///
    /// The Admin role and the `all` permission grant everything;
    /// `module:*` grants every permission of that module.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_admin()
            || self
                .permissions
                .iter()
                .any(|granted| permission_matches(granted, permission))
    }

    /// Allow when the caller holds `permission` or owns the resource
    pub fn can_access_owned(&self, owner_employee_id: i64, permission: &str) -> AppResult<()> {
        if self.has_permission(permission) {
            return Ok(());
        }
        if self.employee_id()? == owner_employee_id {
            return Ok(());
        }
        security_log!(
            "WARN",
            "resource_access_denied",
            user_id = self.log_id().to_string(),
            required_permission = permission
        );
        Err(AppError::access_denied(
            "You do not have access to this resource",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig::new("test-secret-key-with-at-least-32-chars!!"))
    }

    fn claims(service: &JwtService) -> Claims {
        Claims {
            exp: Utc::now().timestamp() + 600,
            iat: Utc::now().timestamp(),
            iss: service.config.issuer.clone(),
            aud: service.config.audience.clone(),
            ..Default::default()
        }
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let service = service();
        let permissions = vec!["assets:read".to_string(), "leave:*".to_string()];

        let token = service
            .generate_token("user-42", Some(42), "Jane Doe", "Manager", &permissions)
            .expect("Failed to generate test token");
        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.sub.as_deref(), Some("user-42"));
        assert_eq!(claims.role.as_deref(), Some("Manager"));
        assert_eq!(claims.permissions, permissions);

        let user = CurrentUser::from(claims);
        assert_eq!(user.user_id().unwrap(), "user-42");
        assert_eq!(user.employee_id().unwrap(), 42);
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let service = service();
        let mut claims = claims(&service);
        claims.aud = "someone-else".into();
        let token = service.encode_claims(&claims).unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        let service = service();
        let mut claims = claims(&service);
        claims.exp = Utc::now().timestamp() - 3600;
        let token = service.encode_claims(&claims).unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_out_of_range_lifetime_fails_generation() {
        let mut config = JwtConfig::new("test-secret-key-with-at-least-32-chars!!");
        config.expiration_minutes = i64::MAX;
        let service = JwtService::with_config(config);
        assert!(matches!(
            service.generate_token("user-1", Some(1), "Ada", "Admin", &[]),
            Err(JwtError::GenerationFailed(_))
        ));
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let other = JwtService::with_config(JwtConfig::generated());
        let token = other.encode_claims(&claims(&other)).unwrap();
        assert!(matches!(
            service().validate_token(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_employee_id_claim_forms() {
        let service = service();
        let cases = [
            (serde_json::json!("17"), Some(17)),
            (serde_json::json!(17), Some(17)),
            (serde_json::json!("abc"), None),
            (serde_json::json!(0), None),
            (serde_json::json!(-3), None),
            (serde_json::json!(true), None),
        ];
        for (value, expected) in cases {
            let mut claims = claims(&service);
            claims.employee_id = Some(value);
            let user = CurrentUser::from(claims);
            assert_eq!(user.employee_id().ok(), expected);
        }
    }

    #[test]
    fn test_missing_identity_fails_closed() {
        let user = CurrentUser::from(claims(&service()));
        let err = user.employee_id().unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::IdentityClaimMissing);
        assert!(user.user_id().is_err());
    }

    #[test]
    fn test_name_identifier_fallback() {
        let json = serde_json::json!({
            "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier": "user-9",
            "exp": 1, "iss": "hr-server", "aud": "hr-clients"
        });
        let claims: Claims = serde_json::from_value(json).unwrap();
        let user = CurrentUser::from(claims);
        assert_eq!(user.user_id().unwrap(), "user-9");
    }

    #[test]
    fn test_current_user_permissions() {
        let mut claims = claims(&service());
        claims.permissions = vec!["assets:read".into(), "leave:*".into()];
        let user = CurrentUser::from(claims);

        assert!(user.has_permission("assets:read"));
        assert!(user.has_permission("leave:approve"));
        assert!(!user.has_permission("roles:write"));
    }

    #[test]
    fn test_admin_role_has_all_permissions() {
        let mut claims = claims(&service());
        claims.role = Some("Admin".into());
        let admin = CurrentUser::from(claims);
        assert!(admin.has_permission("roles:write"));
        assert!(admin.is_admin());
    }

    #[test]
    fn test_can_access_owned() {
        let mut claims = claims(&service());
        claims.employee_id = Some(serde_json::json!(5));
        let user = CurrentUser::from(claims);

        assert!(user.can_access_owned(5, "leave:manage").is_ok());
        let err = user.can_access_owned(6, "leave:manage").unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::ResourceAccessDenied);
    }

    #[test]
    fn test_generated_secret() {
        let a = generate_secure_printable_jwt_secret();
        let b = generate_secure_printable_jwt_secret();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
