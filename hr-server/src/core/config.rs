use thiserror::Error;

use crate::auth::JwtConfig;
use crate::auth::jwt::{
    DEFAULT_AUDIENCE, DEFAULT_EXPIRATION_MINUTES, DEFAULT_ISSUER, MAX_EXPIRATION_MINUTES,
    MIN_SECRET_LEN, generate_secure_printable_jwt_secret,
};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set when ENVIRONMENT is '{0}'")]
    MissingJwtSecret(String),

    #[error("JWT_SECRET must be at least {MIN_SECRET_LEN} characters long")]
    WeakJwtSecret,

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|--------|------|
/// | HTTP_HOST | 0.0.0.0 | bind address |
/// | HTTP_PORT | 5000 | bind port |
/// | ENVIRONMENT | development | development / staging / production |
/// | JWT_SECRET | generated in development | HS256 key, at least 32 chars |
/// | JWT_ISSUER | hr-server | expected `iss` |
/// | JWT_AUDIENCE | hr-clients | expected `aud` |
/// | JWT_EXPIRATION_MINUTES | 1440 | lifetime of issued tokens, 1..=525600 |
/// | LOG_LEVEL | info | default log level |
/// | LOG_DIR | unset | daily rolling JSON log files |
/// | CORS_ALLOW_ANY | true | permissive CORS |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 JWT_SECRET=... cargo run -p hr-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// development | staging | production
    pub environment: String,
    pub jwt: JwtConfig,
    /// JWT_SECRET was absent and a development key was generated
    pub generated_secret: bool,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub cors_allow_any: bool,
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw,
        }),
        None => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let (secret, generated_secret) = match var("JWT_SECRET") {
            Some(secret) if secret.len() < MIN_SECRET_LEN => return Err(ConfigError::WeakJwtSecret),
            Some(secret) => (secret, false),
            None if environment == "development" => (generate_secure_printable_jwt_secret(), true),
            None => return Err(ConfigError::MissingJwtSecret(environment)),
        };

        let expiration_minutes = parse_or(
            "JWT_EXPIRATION_MINUTES",
            var("JWT_EXPIRATION_MINUTES"),
            DEFAULT_EXPIRATION_MINUTES,
        )?;
        if !(1..=MAX_EXPIRATION_MINUTES).contains(&expiration_minutes) {
            return Err(ConfigError::InvalidValue {
                key: "JWT_EXPIRATION_MINUTES",
                value: expiration_minutes.to_string(),
            });
        }

        let jwt = JwtConfig {
            secret,
            expiration_minutes,
            issuer: var("JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.into()),
            audience: var("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.into()),
        };

        Ok(Self {
            host: var("HTTP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or("HTTP_PORT", var("HTTP_PORT"), 5000)?,
            environment,
            jwt,
            generated_secret,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: var("LOG_DIR"),
            cors_allow_any: parse_or("CORS_ALLOW_ANY", var("CORS_ALLOW_ANY"), true)?,
        })
    }

    /// Development config with a fixed JWT config, for tests
    pub fn for_tests(jwt: JwtConfig) -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            environment: "development".into(),
            jwt,
            generated_secret: false,
            log_level: "debug".into(),
            log_dir: None,
            cors_allow_any: true,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_development_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.environment, "development");
        assert_eq!(config.jwt.secret.len(), 64);
        assert_eq!(config.jwt.issuer, "hr-server");
        assert_eq!(config.jwt.audience, "hr-clients");
        assert_eq!(config.jwt.expiration_minutes, 1440);
        assert!(config.generated_secret);
        assert!(config.cors_allow_any);
        assert!(!config.is_production());
    }

    #[test]
    fn test_production_requires_secret() {
        let err = Config::from_lookup(lookup(&[("ENVIRONMENT", "production")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingJwtSecret("production".into()));
    }

    #[test]
    fn test_short_secret_rejected() {
        let err = Config::from_lookup(lookup(&[("JWT_SECRET", "too-short")])).unwrap_err();
        assert_eq!(err, ConfigError::WeakJwtSecret);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("ENVIRONMENT", "production"),
            ("JWT_SECRET", "0123456789abcdef0123456789abcdef"),
            ("HTTP_PORT", "8080"),
            ("CORS_ALLOW_ANY", "false"),
            ("LOG_DIR", "/var/log/hr"),
        ]))
        .unwrap();
        assert!(config.is_production());
        assert!(!config.generated_secret);
        assert_eq!(config.port, 8080);
        assert!(!config.cors_allow_any);
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/hr"));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[("HTTP_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "HTTP_PORT", .. }));
    }

    #[test]
    fn test_token_lifetime_bounds() {
        let huge = i64::MAX.to_string();
        for raw in ["0", "-5", "525601", huge.as_str()] {
            let err = Config::from_lookup(lookup(&[("JWT_EXPIRATION_MINUTES", raw)])).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { key: "JWT_EXPIRATION_MINUTES", .. }),
                "{raw} accepted"
            );
        }

        let config =
            Config::from_lookup(lookup(&[("JWT_EXPIRATION_MINUTES", "525600")])).unwrap();
        assert_eq!(config.jwt.expiration_minutes, 525_600);
    }
}
