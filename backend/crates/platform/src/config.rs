//! Environment Configuration
//!
//! Validation of environment values. Each check is a pure function over the
//! raw value (`Option<&str>`, `None` when unset), so callers decide where the
//! values come from and tests never touch the process environment.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Accepted database connection string schemes
pub const DATABASE_URL_PREFIXES: [&str; 2] = ["postgres://", "postgresql://"];

pub const MIN_SESSION_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingEnvVar(String),

    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),

    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Non-blank value, or `MissingEnvVar`
pub fn require(key: &str, raw: Option<&str>) -> Result<String, ConfigError> {
    match raw {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(ConfigError::MissingEnvVar(key.to_string())),
    }
}

/// Database connection string. Missing, empty and whitespace-only values
/// are all "missing"; an unknown scheme is "invalid".
pub fn validate_database_url(key: &str, raw: Option<&str>) -> Result<SecretString, ConfigError> {
    let value = require(key, raw)?;

    if !DATABASE_URL_PREFIXES
        .iter()
        .any(|prefix| value.starts_with(prefix))
    {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must start with {}", DATABASE_URL_PREFIXES.join(" or ")),
        ));
    }

    Ok(SecretString::from(value))
}

/// Token signing secret, at least [`MIN_SESSION_SECRET_LENGTH`] characters
pub fn validate_session_secret(key: &str, raw: Option<&str>) -> Result<SecretString, ConfigError> {
    let value = SecretString::from(require(key, raw)?);
    let len = value.expose_secret().chars().count();

    if len < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH, len
            ),
        ));
    }

    Ok(value)
}

/// `true`/`false`/`1`/`0` (case-insensitive), or `default` when unset
pub fn parse_bool(key: &str, raw: Option<&str>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(default);
    };

    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected true or false, got {:?}", other),
        )),
    }
}

/// Comma-separated list, blanks dropped
pub fn parse_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
