//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string (`postgres://` or `postgresql://`)
//! - `SESSION_SECRET` - Session token signing secret (min 32 chars)
//!
//! ## Optional
//! - `PASSWORD_PEPPER` - Application-wide secret appended to passwords before hashing
//! - `BIND_ADDR` - Listen address (default: 0.0.0.0:31113)
//! - `COOKIE_SECURE` - Set `Secure` on the session cookie (default: true)
//! - `FRONTEND_ORIGINS` - Comma-separated CORS origins

use std::net::SocketAddr;

use auth::AuthConfig;
use platform::config::{
    ConfigError, parse_bool, parse_list, validate_database_url, validate_session_secret,
};
use platform::crypto::sha256;
use secrecy::{ExposeSecret, SecretString};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[derive(Debug)]
pub struct AppConfig {
    /// Contains the database password
    pub database_url: SecretString,
    pub session_secret: SecretString,
    pub password_pepper: Option<SecretString>,
    pub bind_addr: SocketAddr,
    pub cookie_secure: bool,
    pub frontend_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns `None` for unset keys.
    /// Checks run in a fixed order and the first failure is returned.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = validate_database_url("DATABASE_URL", lookup("DATABASE_URL").as_deref())?;
        let session_secret =
            validate_session_secret("SESSION_SECRET", lookup("SESSION_SECRET").as_deref())?;

        let password_pepper = lookup("PASSWORD_PEPPER")
            .filter(|v| !v.is_empty())
            .map(SecretString::from);

        let bind_addr = lookup("BIND_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BIND_ADDR".to_string(), e.to_string()))?;

        let cookie_secure =
            parse_bool("COOKIE_SECURE", lookup("COOKIE_SECURE").as_deref(), true)?;

        let frontend_origins = parse_list(Some(
            lookup("FRONTEND_ORIGINS")
                .as_deref()
                .unwrap_or(DEFAULT_FRONTEND_ORIGINS),
        ));

        Ok(Self {
            database_url,
            session_secret,
            password_pepper,
            bind_addr,
            cookie_secure,
            frontend_origins,
        })
    }

    /// Auth settings derived from this configuration
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            session_secret: sha256(self.session_secret.expose_secret().as_bytes()),
            cookie_secure: self.cookie_secure,
            password_pepper: self
                .password_pepper
                .as_ref()
                .map(|p| p.expose_secret().as_bytes().to_vec()),
            ..AuthConfig::default()
        }
    }
}
