//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREPOINT_DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `STOREPOINT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREPOINT_PORT` - Listen port (default: 3000)
//! - `STOREPOINT_DEFAULT_LANG` - Storefront language used when a request
//!   carries none (default: en)
//! - `STOREPOINT_MULTI_TENANT` - Enforce company scoping on catalog queries
//!   (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

use storepoint_core::LangCode;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storepoint server configuration.
#[derive(Debug, Clone)]
pub struct StorepointConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Language used when an estimate request carries none
    pub default_lang: LangCode,
    /// Whether catalog queries enforce company scoping
    pub multi_tenant: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl StorepointConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("STOREPOINT_DATABASE_URL")?;
        let host = get_env_or_default("STOREPOINT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREPOINT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREPOINT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREPOINT_PORT".to_string(), e.to_string())
            })?;
        let default_lang = LangCode::parse(&get_env_or_default("STOREPOINT_DEFAULT_LANG", "en"))
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREPOINT_DEFAULT_LANG".to_string(), e.to_string())
            })?;
        let multi_tenant = get_env_or_default("STOREPOINT_MULTI_TENANT", "false")
            .parse::<bool>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREPOINT_MULTI_TENANT".to_string(), e.to_string())
            })?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            default_lang,
            multi_tenant,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    // Try primary key first (e.g., STOREPOINT_DATABASE_URL)
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    // Fallback to generic DATABASE_URL (set by Fly.io postgres attach)
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
