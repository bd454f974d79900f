//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Origin of the REST backend, without a trailing slash.
    pub api_base_url: String,
    /// Origin used to absolutise relative video URLs.
    pub media_origin: String,
    pub log_level: Level,
    /// Raw `Cookie` header replayed as session credentials.
    pub session_cookies: Option<String>,
    pub csrf_cookie_name: String,
    pub export_dir: PathBuf,
    pub notification_ttl: Duration,
}

impl Config {
    /// Reads a `.env` file from the current directory into the environment.
    /// Skipped in test environments to keep tests hermetic.
    pub fn load_dotenv() {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
    }

    /// Loads configuration from environment variables. Any key `overrides`
    /// answers (command-line flags) wins over the environment.
    pub fn from_env_with<F>(overrides: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load_dotenv();
        Self::from_lookup(|key| overrides(key).or_else(|| std::env::var(key).ok()))
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Backend Origin ---
        let api_base_url = lookup("API_BASE_URL")
            .unwrap_or_else(|| "http://localhost:8000".to_string());
        let api_base_url = parse_origin("API_BASE_URL", &api_base_url)?;

        let media_origin = match lookup("MEDIA_ORIGIN") {
            Some(origin) => parse_origin("MEDIA_ORIGIN", &origin)?,
            None => api_base_url.clone(),
        };

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Credentials ---
        let session_cookies = lookup("TUTORIALS_COOKIES").filter(|c| !c.trim().is_empty());
        let csrf_cookie_name =
            lookup("CSRF_COOKIE_NAME").unwrap_or_else(|| "csrftoken".to_string());

        // --- Local Output ---
        let export_dir = lookup("EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let ttl_str = lookup("NOTIFICATION_TTL_MS").unwrap_or_else(|| "3000".to_string());
        let ttl_ms = ttl_str.parse::<u64>().map_err(|e| {
            ConfigError::InvalidValue("NOTIFICATION_TTL_MS".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_base_url,
            media_origin,
            log_level,
            session_cookies,
            csrf_cookie_name,
            export_dir,
            notification_ttl: Duration::from_millis(ttl_ms),
        })
    }
}

fn parse_origin(var: &str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ConfigError::InvalidValue(
            var.to_string(),
            format!("'{}' is not an http(s) URL", value),
        ));
    }
    Ok(trimmed.to_string())
}
