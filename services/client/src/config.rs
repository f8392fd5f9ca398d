//! services/client/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The
//! `.env` file is used for local development.

use reqwest::Url;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: Url,
    pub log_level: Level,
    pub http_timeout: Duration,
    /// Optional credentials for the console shell's automatic login.
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let api_base_url_str =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        let api_base_url = Url::parse(&api_base_url_str).map_err(|e| {
            ConfigError::InvalidValue("API_BASE_URL".to_string(), e.to_string())
        })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let http_timeout = match std::env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    ConfigError::InvalidValue(
                        "HTTP_TIMEOUT_SECS".to_string(),
                        format!("'{}' is not a number of seconds", raw),
                    )
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(30),
        };

        let email = std::env::var("DOCQUERY_EMAIL").ok();
        let password = std::env::var("DOCQUERY_PASSWORD").ok();

        Ok(Self {
            api_base_url,
            log_level,
            http_timeout,
            email,
            password,
        })
    }
}
