//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the daycare API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: SQLite connection string (default: "sqlite://daycare.db")
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `GENERATION_MONTHS`: Months of sessions generated per request (default: 3, at most 24)
//! - `SESSION_DEFAULT_TIMES`: Seven comma-separated `HH:MM` fallback session times,
//!   Sunday first

use daycare_core::scheduling::{
    calendar::validate_window,
    generator::{DefaultTimeTable, DEFAULT_MONTHS_TO_GENERATE},
};
use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for the daycare API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use daycare_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// SQLite database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Default size of the session generation window, in months
    pub generation_months: u32,

    /// Fallback session start times used when a slot cannot be resolved
    pub session_defaults: DefaultTimeTable,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - GENERATION_MONTHS is outside 1..=24
    /// - SESSION_DEFAULT_TIMES is not seven valid `HH:MM` values
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://daycare.db".to_string());

        // Logging settings
        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Session generation settings
        let generation_months = match lookup("GENERATION_MONTHS") {
            Some(raw) => raw
                .parse::<u32>()
                .wrap_err("Invalid GENERATION_MONTHS value")?,
            None => DEFAULT_MONTHS_TO_GENERATE,
        };
        validate_window(generation_months).wrap_err("Invalid GENERATION_MONTHS value")?;

        let session_defaults = match lookup("SESSION_DEFAULT_TIMES") {
            Some(raw) => DefaultTimeTable::parse(&raw).wrap_err("Invalid SESSION_DEFAULT_TIMES")?,
            None => DefaultTimeTable::default(),
        };

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            generation_months,
            session_defaults,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
