//! Application configuration loaded from the environment.
//!
//! A `.env` file in the working directory is read first when present.
//! Every setting has a default except `DATABASE_URL`, whose absence selects
//! the in-memory store.

use crate::todo::domain::{DEFAULT_PER_PAGE, MAX_PER_PAGE};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set to a value that cannot be used.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Name of the environment variable.
        key: String,
        /// Why the value was rejected.
        message: String,
    },
}

impl ConfigError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_owned(),
            message: message.into(),
        }
    }
}

/// Output format of log records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per record.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}', expected pretty or json")),
        }
    }
}

/// Runtime configuration of the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// `PostgreSQL` connection string; `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub database_pool_size: u32,
    /// Page size of task listings.
    pub tasks_per_page: u32,
    /// Log record format.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            database_url: None,
            database_pool_size: 10,
            tasks_per_page: DEFAULT_PER_PAGE,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `APP_HOST` (default `0.0.0.0`)
    /// - `APP_PORT` (default `8080`)
    /// - `DATABASE_URL` (optional)
    /// - `DATABASE_POOL_SIZE` (default `10`)
    /// - `TASKS_PER_PAGE` (default `10`, at most `100`)
    /// - `LOG_FORMAT` (`pretty` or `json`, default `pretty`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable cannot be
    /// parsed or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which returns the value of a
    /// variable or `None` when it is unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable cannot be
    /// parsed or is out of range.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = read("APP_HOST").unwrap_or(defaults.host);
        let port = parse_or("APP_PORT", read("APP_PORT"), defaults.port)?;
        let database_url = read("DATABASE_URL");
        let database_pool_size = parse_or(
            "DATABASE_POOL_SIZE",
            read("DATABASE_POOL_SIZE"),
            defaults.database_pool_size,
        )?;
        if database_pool_size == 0 {
            return Err(ConfigError::invalid("DATABASE_POOL_SIZE", "must be at least 1"));
        }

        let tasks_per_page =
            parse_or("TASKS_PER_PAGE", read("TASKS_PER_PAGE"), defaults.tasks_per_page)?;
        if !(1..=MAX_PER_PAGE).contains(&tasks_per_page) {
            return Err(ConfigError::invalid(
                "TASKS_PER_PAGE",
                format!("must be between 1 and {MAX_PER_PAGE}"),
            ));
        }

        let log_format = parse_or("LOG_FORMAT", read("LOG_FORMAT"), defaults.log_format)?;

        Ok(Self {
            host,
            port,
            database_url,
            database_pool_size,
            tasks_per_page,
            log_format,
        })
    }

    /// Returns the `host:port` address the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    value.map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|err: T::Err| ConfigError::invalid(key, err.to_string()))
    })
}
