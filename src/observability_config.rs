//! # Observability Configuration
//!
//! Environment-specific logging settings.

use crate::errors::{AppError, AppResult};
use std::env;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Observability configuration for different environments
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Environment name (development, staging, production)
    pub environment: String,
    /// Log level for this crate's targets
    pub log_level: String,
    /// Explicit log format; when unset, development logs pretty and everything else JSON
    pub log_format: Option<LogFormat>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            log_format: None,
        }
    }
}

impl ObservabilityConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        let log_format = match env::var("LOG_FORMAT") {
            Ok(value) => Some(LogFormat::parse(&value).ok_or_else(|| {
                AppError::Config(format!(
                    "LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                    value
                ))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    /// Format actually used once the environment default is applied
    pub fn effective_log_format(&self) -> LogFormat {
        match self.log_format {
            Some(format) => format,
            None if self.is_development() => LogFormat::Pretty,
            None => LogFormat::Json,
        }
    }

    /// Validate observability configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.environment.trim().is_empty() {
            return Err(AppError::Config("Environment cannot be empty".to_string()));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Log level '{}' is invalid. Expected one of: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}
