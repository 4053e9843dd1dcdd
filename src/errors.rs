//! # Application Error Types
//!
//! This module defines the error types used by the configuration and input
//! layers of the price comparison crate. The comparison engine itself is total
//! and never produces these errors.

use std::fmt;

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration validation errors
    Config(String),
    /// Malformed product input (JSON that does not describe products)
    Input(String),
    /// File system errors
    FileSystem(String),
    /// Internal application errors
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            AppError::Input(msg) => write!(f, "[INPUT] {}", msg),
            AppError::FileSystem(msg) => write!(f, "[FILESYSTEM] {}", msg),
            AppError::Internal(msg) => write!(f, "[INTERNAL] {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileSystem(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Input(err.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Standardized error logging utilities for consistent error reporting
pub mod error_logging {
    use tracing::error;

    /// Log configuration errors during startup/initialization
    pub fn log_config_error(error: &impl std::fmt::Display, config_key: &str, operation: &str) {
        error!(
            error = %error,
            config_key = %config_key,
            operation = %operation,
            "Configuration error"
        );
    }

    /// Log product input errors with the source they were read from
    pub fn log_input_error(
        error: &impl std::fmt::Display,
        operation: &str,
        source: Option<&str>,
        product_count: Option<usize>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            source = ?source,
            product_count = ?product_count,
            "Product input rejected"
        );
    }

    /// Log file system errors with path and operation context
    pub fn log_filesystem_error(
        error: &impl std::fmt::Display,
        operation: &str,
        path: Option<&str>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            path = ?path,
            "File system operation failed"
        );
    }
}
