//! # Unified Application Configuration
//!
//! Consolidates report formatting and observability settings into a single
//! configuration object loaded from environment variables and validated
//! before use.

use crate::errors::{AppError, AppResult};
use crate::observability_config::ObservabilityConfig;
use serde::{Deserialize, Serialize};
use std::env;

/// Report formatting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Currency symbol prefixed to prices
    pub currency_symbol: String,
    /// Separator between integer and fractional digits
    pub decimal_separator: char,
    /// Separator between groups of three integer digits
    pub thousands_separator: char,
    /// Decimal places for savings percentages
    pub savings_decimal_places: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "R$".to_string(),
            decimal_separator: ',',
            thousands_separator: '.',
            savings_decimal_places: 1,
        }
    }
}

impl ReportConfig {
    /// Validate report configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.currency_symbol.trim().is_empty() {
            return Err(AppError::Config(
                "Currency symbol cannot be empty".to_string(),
            ));
        }

        if self.decimal_separator == self.thousands_separator {
            return Err(AppError::Config(
                "Decimal and thousands separators must differ".to_string(),
            ));
        }

        if self.decimal_separator.is_ascii_digit() || self.thousands_separator.is_ascii_digit() {
            return Err(AppError::Config(
                "Separators cannot be digits".to_string(),
            ));
        }

        if self.savings_decimal_places > 4 {
            return Err(AppError::Config(
                "Savings decimal places cannot be greater than 4".to_string(),
            ));
        }

        Ok(())
    }
}

/// Unified application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Report formatting configuration
    pub report: ReportConfig,
    /// Observability configuration
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(symbol) = env::var("REPORT_CURRENCY_SYMBOL") {
            config.report.currency_symbol = symbol;
        }
        config.report.savings_decimal_places = env::var("REPORT_SAVINGS_DECIMALS")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .map_err(|_| {
                AppError::Config("REPORT_SAVINGS_DECIMALS must be a valid number".to_string())
            })?;

        config.observability = ObservabilityConfig::from_env()?;

        Ok(config)
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> AppResult<()> {
        self.report.validate()?;
        self.observability.validate()?;
        Ok(())
    }

    /// Get a summary of the current configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "Configuration: environment={}, log_level={}, currency_symbol={}, savings_decimal_places={}",
            self.observability.environment,
            self.observability.log_level,
            self.report.currency_symbol,
            self.report.savings_decimal_places
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.summary().contains("currency_symbol=R$"));
    }

    #[test]
    fn test_report_config_validation() {
        let mut config = ReportConfig::default();
        assert!(config.validate().is_ok());

        // Invalid: empty symbol
        config.currency_symbol = " ".to_string();
        assert!(config.validate().is_err());
        config.currency_symbol = "R$".to_string();

        // Invalid: identical separators
        config.thousands_separator = ',';
        assert!(config.validate().is_err());
        config.thousands_separator = '.';

        // Invalid: digit separator
        config.decimal_separator = '0';
        assert!(config.validate().is_err());
        config.decimal_separator = ',';

        // Invalid: too many decimals
        config.savings_decimal_places = 5;
        assert!(config.validate().is_err());
        config.savings_decimal_places = 2;

        assert!(config.validate().is_ok());
    }
}
