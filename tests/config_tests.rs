//! # Configuration and Input Loading Tests
//!
//! Environment-driven configuration and JSON product files read from disk.

use price_compare::config::AppConfig;
use price_compare::errors::AppError;
use price_compare::observability_config::LogFormat;
use price_compare::product::load_products;
use price_compare::ranking::compare_products;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

#[cfg(test)]
mod tests {
    use super::*;

    // Every environment mutation lives in this one test so parallel tests never race on it
    #[test]
    fn test_app_config_from_env() {
        env::set_var("REPORT_CURRENCY_SYMBOL", "€");
        env::set_var("REPORT_SAVINGS_DECIMALS", "2");
        env::set_var("ENVIRONMENT", "production");
        env::set_var("LOG_LEVEL", "debug");
        env::remove_var("LOG_FORMAT");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.report.currency_symbol, "€");
        assert_eq!(config.report.savings_decimal_places, 2);
        assert_eq!(config.observability.environment, "production");
        assert_eq!(config.observability.effective_log_format(), LogFormat::Json);
        assert!(config.validate().is_ok());

        env::set_var("REPORT_SAVINGS_DECIMALS", "many");
        assert!(matches!(AppConfig::from_env(), Err(AppError::Config(_))));
        env::set_var("REPORT_SAVINGS_DECIMALS", "1");

        env::set_var("LOG_FORMAT", "xml");
        assert!(matches!(AppConfig::from_env(), Err(AppError::Config(_))));
        env::set_var("LOG_FORMAT", "pretty");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.observability.effective_log_format(), LogFormat::Pretty);

        for key in [
            "REPORT_CURRENCY_SYMBOL",
            "REPORT_SAVINGS_DECIMALS",
            "ENVIRONMENT",
            "LOG_LEVEL",
            "LOG_FORMAT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_products_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "a", "name": "Detergente 500ml", "quantity": 500, "unit": "ml", "price": 2.5, "category": "limpeza"}},
                {{"id": "b", "name": "Detergente 5L", "quantity": 5, "unit": "L", "price": 19.9}}
            ]"#
        )
        .unwrap();

        let products = load_products(file.path()).unwrap();
        assert_eq!(products.len(), 2);

        let results = compare_products(&products);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].best_product.id, "b");
    }

    #[test]
    fn test_load_products_errors() {
        let missing = load_products("/definitely/not/here.json");
        assert!(matches!(missing, Err(AppError::FileSystem(_))));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"not\": \"a list\"}}").unwrap();
        assert!(matches!(load_products(file.path()), Err(AppError::Input(_))));
    }
}
