use anyhow::Result;
use price_compare::config::AppConfig;
use price_compare::errors::error_logging;
use price_compare::localization;
use price_compare::observability;
use price_compare::product::load_products;
use price_compare::ranking::compare_products;
use price_compare::report::generate_report_with_config;
use price_compare::units::base_unit_for;
use price_compare::validation::{find_duplicate_ids, validate_product};
use std::env;
use tracing::{debug, info, warn};

const USAGE: &str = "Usage: compare-prices <products.json>";

fn main() -> Result<()> {
    // A missing .env file is fine; the environment may already be set
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| {
        error_logging::log_config_error(&e, "environment", "load_config");
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    observability::init_tracing(&config.observability)?;
    info!("{}", config.summary());

    let path = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("{}", USAGE))?;

    let products = load_products(&path)?;

    for product in &products {
        let issues = validate_product(product);
        if !issues.is_empty() {
            warn!(product_id = %product.id, issues = ?issues, "Product will compare unreliably");
        }
    }
    let duplicates = find_duplicate_ids(&products);
    if !duplicates.is_empty() {
        warn!(duplicate_ids = ?duplicates, "Product ids are not unique");
    }

    let results = compare_products(&products);
    if results.is_empty() {
        println!("{}", localization::t("report-nothing-to-compare"));
        return Ok(());
    }

    for result in &results {
        debug!(
            category = %result.category,
            base_unit = result.category.unit_category().map(base_unit_for).unwrap_or("-"),
            best_product = %result.best_product.id,
            best_unit_price = result.best_unit_price(),
            "Comparison group ready"
        );
    }

    println!("{}", generate_report_with_config(&results, &config.report));
    Ok(())
}
