//! Observability setup: structured logging and comparison metrics.
//!
//! Metrics go through the `metrics` facade. Without an installed recorder the
//! calls are no-ops, so embedding applications decide where they are exported.

use anyhow::Result;
use std::time::Duration;
use tracing_subscriber::prelude::*;

use crate::observability_config::{LogFormat, ObservabilityConfig};

/// Initialize structured logging with tracing and configuration
pub fn init_tracing(config: &ObservabilityConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid observability configuration: {}", e))?;

    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("price_compare={}", config.log_level.to_lowercase()).parse()?)
        .add_directive(format!("compare_prices={}", config.log_level.to_lowercase()).parse()?);

    match config.effective_log_format() {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_thread_names(false)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_thread_names(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    tracing::info!(
        environment = %config.environment,
        log_level = %config.log_level,
        log_format = ?config.effective_log_format(),
        "Tracing initialized with structured logging"
    );
    Ok(())
}

/// Parameters for recording one comparison run
#[derive(Debug, Clone, Copy)]
pub struct ComparisonMetricsParams {
    pub product_count: usize,
    pub group_count: usize,
    pub unrecognized_units: usize,
    pub duration: Duration,
}

/// Record comparison metrics
pub fn record_comparison_metrics(params: ComparisonMetricsParams) {
    let ComparisonMetricsParams {
        product_count,
        group_count,
        unrecognized_units,
        duration,
    } = params;

    let outcome = if group_count > 0 { "ranked" } else { "empty" };
    metrics::counter!("price_comparisons_total", "outcome" => outcome).increment(1);
    metrics::histogram!("price_comparison_products").record(product_count as f64);
    metrics::histogram!("price_comparison_groups").record(group_count as f64);
    metrics::histogram!("price_comparison_duration_seconds").record(duration.as_secs_f64());
    metrics::counter!("price_comparison_unrecognized_units_total")
        .increment(unrecognized_units as u64);
}

/// Record one report rendering
pub fn record_report_metrics(group_count: usize, report_length: usize) {
    metrics::counter!("price_reports_generated_total").increment(1);
    metrics::histogram!("price_report_groups").record(group_count as f64);
    metrics::histogram!("price_report_length_chars").record(report_length as f64);
}
