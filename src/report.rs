//! # Report Formatting
//!
//! Renders ranked comparison results as plain text in pt-BR. The formatter
//! only reads fields the pipeline already computed; it never recomputes a
//! unit price or a savings percentage.
//!
//! ```text
//! 📊 Comparação de Preços
//!
//! 1. Peso
//! 🏆 Melhor opção: Açúcar 1kg
//!    Preço por g: R$ 0,01
//!    • Açúcar 500g: 20,0% mais caro
//! ```

use crate::config::ReportConfig;
use crate::localization::{t, t_args};
use crate::observability::record_report_metrics;
use crate::product::ProductComparison;
use crate::ranking::ComparisonResult;
use crate::units;
use tracing::debug;

const NOT_AVAILABLE: &str = "n/d";
const DETAIL_INDENT: &str = "   ";

/// Render `value` with `places` decimals and the configured separators.
///
/// Halves round away from zero (`12.25` -> `12.3`), not to even.
fn format_decimal(value: f64, places: usize, config: &ReportConfig) -> String {
    let scale = 10f64.powi(places as i32);
    let scaled = (value.abs() * scale).round() / scale;
    let magnitude = if scaled.is_finite() { scaled } else { value.abs() };
    let rendered = format!("{:.*}", places, magnitude);
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rendered.as_str(), None),
    };

    let mut output = String::with_capacity(rendered.len() + int_part.len() / 3 + 1);
    if value.is_sign_negative() && rendered.chars().any(|c| c.is_ascii_digit() && c != '0') {
        output.push('-');
    }

    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            output.push(config.thousands_separator);
        }
        output.push(ch);
    }

    if let Some(frac_part) = frac_part {
        output.push(config.decimal_separator);
        output.push_str(frac_part);
    }

    output
}

/// Render a plain amount (quantities, lengths) with at most two decimals
fn format_amount(value: f64, config: &ReportConfig) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let rendered = format_decimal(value, 2, config);
    rendered
        .trim_end_matches('0')
        .trim_end_matches(config.decimal_separator)
        .to_string()
}

/// Render a price as currency using the default pt-BR settings
///
/// ```rust
/// use price_compare::report::format_price;
///
/// assert_eq!(format_price(10.0), "R$ 10,00");
/// assert_eq!(format_price(1234.5), "R$ 1.234,50");
/// ```
pub fn format_price(value: f64) -> String {
    format_price_with(value, &ReportConfig::default())
}

/// Render a price as currency: symbol prefix, two decimals. Non-finite values render as `n/d`.
pub fn format_price_with(value: f64, config: &ReportConfig) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{} {}", config.currency_symbol, format_decimal(value, 2, config))
}

/// Render a unit symbol as its registry base unit, or verbatim when unrecognized
pub fn format_unit(unit: &str) -> String {
    match units::lookup(unit) {
        Some(conversion) => conversion.base_unit.to_string(),
        None => unit.to_string(),
    }
}

/// Render a savings percentage with `places` decimals.
///
/// Savings against a free best product are infinite (`∞`) or undefined (`n/d`).
pub fn format_percentage(value: f64, places: usize, config: &ReportConfig) -> String {
    if value.is_nan() {
        NOT_AVAILABLE.to_string()
    } else if value.is_infinite() {
        let symbol = if value > 0.0 { "∞" } else { "-∞" };
        symbol.to_string()
    } else {
        format_decimal(value, places, config)
    }
}

fn price_line(product: &ProductComparison, config: &ReportConfig) -> String {
    let price = format_price_with(product.unit_price.unwrap_or(f64::NAN), config);

    match (product.total_meters, product.meters_per_unit) {
        (Some(total), Some(meters)) if total > 0.0 => {
            let quantity = format_amount(product.quantity, config);
            let meters = format_amount(meters, config);
            let total = format_amount(total, config);
            t_args(
                "report-price-per-meter",
                &[
                    ("price", price.as_str()),
                    ("quantity", quantity.as_str()),
                    ("meters", meters.as_str()),
                    ("total", total.as_str()),
                ],
            )
        }
        _ => {
            let unit = format_unit(&product.unit);
            t_args(
                "report-price-per-unit",
                &[("unit", unit.as_str()), ("price", price.as_str())],
            )
        }
    }
}

/// Render results with the default report settings
pub fn generate_report(results: &[ComparisonResult]) -> String {
    generate_report_with_config(results, &ReportConfig::default())
}

/// Render results as a text report.
///
/// The report always starts with the title. Each result adds a numbered
/// category section naming the best product, its unit price, and every other
/// product with how much more expensive it is.
pub fn generate_report_with_config(results: &[ComparisonResult], config: &ReportConfig) -> String {
    let mut lines = vec![t("report-title")];

    for (index, result) in results.iter().enumerate() {
        let best = &result.best_product;

        let position = (index + 1).to_string();
        let category = t(&format!("category-{}", result.category.as_str()));

        lines.push(String::new());
        lines.push(t_args(
            "report-category-header",
            &[("index", position.as_str()), ("category", category.as_str())],
        ));
        lines.push(t_args("report-best-product", &[("name", best.name.as_str())]));
        lines.push(format!("{}{}", DETAIL_INDENT, price_line(best, config)));

        for product in result.products.iter().skip(1) {
            let Some(percentage) = result.savings_for(&product.id) else {
                continue;
            };
            let percentage =
                format_percentage(percentage, config.savings_decimal_places, config);
            lines.push(format!(
                "{}{}",
                DETAIL_INDENT,
                t_args(
                    "report-more-expensive",
                    &[("name", product.name.as_str()), ("percentage", percentage.as_str())],
                )
            ));
        }
    }

    let report = lines.join("\n");
    record_report_metrics(results.len(), report.chars().count());
    debug!(
        groups = results.len(),
        length = report.len(),
        "Generated comparison report"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_separators() {
        assert_eq!(format_price(0.0), "R$ 0,00");
        assert_eq!(format_price(0.012), "R$ 0,01");
        assert_eq!(format_price(999.999), "R$ 1.000,00");
        assert_eq!(format_price(1_234_567.891), "R$ 1.234.567,89");
        assert_eq!(format_price(-5.5), "R$ -5,50");
        assert_eq!(format_price(-0.001), "R$ 0,00");
    }

    #[test]
    fn test_format_price_non_finite() {
        assert_eq!(format_price(f64::INFINITY), "n/d");
        assert_eq!(format_price(f64::NAN), "n/d");
    }

    #[test]
    fn test_format_price_custom_config() {
        let config = ReportConfig {
            currency_symbol: "$".to_string(),
            decimal_separator: '.',
            thousands_separator: ',',
            ..Default::default()
        };
        assert_eq!(format_price_with(1234.5, &config), "$ 1,234.50");
    }

    #[test]
    fn test_format_unit() {
        assert_eq!(format_unit("kg"), "g");
        assert_eq!(format_unit("L"), "ml");
        assert_eq!(format_unit("dúzia"), "un");
        assert_eq!(format_unit("xyz"), "xyz");
    }

    #[test]
    fn test_format_percentage() {
        let config = ReportConfig::default();
        assert_eq!(format_percentage(20.0, 1, &config), "20,0");
        assert_eq!(format_percentage(33.333, 1, &config), "33,3");
        assert_eq!(format_percentage(f64::INFINITY, 1, &config), "∞");
        assert_eq!(format_percentage(f64::NAN, 1, &config), "n/d");
        assert_eq!(format_percentage(1500.0, 1, &config), "1.500,0");
    }

    #[test]
    fn test_halves_round_away_from_zero() {
        let config = ReportConfig::default();
        assert_eq!(format_percentage(12.25, 1, &config), "12,3");
        assert_eq!(format_percentage(0.5, 0, &config), "1");
        assert_eq!(format_percentage(2.5, 0, &config), "3");
        assert_eq!(format_price(0.125), "R$ 0,13");
        assert_eq!(format_price(-0.125), "R$ -0,13");
    }

    #[test]
    fn test_format_amount_trims_zeros() {
        let config = ReportConfig::default();
        assert_eq!(format_amount(4.0, &config), "4");
        assert_eq!(format_amount(22.5, &config), "22,5");
        assert_eq!(format_amount(120.0, &config), "120");
        assert_eq!(format_amount(1000.0, &config), "1.000");
    }

    #[test]
    fn test_empty_report_is_title_only() {
        assert_eq!(generate_report(&[]), "📊 Comparação de Preços");
    }
}
