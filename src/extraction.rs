//! # Attribute Extraction
//!
//! Recovers structured attributes from a product's free-text description,
//! e.g. "Papel Neve 4 rolos 30 metros folha dupla 2 camadas".
//!
//! Four patterns are matched independently, each case-insensitive:
//!
//! - unit count: `4 rolos`, `12 unidades`, `6 un`
//! - length per unit: `30 metros`, `30m`, `22,5 m` (never `m²` or `m³`)
//! - layers: `2 camadas` (falls back to `N folhas` when no `camadas` is present)
//! - sheets: `300 folhas`
//!
//! A missing pattern leaves the corresponding field unset; extraction never fails.

use crate::product::ProductComparison;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

lazy_static! {
    static ref UNIT_COUNT_PATTERN: Regex = Regex::new(r"(?i)(\d+)\s*(?:rolos?|unidades?|un)\b")
        .expect("Invalid unit count regex pattern");
    static ref LENGTH_PATTERN: Regex = Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(?:metros?|m)(?:[^\w²³]|$)")
        .expect("Invalid length regex pattern");
    static ref LAYERS_PATTERN: Regex =
        Regex::new(r"(?i)(\d+)\s*camadas?\b").expect("Invalid layers regex pattern");
    static ref SHEETS_PATTERN: Regex =
        Regex::new(r"(?i)(\d+)\s*folhas?\b").expect("Invalid sheets regex pattern");
}

fn first_integer(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures_iter(text)
        .find_map(|caps| caps.get(1).and_then(|m| m.as_str().parse().ok()))
}

/// Number of rolls/units declared in the text (`4 rolos`, `12 unidades`, `6 un`)
pub fn extract_unit_count(text: &str) -> Option<u32> {
    first_integer(&UNIT_COUNT_PATTERN, text)
}

/// Length of each unit in meters (`30 metros`, `30m`, `22,5 m`); areas such as `2m²` are skipped
pub fn extract_meters_per_unit(text: &str) -> Option<f64> {
    LENGTH_PATTERN
        .captures_iter(text)
        .find_map(|caps| caps.get(1).and_then(|m| m.as_str().replace(',', ".").parse().ok()))
}

/// Ply count (`2 camadas`); `N folhas` is accepted as a synonym when no
/// `camadas` appears anywhere in the text.
pub fn extract_layers(text: &str) -> Option<u32> {
    first_integer(&LAYERS_PATTERN, text).or_else(|| first_integer(&SHEETS_PATTERN, text))
}

/// Sheet count (`300 folhas`)
pub fn extract_sheets(text: &str) -> Option<u32> {
    first_integer(&SHEETS_PATTERN, text)
}

/// Return a copy of `product` enriched with the attributes found in its description.
///
/// A unit count in the description replaces the declared `quantity`. When a
/// length per unit is found, `total_meters` is `quantity * meters_per_unit`
/// using the (possibly replaced) quantity. Without a description the product
/// is returned unchanged.
///
/// ```rust
/// use price_compare::extraction::extract;
/// use price_compare::product::ProductComparison;
///
/// let paper = ProductComparison::new("p", "Papel", 1.0, "pacote", 18.0)
///     .with_description("4 rolos, 30 metros, 2 camadas");
/// let enriched = extract(&paper);
///
/// assert_eq!(enriched.quantity, 4.0);
/// assert_eq!(enriched.meters_per_unit, Some(30.0));
/// assert_eq!(enriched.total_meters, Some(120.0));
/// assert_eq!(enriched.layers, Some(2));
/// ```
pub fn extract(product: &ProductComparison) -> ProductComparison {
    let mut enriched = product.clone();

    let description = match product.description.as_deref() {
        Some(text) => text,
        None => {
            trace!(product_id = %product.id, "No description, skipping extraction");
            return enriched;
        }
    };

    if let Some(count) = extract_unit_count(description) {
        debug!(
            product_id = %product.id,
            declared_quantity = product.quantity,
            extracted_quantity = count,
            "Description unit count overrides declared quantity"
        );
        enriched.quantity = f64::from(count);
    }

    if let Some(meters) = extract_meters_per_unit(description) {
        enriched.meters_per_unit = Some(meters);
        enriched.total_meters = Some(enriched.quantity * meters);
    }

    enriched.layers = extract_layers(description);
    enriched.sheets = extract_sheets(description);

    debug!(
        product_id = %product.id,
        quantity = enriched.quantity,
        meters_per_unit = ?enriched.meters_per_unit,
        total_meters = ?enriched.total_meters,
        layers = ?enriched.layers,
        sheets = ?enriched.sheets,
        "Extracted description attributes"
    );

    enriched
}
