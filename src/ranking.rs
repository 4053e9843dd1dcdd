//! # Grouping and Ranking
//!
//! Runs every product through extraction and normalization, buckets them by
//! measurement dimension, ranks each bucket by unit price and reports how much
//! more expensive each product is than the cheapest one in its bucket.
//!
//! ## Ordering guarantees
//!
//! - Groups appear in the order their dimension is first seen in the input.
//! - Within a group the sort is stable and total: finite prices ascend,
//!   `+inf` follows every finite price and `NaN` sorts last.
//! - Groups with a single member are dropped.

use crate::extraction;
use crate::observability::{record_comparison_metrics, ComparisonMetricsParams};
use crate::pricing;
use crate::product::ProductComparison;
use crate::units::{self, UnitCategory};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Bucket a product is ranked in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonCategory {
    /// Unit found in the registry
    Measured(UnitCategory),
    /// Catch-all for units the registry does not know
    Unrecognized,
}

impl ComparisonCategory {
    /// Bucket for a unit symbol as entered by the user
    pub fn for_unit(unit: &str) -> Self {
        match units::lookup(unit) {
            Some(conversion) => ComparisonCategory::Measured(conversion.category),
            None => ComparisonCategory::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonCategory::Measured(category) => category.as_str(),
            ComparisonCategory::Unrecognized => "unrecognized",
        }
    }

    pub fn unit_category(&self) -> Option<UnitCategory> {
        match self {
            ComparisonCategory::Measured(category) => Some(*category),
            ComparisonCategory::Unrecognized => None,
        }
    }
}

impl fmt::Display for ComparisonCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComparisonCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Ranked products sharing one comparison category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub category: ComparisonCategory,
    /// Enriched products, ascending by unit price
    pub products: Vec<ProductComparison>,
    /// Cheapest product (first of `products`)
    pub best_product: ProductComparison,
    /// Percentage more expensive than `best_product`, keyed by product id
    pub savings: HashMap<String, f64>,
}

impl ComparisonResult {
    pub fn savings_for(&self, product_id: &str) -> Option<f64> {
        self.savings.get(product_id).copied()
    }

    pub fn best_unit_price(&self) -> f64 {
        unit_price_of(&self.best_product)
    }
}

fn unit_price_of(product: &ProductComparison) -> f64 {
    product.unit_price.unwrap_or(f64::NAN)
}

/// Total order over unit prices: ascending, `NaN` after everything else
pub fn compare_unit_prices(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Percentage by which `unit_price` exceeds `best_unit_price`.
///
/// A zero best price yields `inf`, or `NaN` when `unit_price` is also zero.
pub fn savings_percentage(unit_price: f64, best_unit_price: f64) -> f64 {
    ((unit_price - best_unit_price) / best_unit_price) * 100.0
}

/// Compare a set of products and return one ranked result per comparable group.
///
/// Fewer than two products, or no dimension with at least two members, yields
/// an empty vector. Caller-owned records are never modified.
///
/// ```rust
/// use price_compare::product::ProductComparison;
/// use price_compare::ranking::compare_products;
///
/// let results = compare_products(&[
///     ProductComparison::new("a", "Açúcar 1kg", 1.0, "kg", 10.0),
///     ProductComparison::new("b", "Açúcar 500g", 500.0, "g", 6.0),
/// ]);
///
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].best_product.id, "a");
/// assert!((results[0].savings["b"] - 20.0).abs() < 1e-9);
/// ```
pub fn compare_products(products: &[ProductComparison]) -> Vec<ComparisonResult> {
    let start_time = Instant::now();

    if products.len() < 2 {
        debug!(
            product_count = products.len(),
            "Not enough products to compare"
        );
        return Vec::new();
    }

    let mut groups: Vec<(ComparisonCategory, Vec<ProductComparison>)> = Vec::new();
    let mut unrecognized_units = 0;

    for product in products {
        let enriched = pricing::normalize(&extraction::extract(product));
        let category = ComparisonCategory::for_unit(&enriched.unit);

        if category == ComparisonCategory::Unrecognized {
            unrecognized_units += 1;
            debug!(
                product_id = %enriched.id,
                unit = %enriched.unit,
                "Unrecognized unit, comparing by raw price per quantity"
            );
        }

        match groups.iter_mut().find(|(existing, _)| *existing == category) {
            Some((_, members)) => members.push(enriched),
            None => groups.push((category, vec![enriched])),
        }
    }

    let group_count = groups.len();
    let results: Vec<ComparisonResult> = groups
        .into_iter()
        .filter_map(|(category, members)| {
            if members.len() < 2 {
                debug!(
                    category = %category,
                    product_id = %members[0].id,
                    "Dropping single-member group"
                );
                return None;
            }
            rank_group(category, members)
        })
        .collect();

    record_comparison_metrics(ComparisonMetricsParams {
        product_count: products.len(),
        group_count: results.len(),
        unrecognized_units,
        duration: start_time.elapsed(),
    });

    info!(
        product_count = products.len(),
        groups_seen = group_count,
        groups_ranked = results.len(),
        unrecognized_units,
        "Price comparison completed"
    );

    results
}

fn rank_group(
    category: ComparisonCategory,
    mut members: Vec<ProductComparison>,
) -> Option<ComparisonResult> {
    members.sort_by(|a, b| compare_unit_prices(unit_price_of(a), unit_price_of(b)));

    let best_product = members.first()?.clone();
    let best_unit_price = unit_price_of(&best_product);

    let mut savings = HashMap::with_capacity(members.len() - 1);
    for product in members.iter().skip(1) {
        if product.id == best_product.id {
            warn!(
                product_id = %product.id,
                category = %category,
                "Product shares its id with the best product, no savings recorded"
            );
            continue;
        }

        let percentage = savings_percentage(unit_price_of(product), best_unit_price);
        if savings.insert(product.id.clone(), percentage).is_some() {
            warn!(
                product_id = %product.id,
                category = %category,
                "Duplicate product id, keeping the last savings value"
            );
        }
    }

    debug!(
        category = %category,
        members = members.len(),
        best_product = %best_product.id,
        best_unit_price,
        "Ranked comparison group"
    );

    Some(ComparisonResult {
        category,
        products: members,
        best_product,
        savings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, quantity: f64, unit: &str, price: f64) -> ProductComparison {
        ProductComparison::new(id, format!("Produto {}", id), quantity, unit, price)
    }

    #[test]
    fn test_comparator_orders_non_finite_last() {
        let mut prices = vec![f64::NAN, 3.0, f64::INFINITY, 1.0, f64::NAN, 2.0];
        prices.sort_by(|a, b| compare_unit_prices(*a, *b));

        assert_eq!(&prices[..4], &[1.0, 2.0, 3.0, f64::INFINITY]);
        assert!(prices[4].is_nan());
        assert!(prices[5].is_nan());
    }

    #[test]
    fn test_stable_sort_for_equal_prices() {
        let results = compare_products(&[
            product("first", 1.0, "kg", 10.0),
            product("second", 1000.0, "g", 10.0),
            product("third", 2.0, "kg", 20.0),
        ]);

        let ids: Vec<&str> = results[0].products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
        assert_eq!(results[0].savings_for("second"), Some(0.0));
    }

    #[test]
    fn test_groups_follow_first_seen_order() {
        let results = compare_products(&[
            product("v1", 1.0, "l", 5.0),
            product("w1", 1.0, "kg", 8.0),
            product("v2", 500.0, "ml", 3.0),
            product("w2", 2.0, "kg", 15.0),
        ]);

        let categories: Vec<ComparisonCategory> = results.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                ComparisonCategory::Measured(UnitCategory::Volume),
                ComparisonCategory::Measured(UnitCategory::Weight),
            ]
        );
    }

    #[test]
    fn test_non_finite_prices_rank_last() {
        let results = compare_products(&[
            product("nan", 0.0, "kg", 0.0),
            product("inf", 0.0, "kg", 4.0),
            product("ok", 1.0, "kg", 4.0),
        ]);

        let ids: Vec<&str> = results[0].products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["ok", "inf", "nan"]);
        assert!(results[0].savings_for("inf").unwrap().is_infinite());
        assert!(results[0].savings_for("nan").unwrap().is_nan());
    }

    #[test]
    fn test_zero_priced_best_yields_non_finite_savings() {
        let results = compare_products(&[
            product("free", 1.0, "un", 0.0),
            product("paid", 1.0, "un", 2.0),
        ]);

        assert_eq!(results[0].best_product.id, "free");
        assert_eq!(results[0].savings_for("paid"), Some(f64::INFINITY));
    }

    #[test]
    fn test_best_product_id_never_in_savings() {
        let results = compare_products(&[
            product("dup", 1.0, "kg", 5.0),
            product("dup", 1.0, "kg", 6.0),
            product("other", 1.0, "kg", 7.0),
        ]);

        assert!(!results[0].savings.contains_key("dup"));
        assert_eq!(results[0].savings.len(), 1);
        assert_eq!(results[0].products.len(), 3);
    }

    #[test]
    fn test_unit_category_of_buckets() {
        assert_eq!(
            ComparisonCategory::for_unit("KG").unit_category(),
            Some(UnitCategory::Weight)
        );
        assert_eq!(
            ComparisonCategory::for_unit("rolo").unit_category(),
            Some(UnitCategory::Count)
        );
        assert_eq!(ComparisonCategory::for_unit("xyz").unit_category(), None);
    }

    #[test]
    fn test_best_unit_price_reads_best_product() {
        let results = compare_products(&[
            product("a", 1.0, "kg", 10.0),
            product("b", 500.0, "g", 6.0),
        ]);
        assert!((results[0].best_unit_price() - 0.01).abs() < 1e-12);

        let results = compare_products(&[
            product("nan", 0.0, "kg", 0.0),
            product("nan2", 0.0, "kg", 0.0),
        ]);
        assert!(results[0].best_unit_price().is_nan());
    }

    #[test]
    fn test_category_serializes_as_string() {
        let json = serde_json::to_string(&ComparisonCategory::Unrecognized).unwrap();
        assert_eq!(json, "\"unrecognized\"");
        let json =
            serde_json::to_string(&ComparisonCategory::Measured(UnitCategory::Count)).unwrap();
        assert_eq!(json, "\"count\"");
    }
}
