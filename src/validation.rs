//! Advisory checks on caller-supplied product records.
//!
//! The comparison engine accepts any input; these checks exist so callers can
//! warn users about records that will compare oddly (zero quantities, unknown
//! units, clashing ids) before or after running a comparison.

use crate::product::ProductComparison;
use crate::units;
use std::collections::HashSet;

/// Validates a single product record
///
/// # Returns
/// Every issue code that applies, empty when the record looks sound:
/// `empty-id`, `empty-name`, `non-finite-value`, `non-positive-quantity`,
/// `negative-price`, `unrecognized-unit`, `unsuggested-unit`.
///
/// # Examples
/// ```
/// use price_compare::product::ProductComparison;
/// use price_compare::validation::validate_product;
///
/// let ok = ProductComparison::new("a", "Arroz", 5.0, "kg", 25.0);
/// assert!(validate_product(&ok).is_empty());
///
/// let odd = ProductComparison::new("", "Arroz", 0.0, "xyz", 25.0);
/// assert_eq!(
///     validate_product(&odd),
///     vec!["empty-id", "non-positive-quantity", "unrecognized-unit"]
/// );
/// ```
pub fn validate_product(product: &ProductComparison) -> Vec<&'static str> {
    let mut issues = Vec::new();

    if product.id.trim().is_empty() {
        issues.push("empty-id");
    }

    if product.name.trim().is_empty() {
        issues.push("empty-name");
    }

    if !product.quantity.is_finite() || !product.price.is_finite() {
        issues.push("non-finite-value");
    } else {
        if product.quantity <= 0.0 {
            issues.push("non-positive-quantity");
        }
        if product.price < 0.0 {
            issues.push("negative-price");
        }
    }

    if units::lookup(&product.unit).is_none() {
        issues.push("unrecognized-unit");
    } else if let Some(category) = product.category {
        if !category.suggests_unit(&product.unit) {
            issues.push("unsuggested-unit");
        }
    }

    issues
}

/// Ids used by more than one product, in order of their second appearance
pub fn find_duplicate_ids(products: &[ProductComparison]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for product in products {
        let id = product.id.as_str();
        if !seen.insert(id) && reported.insert(id) {
            duplicates.push(id);
        }
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::ProductCategory;

    #[test]
    fn test_validate_product_issues() {
        let product = ProductComparison::new("a", " ", 1.0, "kg", -1.0);
        assert_eq!(validate_product(&product), vec!["empty-name", "negative-price"]);

        let product = ProductComparison::new("a", "X", f64::NAN, "kg", 1.0);
        assert_eq!(validate_product(&product), vec!["non-finite-value"]);
    }

    #[test]
    fn test_unsuggested_unit_needs_category() {
        let product = ProductComparison::new("a", "Suco", 1.0, "rolo", 5.0);
        assert!(validate_product(&product).is_empty());

        let product = product.with_category(ProductCategory::Bebidas);
        assert_eq!(validate_product(&product), vec!["unsuggested-unit"]);
    }

    #[test]
    fn test_find_duplicate_ids() {
        let products = vec![
            ProductComparison::new("a", "A", 1.0, "kg", 1.0),
            ProductComparison::new("b", "B", 1.0, "kg", 1.0),
            ProductComparison::new("a", "A2", 1.0, "kg", 1.0),
            ProductComparison::new("a", "A3", 1.0, "kg", 1.0),
            ProductComparison::new("b", "B2", 1.0, "kg", 1.0),
        ];
        assert_eq!(find_duplicate_ids(&products), vec!["a", "b"]);
        assert!(find_duplicate_ids(&products[..2]).is_empty());
    }
}
