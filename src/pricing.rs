//! # Price Normalization
//!
//! Computes a comparable price per base unit. The first applicable rule wins:
//!
//! 1. an extracted total length (`total_meters > 0`): price per meter
//! 2. a recognized unit: `price / (quantity * multiplier)`
//! 3. an unrecognized unit: `price / quantity`
//!
//! Degenerate quantities are not rejected; the result is the plain IEEE
//! quotient (`inf` for x/0, `NaN` for 0/0). Ranking handles those.

use crate::product::ProductComparison;
use crate::units;
use tracing::trace;

/// Which normalization rule produced a unit price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingBasis {
    /// Price per meter of extracted total length
    TotalLength,
    /// Price per registry base unit
    BaseUnit,
    /// Raw price per declared quantity, unit unrecognized
    RawQuantity,
}

/// Denominator for the unit price and the rule that selected it
pub fn normalized_quantity(product: &ProductComparison) -> (f64, PricingBasis) {
    if let Some(total_meters) = product.total_meters.filter(|meters| *meters > 0.0) {
        return (total_meters, PricingBasis::TotalLength);
    }

    match units::lookup(&product.unit) {
        Some(conversion) => (
            product.quantity * conversion.multiplier,
            PricingBasis::BaseUnit,
        ),
        None => (product.quantity, PricingBasis::RawQuantity),
    }
}

/// Price per base unit of `product`
///
/// ```rust
/// use price_compare::pricing::unit_price;
/// use price_compare::product::ProductComparison;
///
/// let flour = ProductComparison::new("f", "Farinha", 1.0, "kg", 10.0);
/// assert!((unit_price(&flour) - 0.01).abs() < 1e-12);
/// ```
pub fn unit_price(product: &ProductComparison) -> f64 {
    let (quantity, basis) = normalized_quantity(product);
    let price = product.price / quantity;
    trace!(
        product_id = %product.id,
        basis = ?basis,
        normalized_quantity = quantity,
        unit_price = price,
        "Computed unit price"
    );
    price
}

/// Return a copy of `product` with `unit_price` and `normalized_quantity` set
pub fn normalize(product: &ProductComparison) -> ProductComparison {
    let (quantity, _) = normalized_quantity(product);
    ProductComparison {
        unit_price: Some(product.price / quantity),
        normalized_quantity: Some(quantity),
        ..product.clone()
    }
}
