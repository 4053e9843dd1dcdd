//! # Price Compare
//!
//! Unit-price comparison engine for shopping lists. Given user-entered
//! products (description, quantity, unit, price) it normalizes units into
//! comparable base units, mines descriptions for structured attributes such as
//! roll count and length, ranks comparable products by unit price and reports
//! how much more each one costs than the cheapest.
//!
//! ```rust
//! use price_compare::{compare_products, generate_report, ProductComparison};
//!
//! let results = compare_products(&[
//!     ProductComparison::new("a", "Açúcar 1kg", 1.0, "kg", 10.0),
//!     ProductComparison::new("b", "Açúcar 500g", 500.0, "g", 6.0),
//! ]);
//! let report = generate_report(&results);
//! assert!(report.contains("Açúcar 500g: 20,0% mais caro"));
//! ```

pub mod categories;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod localization;
pub mod observability;
pub mod observability_config;
pub mod pricing;
pub mod product;
pub mod ranking;
pub mod report;
pub mod units;
pub mod validation;

// Re-export types for easier access
pub use categories::ProductCategory;
pub use product::ProductComparison;
pub use ranking::{compare_products, ComparisonCategory, ComparisonResult};
pub use report::{format_price, format_unit, generate_report};
pub use units::{UnitCategory, UnitConversion};
