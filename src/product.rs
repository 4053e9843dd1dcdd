//! # Product Records
//!
//! [`ProductComparison`] is the single record type flowing through the
//! comparison pipeline. Caller-supplied fields are set once at construction;
//! derived fields start as `None` and are only ever filled by returning a new
//! value from the extraction and pricing stages.

use crate::categories::ProductCategory;
use crate::errors::{error_logging, AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// A product under comparison, plus the attributes the pipeline derives for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductComparison {
    /// Caller-assigned identifier, used as the savings key
    pub id: String,
    /// Free-text label
    pub name: String,
    /// Declared quantity (may be overridden by a count found in the description)
    pub quantity: f64,
    /// Unit symbol as entered, looked up case-insensitively
    pub unit: String,
    /// Total price paid for `quantity` units
    pub price: f64,
    /// Product-type tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    /// Free-text notes mined for structured attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Price per base unit (or per meter when a total length was extracted)
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    /// Denominator used for `unit_price`
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub normalized_quantity: Option<f64>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub meters_per_unit: Option<f64>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub total_meters: Option<f64>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub layers: Option<u32>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub sheets: Option<u32>,
}

impl ProductComparison {
    /// Create a product record with no derived fields
    ///
    /// ```rust
    /// use price_compare::product::ProductComparison;
    ///
    /// let rice = ProductComparison::new("a", "Arroz", 5.0, "kg", 27.9)
    ///     .with_description("tipo 1");
    /// assert!(rice.unit_price.is_none());
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            unit: unit.into(),
            price,
            category: None,
            description: None,
            unit_price: None,
            normalized_quantity: None,
            meters_per_unit: None,
            total_meters: None,
            layers: None,
            sheets: None,
        }
    }

    pub fn with_category(mut self, category: ProductCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether any pipeline-derived field has been populated
    pub fn is_enriched(&self) -> bool {
        self.unit_price.is_some()
            || self.normalized_quantity.is_some()
            || self.meters_per_unit.is_some()
            || self.total_meters.is_some()
            || self.layers.is_some()
            || self.sheets.is_some()
    }
}

/// Parse a JSON array of product records
pub fn parse_products(json: &str) -> AppResult<Vec<ProductComparison>> {
    let products: Vec<ProductComparison> = serde_json::from_str(json).map_err(|e| {
        error_logging::log_input_error(&e, "parse_products", None, None);
        AppError::from(e)
    })?;
    Ok(products)
}

/// Read and parse a JSON file of product records
pub fn load_products(path: impl AsRef<Path>) -> AppResult<Vec<ProductComparison>> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|e| {
        error_logging::log_filesystem_error(&e, "load_products", Some(&path_str));
        AppError::FileSystem(format!("Failed to read '{}': {}", path_str, e))
    })?;

    let products = serde_json::from_str::<Vec<ProductComparison>>(&content).map_err(|e| {
        error_logging::log_input_error(&e, "load_products", Some(&path_str), None);
        AppError::Input(format!("Invalid product list in '{}': {}", path_str, e))
    })?;

    info!(path = %path_str, product_count = products.len(), "Loaded products");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_input_ignores_derived_fields() {
        let json = r#"{
            "id": "p1",
            "name": "Papel Neve",
            "quantity": 1,
            "unit": "pacote",
            "price": 19.9,
            "category": "papel_higienico",
            "description": "4 rolos 30m",
            "unitPrice": 0.01,
            "totalMeters": 999
        }"#;

        let product: ProductComparison = serde_json::from_str(json).unwrap();
        assert_eq!(product.category, Some(ProductCategory::PapelHigienico));
        assert_eq!(product.description.as_deref(), Some("4 rolos 30m"));
        assert!(product.unit_price.is_none());
        assert!(product.total_meters.is_none());
        assert!(!product.is_enriched());
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let json = r#"{"id":"x","name":"Leite","quantity":1,"unit":"l","price":5.49}"#;
        let product: ProductComparison = serde_json::from_str(json).unwrap();
        assert_eq!(product, ProductComparison::new("x", "Leite", 1.0, "l", 5.49));
    }

    #[test]
    fn test_parse_products_rejects_malformed_input() {
        assert!(matches!(parse_products("{}"), Err(AppError::Input(_))));
        assert!(matches!(
            parse_products(r#"[{"id":"a","name":"A","unit":"kg","price":1}]"#),
            Err(AppError::Input(_))
        ));
        assert!(parse_products("[]").unwrap().is_empty());
    }

    #[test]
    fn test_serialization_skips_unset_fields() {
        let product = ProductComparison::new("x", "Leite", 1.0, "l", 5.49);
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("unitPrice").is_none());
        assert!(value.get("description").is_none());
        assert_eq!(value["unit"], "l");
    }
}
