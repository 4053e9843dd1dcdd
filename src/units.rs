//! # Unit Registry
//!
//! Static table mapping unit symbols to their base unit, conversion multiplier
//! and dimension category. The table is the interoperability contract with
//! existing shopping-list data and must not change at runtime.
//!
//! ## Base units
//!
//! | Dimension | Base | Symbols |
//! |-----------|------|---------|
//! | weight    | g    | mg, g, kg, ton |
//! | volume    | ml   | ml, cl, dl, l |
//! | length    | cm   | mm, cm, m, km |
//! | area      | cm²  | cm², m² |
//! | count     | un   | un, pç, rolo, folha, pacote, caixa, dúzia, centena |
//! | time      | min  | min, h, dia |

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Closed set of measurement dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Weight,
    Volume,
    Length,
    Area,
    Count,
    Time,
}

impl UnitCategory {
    /// All dimension categories, in table order
    pub const ALL: [UnitCategory; 6] = [
        UnitCategory::Weight,
        UnitCategory::Volume,
        UnitCategory::Length,
        UnitCategory::Area,
        UnitCategory::Count,
        UnitCategory::Time,
    ];

    /// Stable lowercase identifier (also the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitCategory::Weight => "weight",
            UnitCategory::Volume => "volume",
            UnitCategory::Length => "length",
            UnitCategory::Area => "area",
            UnitCategory::Count => "count",
            UnitCategory::Time => "time",
        }
    }

    /// Canonical unit every member of this dimension converts into
    pub fn base_unit(&self) -> &'static str {
        match self {
            UnitCategory::Weight => "g",
            UnitCategory::Volume => "ml",
            UnitCategory::Length => "cm",
            UnitCategory::Area => "cm²",
            UnitCategory::Count => "un",
            UnitCategory::Time => "min",
        }
    }

    /// pt-BR display label, as printed in report section headers
    pub fn label(&self) -> &'static str {
        match self {
            UnitCategory::Weight => "Peso",
            UnitCategory::Volume => "Volume",
            UnitCategory::Length => "Comprimento",
            UnitCategory::Area => "Área",
            UnitCategory::Count => "Unidades",
            UnitCategory::Time => "Tempo",
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry entry describing how one unit symbol converts to its base unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitConversion {
    /// Canonical unit symbol for the dimension (e.g. "g", "ml")
    pub base_unit: &'static str,
    /// Amount of `base_unit` in one source unit
    pub multiplier: f64,
    /// Dimension the unit measures
    pub category: UnitCategory,
}

impl UnitConversion {
    const fn new(base_unit: &'static str, multiplier: f64, category: UnitCategory) -> Self {
        Self {
            base_unit,
            multiplier,
            category,
        }
    }
}

const UNIT_TABLE: &[(&str, UnitConversion)] = &[
    // Weight
    ("mg", UnitConversion::new("g", 0.001, UnitCategory::Weight)),
    ("g", UnitConversion::new("g", 1.0, UnitCategory::Weight)),
    ("kg", UnitConversion::new("g", 1000.0, UnitCategory::Weight)),
    ("ton", UnitConversion::new("g", 1_000_000.0, UnitCategory::Weight)),
    // Volume
    ("ml", UnitConversion::new("ml", 1.0, UnitCategory::Volume)),
    ("cl", UnitConversion::new("ml", 10.0, UnitCategory::Volume)),
    ("dl", UnitConversion::new("ml", 100.0, UnitCategory::Volume)),
    ("l", UnitConversion::new("ml", 1000.0, UnitCategory::Volume)),
    // Length
    ("mm", UnitConversion::new("cm", 0.1, UnitCategory::Length)),
    ("cm", UnitConversion::new("cm", 1.0, UnitCategory::Length)),
    ("m", UnitConversion::new("cm", 100.0, UnitCategory::Length)),
    ("km", UnitConversion::new("cm", 100_000.0, UnitCategory::Length)),
    // Area
    ("cm²", UnitConversion::new("cm²", 1.0, UnitCategory::Area)),
    ("m²", UnitConversion::new("cm²", 10_000.0, UnitCategory::Area)),
    // Count
    ("un", UnitConversion::new("un", 1.0, UnitCategory::Count)),
    ("pç", UnitConversion::new("un", 1.0, UnitCategory::Count)),
    ("rolo", UnitConversion::new("un", 1.0, UnitCategory::Count)),
    ("folha", UnitConversion::new("un", 1.0, UnitCategory::Count)),
    ("pacote", UnitConversion::new("un", 1.0, UnitCategory::Count)),
    ("caixa", UnitConversion::new("un", 1.0, UnitCategory::Count)),
    ("dúzia", UnitConversion::new("un", 12.0, UnitCategory::Count)),
    ("centena", UnitConversion::new("un", 100.0, UnitCategory::Count)),
    // Time
    ("min", UnitConversion::new("min", 1.0, UnitCategory::Time)),
    ("h", UnitConversion::new("min", 60.0, UnitCategory::Time)),
    ("dia", UnitConversion::new("min", 1440.0, UnitCategory::Time)),
];

/// Base unit of a dimension (`Weight` -> `g`)
pub fn base_unit_for(category: UnitCategory) -> &'static str {
    category.base_unit()
}

lazy_static! {
    static ref UNIT_REGISTRY: HashMap<&'static str, UnitConversion> =
        UNIT_TABLE.iter().copied().collect();
}

/// Look up a unit symbol, case-insensitively.
///
/// Surrounding whitespace is ignored. Unknown symbols return `None`, which
/// callers treat as the "unrecognized unit" outcome rather than an error.
///
/// ```rust
/// use price_compare::units::{lookup, UnitCategory};
///
/// let kg = lookup("KG").unwrap();
/// assert_eq!(kg.base_unit, "g");
/// assert_eq!(kg.multiplier, 1000.0);
/// assert_eq!(kg.category, UnitCategory::Weight);
/// assert!(lookup("xyz").is_none());
/// ```
pub fn lookup(unit_symbol: &str) -> Option<UnitConversion> {
    let key = unit_symbol.trim().to_lowercase();
    let found = UNIT_REGISTRY.get(key.as_str()).copied();
    trace!(unit = %unit_symbol, recognized = found.is_some(), "Unit registry lookup");
    found
}

/// Every registered unit symbol, in table order
pub fn known_symbols() -> impl Iterator<Item = &'static str> {
    UNIT_TABLE.iter().map(|(symbol, _)| *symbol)
}

/// Convert `quantity` expressed in `unit` into base units
pub fn to_base_units(quantity: f64, unit: &str) -> Option<f64> {
    lookup(unit).map(|conversion| quantity * conversion.multiplier)
}

/// Convert `quantity` expressed in base units back into `unit`
pub fn from_base_units(quantity: f64, unit: &str) -> Option<f64> {
    lookup(unit).map(|conversion| quantity / conversion.multiplier)
}
