//! Product-type tags assigned by the caller.
//!
//! These are distinct from [`UnitCategory`](crate::units::UnitCategory): a
//! product tagged `Limpeza` may be sold by the litre or by the unit. The tag
//! only drives labels and unit suggestions.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Alimentos,
    Bebidas,
    Limpeza,
    Higiene,
    PapelHigienico,
    #[serde(other)]
    Outros,
}

/// Static metadata attached to each product category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryInfo {
    pub label: &'static str,
    pub icon: &'static str,
    /// Unit pre-selected when a product of this category is created
    pub default_unit: &'static str,
    /// Units offered first for this category, most common first
    pub suggested_units: &'static [&'static str],
}

const ALIMENTOS: CategoryInfo = CategoryInfo {
    label: "Alimentos",
    icon: "🍎",
    default_unit: "kg",
    suggested_units: &["kg", "g", "un", "pacote", "dúzia"],
};

const BEBIDAS: CategoryInfo = CategoryInfo {
    label: "Bebidas",
    icon: "🥤",
    default_unit: "l",
    suggested_units: &["l", "ml", "un", "caixa"],
};

const LIMPEZA: CategoryInfo = CategoryInfo {
    label: "Limpeza",
    icon: "🧽",
    default_unit: "l",
    suggested_units: &["l", "ml", "un", "kg"],
};

const HIGIENE: CategoryInfo = CategoryInfo {
    label: "Higiene",
    icon: "🧴",
    default_unit: "un",
    suggested_units: &["un", "ml", "g", "pacote"],
};

const PAPEL_HIGIENICO: CategoryInfo = CategoryInfo {
    label: "Papel Higiênico",
    icon: "🧻",
    default_unit: "rolo",
    suggested_units: &["rolo", "pacote", "m", "folha"],
};

const OUTROS: CategoryInfo = CategoryInfo {
    label: "Outros",
    icon: "📦",
    default_unit: "un",
    suggested_units: &["un", "kg", "l", "m"],
};

impl ProductCategory {
    pub const ALL: [ProductCategory; 6] = [
        ProductCategory::Alimentos,
        ProductCategory::Bebidas,
        ProductCategory::Limpeza,
        ProductCategory::Higiene,
        ProductCategory::PapelHigienico,
        ProductCategory::Outros,
    ];

    pub fn info(&self) -> &'static CategoryInfo {
        match self {
            ProductCategory::Alimentos => &ALIMENTOS,
            ProductCategory::Bebidas => &BEBIDAS,
            ProductCategory::Limpeza => &LIMPEZA,
            ProductCategory::Higiene => &HIGIENE,
            ProductCategory::PapelHigienico => &PAPEL_HIGIENICO,
            ProductCategory::Outros => &OUTROS,
        }
    }

    pub fn label(&self) -> &'static str {
        self.info().label
    }

    pub fn default_unit(&self) -> &'static str {
        self.info().default_unit
    }

    /// Whether `unit` is among the suggestions for this category (case-insensitive)
    pub fn suggests_unit(&self, unit: &str) -> bool {
        let unit = unit.trim().to_lowercase();
        self.info().suggested_units.iter().any(|u| *u == unit)
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.info().icon, self.label())
    }
}
