//! Stock, weight and barcode types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What the target shop should do when a variant runs out of stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutOfStockAction {
    /// Refuse orders once stock reaches zero.
    #[default]
    Deny,
    /// Keep selling (backorder).
    Continue,
}

impl OutOfStockAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutOfStockAction::Deny => "deny",
            OutOfStockAction::Continue => "continue",
        }
    }

    /// Map a source inventory policy string.
    ///
    /// Returns `None` for anything unrecognized; callers must treat that as
    /// a mapping failure rather than pick a default.
    pub fn from_policy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "deny" => Some(OutOfStockAction::Deny),
            "continue" => Some(OutOfStockAction::Continue),
            _ => None,
        }
    }
}

/// Inventory state of a variant (or of a product, via its primary variant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Stock {
    /// On-hand quantity. Negative values are backorder depth; `None` is unknown.
    pub quantity: Option<i64>,
    /// Behavior once out of stock.
    pub out_of_stock_action: OutOfStockAction,
}

impl Stock {
    pub fn new(quantity: Option<i64>, out_of_stock_action: OutOfStockAction) -> Self {
        Self {
            quantity,
            out_of_stock_action,
        }
    }
}

/// Weight unit tag. No numeric conversion happens between units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightUnit {
    #[default]
    Kg,
    Gr,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Gr => "gr",
        }
    }

    /// Map a raw unit string, case-insensitively.
    pub fn from_unit(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Some(WeightUnit::Kg),
            "gr" | "g" | "gram" | "grams" => Some(WeightUnit::Gr),
            _ => None,
        }
    }
}

/// A weight value tagged with its unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Weight {
    /// Weight value as reported upstream; `None` when unknown.
    pub value: Option<Decimal>,
    pub unit: WeightUnit,
}

impl Weight {
    pub fn new(value: Option<Decimal>, unit: WeightUnit) -> Self {
        Self { value, unit }
    }
}

/// Product barcode. At most one of the two codes is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Barcode {
    pub upc: Option<String>,
    pub ean_13: Option<String>,
}

impl Barcode {
    /// Classify a raw barcode string.
    ///
    /// Exactly twelve ASCII digits is a UPC-A; any other non-empty code is
    /// kept as EAN-13. Blank input yields an empty barcode.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let code = match raw.map(str::trim) {
            Some(code) if !code.is_empty() => code,
            _ => return Self::default(),
        };

        if code.len() == 12 && code.bytes().all(|b| b.is_ascii_digit()) {
            Self {
                upc: Some(code.to_string()),
                ean_13: None,
            }
        } else {
            Self {
                upc: None,
                ean_13: Some(code.to_string()),
            }
        }
    }

    /// The effective code: UPC when present, else EAN-13.
    pub fn value(&self) -> Option<&str> {
        self.upc.as_deref().or(self.ean_13.as_deref())
    }
}
