//! Typed source-platform records.
//!
//! Raw product JSON is parsed into these structs before any mapping happens,
//! so malformed input is rejected at the boundary instead of deep inside the
//! normalizer. Fields that the source platform sends as either numbers or
//! strings (ids, prices, weights) are captured loosely here and validated by
//! the normalizer.

use crate::error::MappingError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// An id sent as a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SourceId {
    Number(u64),
    Text(String),
}

impl SourceId {
    /// The id as a string; blank text ids count as missing.
    pub fn to_id_string(&self) -> Option<String> {
        match self {
            SourceId::Number(n) => Some(n.to_string()),
            SourceId::Text(s) if s.trim().is_empty() => None,
            SourceId::Text(s) => Some(s.trim().to_string()),
        }
    }
}

/// A decimal sent as a JSON string ("20.00") or number (0.5).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDecimal {
    Text(String),
    Number(serde_json::Number),
}

impl RawDecimal {
    /// Parse into a decimal. Blank strings are treated as absent.
    pub fn parse(&self, field: &'static str) -> Result<Option<Decimal>, MappingError> {
        let text = match self {
            RawDecimal::Text(s) if s.trim().is_empty() => return Ok(None),
            RawDecimal::Text(s) => s.trim().to_string(),
            RawDecimal::Number(n) => n.to_string(),
        };

        text.parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(&text))
            .map(Some)
            .map_err(|_| MappingError::InvalidDecimal { field, value: text })
    }
}

/// Parse an optional raw decimal field.
pub fn parse_decimal(
    raw: Option<&RawDecimal>,
    field: &'static str,
) -> Result<Option<Decimal>, MappingError> {
    match raw {
        Some(raw) => raw.parse(field),
        None => Ok(None),
    }
}

/// Tags as a comma-separated string or a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawTags {
    Text(String),
    List(Vec<String>),
}

impl Default for RawTags {
    fn default() -> Self {
        RawTags::List(Vec::new())
    }
}

impl RawTags {
    /// Trimmed, non-empty, de-duplicated tags in source order.
    pub fn to_list(&self) -> Vec<String> {
        let parts: Vec<&str> = match self {
            RawTags::Text(s) => s.split(',').collect(),
            RawTags::List(items) => items.iter().map(String::as_str).collect(),
        };

        let mut tags: Vec<String> = Vec::new();
        for tag in parts.into_iter().map(str::trim).filter(|t| !t.is_empty()) {
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        tags
    }
}

/// One option definition (e.g., "Color" with its values).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceOption {
    #[serde(default)]
    pub id: Option<SourceId>,
    pub name: String,
    #[serde(default)]
    pub position: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<String>,
}

/// One product image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceImage {
    #[serde(default)]
    pub id: Option<SourceId>,
    #[serde(default)]
    pub position: Option<i32>,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    /// Variants this image is attached to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub variant_ids: Vec<SourceId>,
}

/// One product variant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceVariant {
    #[serde(default)]
    pub id: Option<SourceId>,
    #[serde(default)]
    pub price: Option<RawDecimal>,
    #[serde(default)]
    pub compare_at_price: Option<RawDecimal>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub weight: Option<RawDecimal>,
    #[serde(default)]
    pub weight_unit: Option<String>,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    #[serde(default)]
    pub inventory_policy: Option<String>,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
    #[serde(default)]
    pub requires_shipping: Option<bool>,
    #[serde(default)]
    pub taxable: Option<bool>,
}

impl SourceVariant {
    /// The three option slots in slot order.
    pub fn option_values(&self) -> [Option<&str>; 3] {
        [
            self.option1.as_deref(),
            self.option2.as_deref(),
            self.option3.as_deref(),
        ]
    }
}

/// One source product record with its variants, images and options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceProduct {
    #[serde(default)]
    pub id: Option<SourceId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: RawTags,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<SourceOption>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<SourceImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<SourceVariant>,
}

impl SourceProduct {
    /// Parse one raw JSON record.
    pub fn from_value(value: serde_json::Value) -> Result<Self, MappingError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse one raw JSON record from text.
    pub fn from_json(json: &str) -> Result<Self, MappingError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Best-effort id of a raw record, for reporting records that fail to parse.
pub fn record_id_hint(value: &serde_json::Value) -> Option<String> {
    match value.get("id")? {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
