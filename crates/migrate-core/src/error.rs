//! Mapping and transport error types.

use thiserror::Error;

/// Errors raised while turning one source record into a canonical product.
///
/// A mapping error only ever fails the record it was raised for; the driver
/// records it and moves on to the next record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The record could not be parsed into the typed source shape.
    #[error("Malformed source record: {0}")]
    Malformed(String),

    /// The product record carries no id.
    #[error("Source product is missing its id")]
    MissingProductId,

    /// A variant carries no id.
    #[error("Variant #{index} of product {product_id} is missing its id")]
    MissingVariantId { product_id: String, index: usize },

    /// The inventory policy string is not one we know how to map.
    #[error("Unrecognized inventory policy {value:?} on variant {variant_id}")]
    UnknownInventoryPolicy { variant_id: String, value: String },

    /// The weight unit string is not one we know how to map.
    #[error("Unrecognized weight unit {value:?} on variant {variant_id}")]
    UnknownWeightUnit { variant_id: String, value: String },

    /// A date field is not valid RFC 3339.
    #[error("Invalid date in {field}: {value:?} ({reason})")]
    InvalidDate {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// A decimal field could not be parsed.
    #[error("Invalid decimal in {field}: {value:?}")]
    InvalidDecimal { field: &'static str, value: String },

    /// A variant price below zero.
    #[error("Negative price {price} on variant {variant_id}")]
    NegativePrice { variant_id: String, price: String },

    /// An image without a usable source path.
    #[error("Image {image_id} of product {product_id} has no source path")]
    MissingImagePath {
        product_id: String,
        image_id: String,
    },
}

impl From<serde_json::Error> for MappingError {
    fn from(e: serde_json::Error) -> Self {
        MappingError::Malformed(e.to_string())
    }
}

/// Errors from the source or target collaborators.
///
/// Unlike [`MappingError`], a transport error fails the whole run.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Fetching source records failed.
    #[error("Source fetch failed: {0}")]
    Fetch(String),

    /// Submitting canonical products failed.
    #[error("Target submit failed: {0}")]
    Submit(String),
}
