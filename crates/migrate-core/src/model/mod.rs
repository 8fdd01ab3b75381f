//! Canonical catalog model.
//!
//! Platform-neutral types every source is normalized into and every target
//! is fed from: products, variants, attributes, stock, pricing and media.

mod attribute;
mod inventory;
mod media;
mod pricing;
mod product;
mod taxonomy;

pub use attribute::{Attribute, AttributeGroup, AttributePair};
pub use inventory::{Barcode, OutOfStockAction, Stock, Weight, WeightUnit};
pub use media::Image;
pub use pricing::{ReductionType, SpecificPrice};
pub use product::{Product, Variant};
pub use taxonomy::{slugify, Category, Manufacturer};
