//! Catalog migration core.
//!
//! Maps loosely-typed source-platform product records into a canonical,
//! platform-neutral product model:
//!
//! - **Model**: Products, variants, images, attributes, stock, pricing
//! - **Source**: Typed source records, parsed and validated at the boundary
//! - **Reconcile**: Attribute groups from options, attribute pairs per variant
//! - **Normalize**: Field fallbacks and enum/unit coercions per product
//! - **Driver**: Fetch → normalize → submit, with per-record failure isolation
//!
//! # Example
//!
//! ```rust
//! use cart_migrate_core::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let record = SourceProduct::from_json(r#"{
//!     "id": 1,
//!     "title": "Shirt",
//!     "options": [{ "id": 1, "name": "Color", "values": ["Red", "Blue"] }],
//!     "variants": [{ "id": 10, "price": "20.00", "compare_at_price": "25.00", "option1": "Red" }]
//! }"#).unwrap();
//!
//! let product = normalize(record).unwrap();
//! assert_eq!(product.price, Some(Decimal::new(2500, 2)));
//! assert_eq!(product.variants[0].attribute_pairs[0].label(), "Color: Red");
//! ```

pub mod driver;
pub mod error;
pub mod ids;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod source;

pub use driver::{
    MigrationDriver, MigrationObserver, MigrationReport, NormalizedBatch, RecordFailure,
    SourceCollector, TargetSubmitter, TracingObserver,
};
pub use error::{MappingError, TransportError};
pub use ids::*;
pub use normalize::{normalize, normalize_with_stats, Normalized};
pub use reconcile::{build_attribute_groups, match_variant_attributes, AttributeMatch, MatchStats};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{MappingError, TransportError};
    pub use crate::ids::*;

    // Model
    pub use crate::model::{
        Attribute, AttributeGroup, AttributePair, Barcode, Category, Image, Manufacturer,
        OutOfStockAction, Product, ReductionType, SpecificPrice, Stock, Variant, Weight,
        WeightUnit,
    };

    // Mapping
    pub use crate::normalize::{normalize, normalize_with_stats};
    pub use crate::reconcile::{build_attribute_groups, match_variant_attributes};
    pub use crate::source::SourceProduct;

    // Driver
    pub use crate::driver::{MigrationDriver, MigrationReport, SourceCollector, TargetSubmitter};
}
