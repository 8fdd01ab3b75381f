//! HTTP adapters for catalog migration.
//!
//! Provides the transport collaborators the migration driver runs against:
//!
//! - [`ShopifySource`] - paginated product fetch from an Admin REST API
//! - [`HttpTarget`] - posts canonical products to a target endpoint
//! - [`JsonFileSource`] - reads source records from a local JSON file
//! - [`JsonFileTarget`] - writes canonical products to a local file
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_migrate_core::MigrationDriver;
//! use cart_migrate_http::{HttpTarget, ShopifySource};
//!
//! let source = ShopifySource::new("https://shop.example.com", "shpat_...");
//! let target = HttpTarget::new("https://target.example.com/api/products", "token");
//!
//! let report = MigrationDriver::new().run(&source, &target).await?;
//! println!("migrated {}", report.migrated);
//! ```

mod client;
mod error;
mod file;
mod response;
mod shopify;
mod target;

pub use client::FetchClient;
pub use error::FetchError;
pub use file::{records_from_document, JsonFileSource, JsonFileTarget};
pub use response::{next_link, Response};
pub use shopify::{parse_page, ShopifySource, DEFAULT_API_VERSION, MAX_PAGE_SIZE};
pub use target::HttpTarget;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        FetchClient, FetchError, HttpTarget, JsonFileSource, JsonFileTarget, ShopifySource,
    };
}
