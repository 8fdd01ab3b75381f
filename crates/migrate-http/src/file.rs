//! Local JSON file source and target, for offline runs and inspection.

use crate::target::ProductBatch;
use crate::FetchError;
use async_trait::async_trait;
use cart_migrate_core::model::Product;
use cart_migrate_core::{SourceCollector, TargetSubmitter, TransportError};
use std::path::{Path, PathBuf};

/// Reads source records from a JSON file.
///
/// Accepts either a bare array of records or an object with a `products`
/// array (the shape the Admin API serves).
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Pull the record list out of a parsed document.
pub fn records_from_document(doc: serde_json::Value) -> Result<Vec<serde_json::Value>, FetchError> {
    match doc {
        serde_json::Value::Array(records) => Ok(records),
        serde_json::Value::Object(mut map) => match map.remove("products") {
            Some(serde_json::Value::Array(records)) => Ok(records),
            _ => Err(FetchError::ParseError(
                "expected a \"products\" array".to_string(),
            )),
        },
        _ => Err(FetchError::ParseError(
            "expected an array of product records".to_string(),
        )),
    }
}

#[async_trait]
impl SourceCollector for JsonFileSource {
    async fn fetch_all(&self) -> Result<Vec<serde_json::Value>, TransportError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| FetchError::from(e).into_fetch())?;
        let doc: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| FetchError::from(e).into_fetch())?;
        records_from_document(doc).map_err(FetchError::into_fetch)
    }
}

/// Writes canonical products to a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileTarget {
    path: PathBuf,
}

impl JsonFileTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TargetSubmitter for JsonFileTarget {
    async fn submit(&self, products: &[Product]) -> Result<usize, TransportError> {
        let json = serde_json::to_vec_pretty(&ProductBatch { products })
            .map_err(|e| FetchError::from(e).into_submit())?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| FetchError::from(e).into_submit())?;

        tracing::debug!(count = products.len(), path = %self.path.display(), "Wrote products");
        Ok(products.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_migrate_core::model::Variant;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_records_from_array_or_wrapper() {
        assert_eq!(records_from_document(json!([{ "id": 1 }])).unwrap().len(), 1);
        assert_eq!(
            records_from_document(json!({ "products": [{ "id": 1 }, { "id": 2 }] }))
                .unwrap()
                .len(),
            2
        );
        assert!(records_from_document(json!({ "items": [] })).is_err());
        assert!(records_from_document(json!("nope")).is_err());
    }

    #[tokio::test]
    async fn test_file_source_reads_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"products": [{{"id": 1, "title": "Shirt"}}]}}"#).unwrap();

        let records = JsonFileSource::new(file.path()).fetch_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["title"], "Shirt");
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileSource::new(dir.path().join("records.json"))
            .fetch_all()
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_file_target_writes_products() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        let mut product = Product::new("1", "Shirt");
        product.variants.push(Variant::new("10", Decimal::new(2000, 2)));

        let count = JsonFileTarget::new(&path).submit(&[product]).await.unwrap();
        assert_eq!(count, 1);

        let written: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(written["products"][0]["id"], "1");
        assert_eq!(written["products"][0]["variants"][0]["price"], "20.00");
    }

    #[tokio::test]
    async fn test_unwritable_file_is_submit_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = JsonFileTarget::new(dir.path().join("missing").join("out.json"));
        let err = target.submit(&[]).await.unwrap_err();
        assert!(matches!(err, TransportError::Submit(_)));
    }
}
