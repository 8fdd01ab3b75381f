//! Migration driver.
//!
//! Sequences source fetch, per-record parsing and normalization, and target
//! submission. Transport failures abort the run; mapping failures only drop
//! the offending record and are collected in the [`MigrationReport`].

use crate::error::{MappingError, TransportError};
use crate::ids::ProductId;
use crate::model::Product;
use crate::normalize::normalize_with_stats;
use crate::reconcile::MatchStats;
use crate::source::{record_id_hint, SourceProduct};
use async_trait::async_trait;
use std::sync::Arc;

/// Supplier of raw source-platform product records.
///
/// Pagination, authentication headers and the like are the implementor's
/// business; the driver only sees the full record list.
#[async_trait]
pub trait SourceCollector: Send + Sync {
    /// Fetch every product record from the source.
    async fn fetch_all(&self) -> Result<Vec<serde_json::Value>, TransportError>;
}

/// Sink for canonical products on the target side.
#[async_trait]
pub trait TargetSubmitter: Send + Sync {
    /// Submit products; returns how many entities were created or updated.
    async fn submit(&self, products: &[Product]) -> Result<usize, TransportError>;
}

/// Receives progress events from the driver.
///
/// All methods default to no-ops so observers only implement what they need.
pub trait MigrationObserver: Send + Sync {
    fn source_fetched(&self, _count: usize) {}

    fn record_failed(&self, _failure: &RecordFailure) {}

    /// A record normalized, but some option slots were ambiguous or unmatched.
    fn attribute_mismatch(&self, _product_id: &ProductId, _stats: &MatchStats) {}

    fn migrated(&self, _count: usize) {}
}

/// Observer that emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl MigrationObserver for TracingObserver {
    fn source_fetched(&self, count: usize) {
        tracing::info!(count, "Source data count {}", count);
    }

    fn record_failed(&self, failure: &RecordFailure) {
        tracing::warn!(
            index = failure.index,
            record_id = failure.record_id.as_deref().unwrap_or("<unknown>"),
            error = %failure.error,
            "Skipping source record"
        );
    }

    fn attribute_mismatch(&self, product_id: &ProductId, stats: &MatchStats) {
        tracing::warn!(
            product_id = %product_id,
            ambiguous = stats.ambiguous,
            unmatched = stats.unmatched,
            "Option values did not map one-to-one onto attribute groups"
        );
    }

    fn migrated(&self, count: usize) {
        tracing::info!(count, "Number of the entities migrated {}", count);
    }
}

/// A source record that could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Position of the record in the fetched list.
    pub index: usize,
    /// Source id, when one could be read.
    pub record_id: Option<String>,
    pub error: MappingError,
}

/// Outcome of normalizing a batch of records.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub products: Vec<Product>,
    pub failures: Vec<RecordFailure>,
    pub stats: MatchStats,
}

/// Summary of one migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Records returned by the source.
    pub source_count: usize,
    /// Records successfully normalized (and handed to the target).
    pub normalized_count: usize,
    /// Records dropped because of mapping errors.
    pub failures: Vec<RecordFailure>,
    /// Attribute-match diagnostics over all normalized records.
    pub match_stats: MatchStats,
    /// Entities the target reports as created or updated.
    pub migrated: usize,
}

impl MigrationReport {
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs migrations. Holds no state between runs.
#[derive(Clone)]
pub struct MigrationDriver {
    observer: Arc<dyn MigrationObserver>,
}

impl Default for MigrationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationDriver {
    /// Create a driver that reports through `tracing`.
    pub fn new() -> Self {
        Self {
            observer: Arc::new(TracingObserver),
        }
    }

    /// Report through a caller-owned observer instead.
    pub fn with_observer(mut self, observer: Arc<dyn MigrationObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Fetch, normalize and submit. Only transport errors fail the run.
    pub async fn run(
        &self,
        source: &dyn SourceCollector,
        target: &dyn TargetSubmitter,
    ) -> Result<MigrationReport, TransportError> {
        let records = source.fetch_all().await?;
        let source_count = records.len();
        self.observer.source_fetched(source_count);

        let batch = self.normalize_all(records);

        let migrated = target.submit(&batch.products).await?;
        self.observer.migrated(migrated);

        Ok(MigrationReport {
            source_count,
            normalized_count: batch.products.len(),
            failures: batch.failures,
            match_stats: batch.stats,
            migrated,
        })
    }

    /// Parse and normalize each record independently.
    pub fn normalize_all(&self, records: Vec<serde_json::Value>) -> NormalizedBatch {
        let mut batch = NormalizedBatch::default();

        for (index, value) in records.into_iter().enumerate() {
            let record_id = record_id_hint(&value);
            let result = SourceProduct::from_value(value).and_then(normalize_with_stats);

            match result {
                Ok(normalized) => {
                    if !normalized.stats.is_clean() {
                        self.observer
                            .attribute_mismatch(&normalized.product.id, &normalized.stats);
                    }
                    batch.stats.merge(normalized.stats);
                    batch.products.push(normalized.product);
                }
                Err(error) => {
                    let failure = RecordFailure {
                        index,
                        record_id,
                        error,
                    };
                    self.observer.record_failed(&failure);
                    batch.failures.push(failure);
                }
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    struct StaticSource(Vec<serde_json::Value>);

    #[async_trait]
    impl SourceCollector for StaticSource {
        async fn fetch_all(&self) -> Result<Vec<serde_json::Value>, TransportError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl SourceCollector for FailingSource {
        async fn fetch_all(&self) -> Result<Vec<serde_json::Value>, TransportError> {
            Err(TransportError::Fetch("HTTP 401: Unauthorized".to_string()))
        }
    }

    #[derive(Default)]
    struct CollectingTarget(Mutex<Vec<Product>>);

    #[async_trait]
    impl TargetSubmitter for CollectingTarget {
        async fn submit(&self, products: &[Product]) -> Result<usize, TransportError> {
            let mut seen = self.0.lock().unwrap();
            seen.extend_from_slice(products);
            Ok(products.len())
        }
    }

    #[derive(Default)]
    struct RecordingObserver(Mutex<Vec<String>>);

    impl MigrationObserver for RecordingObserver {
        fn source_fetched(&self, count: usize) {
            self.0.lock().unwrap().push(format!("fetched {}", count));
        }

        fn record_failed(&self, failure: &RecordFailure) {
            self.0
                .lock()
                .unwrap()
                .push(format!("failed {:?}", failure.record_id));
        }

        fn attribute_mismatch(&self, product_id: &ProductId, stats: &MatchStats) {
            self.0.lock().unwrap().push(format!(
                "mismatch {} ambiguous={} unmatched={}",
                product_id, stats.ambiguous, stats.unmatched
            ));
        }

        fn migrated(&self, count: usize) {
            self.0.lock().unwrap().push(format!("migrated {}", count));
        }
    }

    fn good(id: u64) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Product {}", id),
            "variants": [{ "id": id * 10, "price": "9.99", "inventory_policy": "deny" }]
        })
    }

    #[tokio::test]
    async fn test_bad_record_does_not_abort_batch() {
        let mut bad = good(2);
        bad["variants"][0]["inventory_policy"] = json!("whenever");
        let source = StaticSource(vec![good(1), bad, good(3)]);
        let target = CollectingTarget::default();
        let observer = Arc::new(RecordingObserver::default());

        let report = MigrationDriver::new()
            .with_observer(observer.clone())
            .run(&source, &target)
            .await
            .unwrap();

        assert_eq!(report.source_count, 3);
        assert_eq!(report.normalized_count, 2);
        assert_eq!(report.migrated, 2);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert_eq!(report.failures[0].record_id.as_deref(), Some("2"));

        let submitted = target.0.lock().unwrap();
        let ids: Vec<_> = submitted.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        let events = observer.0.lock().unwrap();
        assert_eq!(
            *events,
            vec!["fetched 3", "failed Some(\"2\")", "migrated 2"]
        );
    }

    #[tokio::test]
    async fn test_ambiguous_option_is_observed() {
        // "Natural" names both a color and a material.
        let mut redundant = good(2);
        redundant["options"] = json!([
            { "id": 1, "name": "Color", "values": ["Natural", "Black"] },
            { "id": 2, "name": "Material", "values": ["Natural", "Leather"] }
        ]);
        redundant["variants"][0]["option1"] = json!("Natural");

        let mut clean = good(3);
        clean["options"] = json!([{ "id": 1, "name": "Color", "values": ["Black"] }]);
        clean["variants"][0]["option1"] = json!("Black");

        let source = StaticSource(vec![redundant, clean]);
        let target = CollectingTarget::default();
        let observer = Arc::new(RecordingObserver::default());

        let report = MigrationDriver::new()
            .with_observer(observer.clone())
            .run(&source, &target)
            .await
            .unwrap();

        assert_eq!(report.migrated, 2);
        assert_eq!(report.match_stats, MatchStats { ambiguous: 1, unmatched: 0 });

        let events = observer.0.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                "fetched 2",
                "mismatch 2 ambiguous=1 unmatched=0",
                "migrated 2"
            ]
        );

        let submitted = target.0.lock().unwrap();
        assert_eq!(submitted[0].variants[0].attribute_pairs.len(), 2);
        assert_eq!(submitted[1].variants[0].attribute_pairs.len(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_fails_run() {
        let target = CollectingTarget::default();
        let result = MigrationDriver::new().run(&FailingSource, &target).await;
        assert!(matches!(result, Err(TransportError::Fetch(_))));
        assert!(target.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unparseable_record_is_reported() {
        let batch = MigrationDriver::new().normalize_all(vec![json!({ "id": 5, "options": 3 })]);
        assert!(batch.products.is_empty());
        assert!(matches!(batch.failures[0].error, MappingError::Malformed(_)));
        assert_eq!(batch.failures[0].record_id.as_deref(), Some("5"));
    }

    #[test]
    fn test_empty_source() {
        let batch = MigrationDriver::new().normalize_all(Vec::new());
        assert!(batch.products.is_empty());
        assert!(batch.failures.is_empty());
        assert!(batch.stats.is_clean());
    }
}
