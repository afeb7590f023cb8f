//! Header/detail reconciliation
//!
//! The store has no join or aggregate, so each header costs one detail scan
//! keyed by its natural key. The derived value is
//! `required quantity - matching detail count`.
//!
//! A failed lookup never fails the pipeline: that header gets its full
//! required quantity (nothing fulfilled) and the next header is processed.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use ordertrack_domain::{
    AugmentedExportHeader, AugmentedOrderHeader, ExportHeader, OrderHeader, QueryDescriptor,
};
use tracing::{debug, warn};

use crate::store::DocumentStore;

/// A header record that can be reconciled against its detail table.
pub trait Reconcilable: Send + Sync {
    /// The header with its derived count attached.
    type Augmented: Send;

    /// Natural-key equality query against the detail table, or `None` when
    /// the header's natural key is incomplete.
    fn detail_query(&self) -> Option<QueryDescriptor>;

    /// Quantity the details are counted against.
    fn required_quantity(&self) -> i64;

    /// Header id, for log fields.
    fn record_id(&self) -> &str;

    /// Attach the derived value (`required - matched`, or `required` on failure).
    fn augment(self, derived: i64) -> Self::Augmented;
}

/// Runs one detail lookup per header.
///
/// Headers are visited from last to first. With the default concurrency of 1
/// exactly one lookup is in flight at a time; higher values allow a bounded
/// fan-out. Results always come back in input order.
pub struct ReconciliationPipeline {
    store: Arc<dyn DocumentStore>,
    concurrency: usize,
}

impl ReconciliationPipeline {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store, concurrency: 1 }
    }

    /// Allow up to `concurrency` detail lookups in flight (minimum 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Effective fan-out, never below 1.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Attach `leftOutstanding` to every order header.
    pub async fn reconcile_orders(&self, headers: Vec<OrderHeader>) -> Vec<AugmentedOrderHeader> {
        self.reconcile(headers).await
    }

    /// Attach `awaitingScan` to every export header.
    pub async fn reconcile_extracted_orders(
        &self,
        headers: Vec<ExportHeader>,
    ) -> Vec<AugmentedExportHeader> {
        self.reconcile(headers).await
    }

    /// Derive a value for every header in `headers`, preserving their order.
    pub async fn reconcile<H: Reconcilable>(&self, headers: Vec<H>) -> Vec<H::Augmented> {
        if headers.is_empty() {
            return Vec::new();
        }

        let total = headers.len();
        let mut augmented: Vec<H::Augmented> = stream::iter(headers.into_iter().rev())
            .map(|header| async move {
                let derived = self.derive(&header).await;
                header.augment(derived)
            })
            .buffered(self.concurrency)
            .collect()
            .await;
        augmented.reverse();

        debug!(records = total, concurrency = self.concurrency, "reconciliation complete");
        augmented
    }

    async fn derive<H: Reconcilable>(&self, header: &H) -> i64 {
        let required = header.required_quantity();

        let Some(query) = header.detail_query() else {
            warn!(
                record_id = header.record_id(),
                "natural key incomplete; assuming nothing fulfilled"
            );
            return required;
        };

        match self.store.scan(&query).await {
            Ok(output) => {
                let matched = i64::try_from(output.count).unwrap_or(i64::MAX);
                required.saturating_sub(matched)
            }
            Err(err) => {
                warn!(
                    record_id = header.record_id(),
                    query = %query,
                    error = %err,
                    "detail lookup failed; assuming nothing fulfilled"
                );
                required
            }
        }
    }
}
