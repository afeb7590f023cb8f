//! Search orchestration - core business logic
//!
//! validate -> build descriptor -> header scan -> reconcile (orders and
//! extracted orders only) -> outcome for presentation.

use std::sync::Arc;

use ordertrack_domain::{
    EntityKind, ExportHeader, OrderHeader, SearchOutcome, SearchRequest, SearchResults,
};
use tracing::{debug, error, info};

use crate::query::{build_query, validate};
use crate::reconcile::ReconciliationPipeline;
use crate::store::DocumentStore;

/// Search service
pub struct SearchService {
    store: Arc<dyn DocumentStore>,
    pipeline: ReconciliationPipeline,
}

impl SearchService {
    /// Create a new search service with sequential reconciliation
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let pipeline = ReconciliationPipeline::new(Arc::clone(&store));
        Self { store, pipeline }
    }

    /// Bound the number of detail lookups in flight per search
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.pipeline = self.pipeline.with_concurrency(concurrency);
        self
    }

    /// Run one search end to end.
    ///
    /// Never returns an error: validation and header-scan failures become a
    /// status on an empty outcome, and detail-lookup failures are absorbed by
    /// the reconciliation pipeline.
    pub async fn search(&self, request: SearchRequest) -> SearchOutcome {
        let kind = request.criteria.kind();

        if let Err(err) = validate(&request.criteria) {
            info!(%kind, error = %err, "search rejected by validation");
            return SearchOutcome::validation_failure(kind, err.to_string());
        }

        let query = build_query(&request.criteria, request.closed_only);
        debug!(%kind, query = %query, "scanning header table");

        let scan = match self.store.scan(&query).await {
            Ok(scan) => scan,
            Err(err) => {
                error!(%kind, query = %query, error = %err, "header scan failed");
                return SearchOutcome::query_failure(kind, err.to_string());
            }
        };

        let results = match kind {
            EntityKind::Order | EntityKind::OrderHeader => {
                let headers = scan.records.into_iter().map(OrderHeader::from_document).collect();
                SearchResults::Orders(self.pipeline.reconcile_orders(headers).await)
            }
            EntityKind::ExportHeader => {
                let headers = scan.records.into_iter().map(ExportHeader::from_document).collect();
                SearchResults::ExtractedOrders(
                    self.pipeline.reconcile_extracted_orders(headers).await,
                )
            }
            _ => SearchResults::Records(scan.records),
        };

        let outcome = SearchOutcome::ok(kind, results);
        debug!(%kind, count = outcome.count, "search complete");
        outcome
    }
}
