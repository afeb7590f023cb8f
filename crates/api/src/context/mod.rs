//! Application context - dependency injection container

use std::sync::Arc;

use ordertrack_core::{DocumentStore, OrderService, RecordService, SearchService};
use ordertrack_domain::{Config, Result, Table};
use ordertrack_infra::open_document_store;
use tracing::info;

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub search: Arc<SearchService>,
    pub records: Arc<RecordService>,
    pub orders: Arc<OrderService>,
}

impl AppContext {
    /// Open the configured store and build every service on top of it.
    pub fn new(config: Config) -> Result<Self> {
        let store = open_document_store(&config)?;
        Ok(Self::with_store(config, store))
    }

    /// Build the services over an already opened store.
    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        let search = Arc::new(
            SearchService::new(Arc::clone(&store)).with_concurrency(config.reconcile.concurrency),
        );
        let records = Arc::new(RecordService::new(Arc::clone(&store)));
        let orders = Arc::new(OrderService::new(Arc::clone(&records)));

        info!(
            backend = %config.store.backend,
            reconcile_concurrency = config.reconcile.concurrency,
            "application context initialised"
        );

        Self { config, store, search, records, orders }
    }

    /// Probe the document store with a keyed read.
    pub async fn health_check(&self) -> HealthStatus {
        let store = match self.store.get(Table::SystemLogs, "health-probe").await {
            Ok(_) => ComponentHealth::healthy("document_store"),
            Err(err) => ComponentHealth::unhealthy("document_store", err.to_string()),
        };

        let mut status = HealthStatus::new().add_component(store);
        status.calculate_score();
        status
    }
}
