//! Document store selection from configuration

use std::sync::Arc;

use ordertrack_core::DocumentStore;
use ordertrack_domain::{Config, Result, StoreBackend};
use tracing::info;

use crate::database::{DbManager, SqliteDocumentStore};
use crate::memory::InMemoryDocumentStore;

/// Open the configured document store, running migrations for SQLite.
pub fn open_document_store(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    match config.store.backend {
        StoreBackend::Sqlite => {
            let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
            db.run_migrations()?;
            db.health_check()?;
            info!(backend = %StoreBackend::Sqlite, path = %db.path().display(), "document store ready");
            Ok(Arc::new(SqliteDocumentStore::new(db)))
        }
        StoreBackend::Memory => {
            info!(backend = %StoreBackend::Memory, "document store ready");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
    }
}
