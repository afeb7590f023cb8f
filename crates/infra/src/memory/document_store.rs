//! `DocumentStore` over in-process maps
//!
//! Used for local runs and tests. Descriptors are evaluated with
//! [`QueryDescriptor::matches`], so results agree with the SQLite adapter for
//! string and numeric fields. Documents come back ordered by ID.

use std::collections::BTreeMap;

use async_trait::async_trait;
use ordertrack_core::DocumentStore;
use ordertrack_domain::{
    Document, OrderTrackError, QueryDescriptor, Result as DomainResult, ScanOutput, Table,
};
use parking_lot::RwLock;

type Collection = BTreeMap<String, Document>;

#[derive(Default)]
pub struct InMemoryDocumentStore {
    tables: RwLock<BTreeMap<Table, Collection>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents held for `table`.
    pub fn len(&self, table: Table) -> usize {
        self.tables.read().get(&table).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().values().all(BTreeMap::is_empty)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn scan(&self, query: &QueryDescriptor) -> DomainResult<ScanOutput> {
        let records = self
            .tables
            .read()
            .get(&query.target)
            .map(|docs| docs.values().filter(|doc| query.matches(doc)).cloned().collect())
            .unwrap_or_default();
        Ok(ScanOutput::new(records))
    }

    async fn get(&self, table: Table, id: &str) -> DomainResult<Option<Document>> {
        Ok(self.tables.read().get(&table).and_then(|docs| docs.get(id).cloned()))
    }

    async fn put(&self, table: Table, id: &str, document: Document) -> DomainResult<()> {
        self.tables.write().entry(table).or_default().insert(id.to_string(), document);
        Ok(())
    }

    async fn update(&self, table: Table, id: &str, changes: Document) -> DomainResult<()> {
        let mut tables = self.tables.write();
        let document = tables
            .get_mut(&table)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| OrderTrackError::NotFound(format!("{table}/{id}")))?;
        document.extend(changes);
        Ok(())
    }

    async fn delete(&self, table: Table, id: &str) -> DomainResult<()> {
        if let Some(docs) = self.tables.write().get_mut(&table) {
            docs.remove(id);
        }
        Ok(())
    }
}
