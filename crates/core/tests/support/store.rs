//! Scriptable in-memory `DocumentStore`
//!
//! Records every scan it receives, evaluates descriptors against seeded
//! documents, and can be told to fail scans or writes for chosen tables or
//! queries.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use ordertrack_core::DocumentStore;
use ordertrack_domain::{
    Document, OrderTrackError, QueryDescriptor, Result as DomainResult, ScanOutput, Table,
};
use parking_lot::Mutex;

type ScanFailure = Box<dyn Fn(&QueryDescriptor) -> bool + Send + Sync>;

#[derive(Default)]
pub struct ScriptedStore {
    documents: Mutex<BTreeMap<Table, BTreeMap<String, Document>>>,
    scans: Mutex<Vec<QueryDescriptor>>,
    scan_failures: Mutex<Vec<ScanFailure>>,
    failing_writes: Mutex<Vec<Table>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document; its `id` field (if any) becomes the key.
    pub fn with_document(self, table: Table, document: Document) -> Self {
        self.insert(table, document);
        self
    }

    pub fn insert(&self, table: Table, document: Document) {
        let id = document
            .get("id")
            .and_then(|v| v.as_str())
            .map_or_else(|| format!("seed-{}", self.len(table)), str::to_string);
        self.documents.lock().entry(table).or_default().insert(id, document);
    }

    /// Fail any scan whose descriptor satisfies `predicate`.
    pub fn fail_scans_when(
        self,
        predicate: impl Fn(&QueryDescriptor) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.scan_failures.lock().push(Box::new(predicate));
        self
    }

    pub fn fail_scans_on(self, table: Table) -> Self {
        self.fail_scans_when(move |query| query.target == table)
    }

    pub fn fail_writes_on(self, table: Table) -> Self {
        self.failing_writes.lock().push(table);
        self
    }

    /// Every scan issued so far, in issue order.
    pub fn scans(&self) -> Vec<QueryDescriptor> {
        self.scans.lock().clone()
    }

    pub fn scan_count(&self) -> usize {
        self.scans.lock().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn documents(&self, table: Table) -> Vec<Document> {
        self.documents
            .lock()
            .get(&table)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, table: Table) -> usize {
        self.documents.lock().get(&table).map_or(0, BTreeMap::len)
    }

    fn check_write(&self, table: Table) -> DomainResult<()> {
        if self.failing_writes.lock().contains(&table) {
            return Err(OrderTrackError::Database(format!("{table} is read-only")));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for ScriptedStore {
    async fn scan(&self, query: &QueryDescriptor) -> DomainResult<ScanOutput> {
        self.scans.lock().push(query.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.scan_failures.lock().iter().any(|fails| fails(query)) {
            return Err(OrderTrackError::Database(format!("scan failed: {query}")));
        }

        let records = self
            .documents
            .lock()
            .get(&query.target)
            .map(|docs| docs.values().filter(|doc| query.matches(doc)).cloned().collect())
            .unwrap_or_default();
        Ok(ScanOutput::new(records))
    }

    async fn get(&self, table: Table, id: &str) -> DomainResult<Option<Document>> {
        Ok(self.documents.lock().get(&table).and_then(|docs| docs.get(id).cloned()))
    }

    async fn put(&self, table: Table, id: &str, document: Document) -> DomainResult<()> {
        self.check_write(table)?;
        self.documents.lock().entry(table).or_default().insert(id.to_string(), document);
        Ok(())
    }

    async fn update(&self, table: Table, id: &str, changes: Document) -> DomainResult<()> {
        self.check_write(table)?;
        let mut documents = self.documents.lock();
        let existing = documents
            .get_mut(&table)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| OrderTrackError::NotFound(format!("{table}/{id}")))?;
        existing.extend(changes);
        Ok(())
    }

    async fn delete(&self, table: Table, id: &str) -> DomainResult<()> {
        self.check_write(table)?;
        if let Some(docs) = self.documents.lock().get_mut(&table) {
            docs.remove(id);
        }
        Ok(())
    }
}
