//! Port interfaces for document persistence
//!
//! The core only needs a scan primitive plus keyed reads and writes. It
//! assumes a scan returns the complete matching set in one call.

use async_trait::async_trait;
use ordertrack_domain::{Document, QueryDescriptor, Result, ScanOutput, Table};

/// Trait for a schemaless document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return every document of `query.target` matching all clauses
    async fn scan(&self, query: &QueryDescriptor) -> Result<ScanOutput>;

    /// Get a document by ID
    async fn get(&self, table: Table, id: &str) -> Result<Option<Document>>;

    /// Insert or replace a document
    async fn put(&self, table: Table, id: &str, document: Document) -> Result<()>;

    /// Shallow-merge `changes` into an existing document.
    ///
    /// Returns `NotFound` when no document has that ID.
    async fn update(&self, table: Table, id: &str, changes: Document) -> Result<()>;

    /// Delete a document by ID; deleting a missing document is not an error
    async fn delete(&self, table: Table, id: &str) -> Result<()>;
}
