//! # OrderTrack Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Predicate builders that turn search criteria into query descriptors
//! - The header/detail reconciliation pipeline
//! - Search, order workflow and record services
//! - The `DocumentStore` port the infrastructure layer implements
//!
//! ## Architecture Principles
//! - Only depends on `ordertrack-domain`
//! - No database, HTTP, or platform code
//! - All storage access via the `DocumentStore` trait

pub mod orders;
pub mod query;
pub mod reconcile;
pub mod records;
pub mod search;
pub mod store;

pub use orders::OrderService;
pub use query::{build_query, validate};
pub use reconcile::{Reconcilable, ReconciliationPipeline};
pub use records::{AuditAction, RecordService};
pub use search::SearchService;
pub use store::DocumentStore;
