//! # OrderTrack Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The SQLite document store and its connection manager
//! - An in-memory document store
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements `DocumentStore` from `ordertrack-core`
//! - Contains all "impure" code (I/O, SQL)

pub mod config;
pub mod database;
pub mod errors;
pub mod memory;
pub mod store;

// Re-export commonly used items
pub use database::{DbManager, SqliteDocumentStore};
pub use errors::InfraError;
pub use memory::InMemoryDocumentStore;
pub use store::open_document_store;
