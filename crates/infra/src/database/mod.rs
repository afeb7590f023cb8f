//! SQLite document store

pub mod document_store;
pub mod manager;

pub use document_store::SqliteDocumentStore;
pub use manager::{DbManager, SqliteConnection};
