//! # OrderTrack Domain
//!
//! Business domain types for the purchase-order workflow service.
//!
//! This crate contains:
//! - Search criteria, query descriptors and header records
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Field-name and sentinel constants
//!
//! ## Architecture
//! - No dependencies on other OrderTrack crates
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
