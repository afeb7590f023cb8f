//! # OrderTrack API
//!
//! HTTP application layer - routes, handlers and the server entry point.
//!
//! This crate contains:
//! - axum routes (client → backend bridge)
//! - Application context (dependency injection)
//! - Logging setup and error-to-response mapping
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Exposes search, order workflow and record administration over JSON

pub mod context;
pub mod error;
pub mod routes;
pub mod utils;

pub use context::AppContext;
pub use error::ApiError;
pub use routes::router;
