//! HTTP routes
//!
//! ```text
//! GET    /health
//! GET    /api/search/{kind}
//! POST   /api/orders
//! POST   /api/orders/{id}/close
//! POST   /api/scans
//! POST   /api/export-scans
//! POST   /api/records/{table}
//! GET    /api/records/{table}/{id}
//! PUT    /api/records/{table}/{id}
//! DELETE /api/records/{table}/{id}
//! ```

mod actor;
mod health;
mod orders;
mod records;
mod search;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub use actor::{Actor, ACTOR_HEADER, DEFAULT_ACTOR};

use crate::context::AppContext;

pub type AppState = Arc<AppContext>;

/// Build the axum router (separated for testing).
pub fn router(context: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/search/{kind}", get(search::search))
        .route("/api/orders", post(orders::initiate))
        .route("/api/orders/{id}/close", post(orders::close))
        .route("/api/scans", post(orders::record_scan))
        .route("/api/export-scans", post(orders::record_export_scan))
        .route("/api/records/{table}", post(records::create))
        .route(
            "/api/records/{table}/{id}",
            get(records::get).put(records::update).delete(records::delete),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(context)
}
