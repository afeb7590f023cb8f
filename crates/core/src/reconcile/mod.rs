//! Reconciliation of header records against their detail tables

mod headers;
pub mod pipeline;

pub use pipeline::{Reconcilable, ReconciliationPipeline};
