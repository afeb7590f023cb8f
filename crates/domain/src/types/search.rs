//! Search requests and outcomes handed between the API layer and the core

use serde::Serialize;

use super::criteria::{EntityKind, SearchCriteria};
use super::query::Document;
use super::records::{AugmentedExportHeader, AugmentedOrderHeader};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub criteria: SearchCriteria,
    pub closed_only: bool,
}

impl SearchRequest {
    pub fn new(criteria: SearchCriteria) -> Self {
        Self { criteria, closed_only: false }
    }

    pub fn closed_only(mut self, closed_only: bool) -> Self {
        self.closed_only = closed_only;
        self
    }
}

/// User-visible status of a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchStatus {
    Ok,
    /// A required criteria field was missing; the store was not queried.
    ValidationFailure { message: String },
    /// The header-level scan failed; results are empty.
    QueryFailure { message: String },
}

impl SearchStatus {
    /// Failure label and message, or `None` for `Ok`.
    pub fn failure(&self) -> Option<(&'static str, &str)> {
        match self {
            Self::Ok => None,
            Self::ValidationFailure { message } => Some(("validation_failure", message)),
            Self::QueryFailure { message } => Some(("query_failure", message)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResults {
    Orders(Vec<AugmentedOrderHeader>),
    ExtractedOrders(Vec<AugmentedExportHeader>),
    Records(Vec<Document>),
}

impl SearchResults {
    pub fn len(&self) -> usize {
        match self {
            Self::Orders(rows) => rows.len(),
            Self::ExtractedOrders(rows) => rows.len(),
            Self::Records(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub kind: EntityKind,
    pub status: SearchStatus,
    pub count: usize,
    pub results: SearchResults,
}

impl SearchOutcome {
    pub fn ok(kind: EntityKind, results: SearchResults) -> Self {
        Self { kind, status: SearchStatus::Ok, count: results.len(), results }
    }

    pub fn validation_failure(kind: EntityKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: SearchStatus::ValidationFailure { message: message.into() },
            count: 0,
            results: SearchResults::Records(Vec::new()),
        }
    }

    pub fn query_failure(kind: EntityKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: SearchStatus::QueryFailure { message: message.into() },
            count: 0,
            results: SearchResults::Records(Vec::new()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == SearchStatus::Ok
    }
}
