//! Search endpoint
//!
//! The query string carries the criteria fields by their camelCase names plus
//! an optional `closedOnly` flag. The response body is always the full search
//! outcome; the status code reflects its state.

use std::collections::HashMap;
use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ordertrack_domain::{
    EntityKind, OrderTrackError, SearchCriteria, SearchOutcome, SearchRequest, SearchStatus,
};

use super::AppState;
use crate::error::ApiError;
use crate::utils::logging::log_outcome;

const CLOSED_ONLY_PARAM: &str = "closedOnly";

pub(super) async fn search(
    State(context): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<(StatusCode, Json<SearchOutcome>), ApiError> {
    let start = Instant::now();

    let kind: EntityKind =
        kind.parse().map_err(|msg: String| OrderTrackError::NotFound(msg))?;
    let closed_only = params
        .get(CLOSED_ONLY_PARAM)
        .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));
    let criteria = SearchCriteria::from_params(kind, &params)?;

    let outcome = context.search.search(SearchRequest::new(criteria).closed_only(closed_only)).await;

    let code = match outcome.status {
        SearchStatus::Ok => StatusCode::OK,
        SearchStatus::ValidationFailure { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SearchStatus::QueryFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    log_outcome("search::search", start.elapsed(), outcome.status.failure());

    Ok((code, Json(outcome)))
}
