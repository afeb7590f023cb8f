//! Record administration endpoints

use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ordertrack_domain::{Document, OrderTrackError, Table};

use super::orders::Created;
use super::{Actor, AppState};
use crate::error::ApiError;
use crate::utils::logging::log_operation;

fn parse_table(table: &str) -> Result<Table, ApiError> {
    table.parse().map_err(|msg: String| ApiError(OrderTrackError::NotFound(msg)))
}

pub(super) async fn create(
    State(context): State<AppState>,
    Actor(actor): Actor,
    Path(table): Path<String>,
    Json(document): Json<Document>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let table = parse_table(&table)?;
    let start = Instant::now();
    let result = context.records.create(&actor, table, document).await;
    log_operation("records::create", start.elapsed(), result.as_ref().err());

    Ok((StatusCode::CREATED, Json(Created { id: result? })))
}

pub(super) async fn get(
    State(context): State<AppState>,
    Path((table, id)): Path<(String, String)>,
) -> Result<Json<Document>, ApiError> {
    let table = parse_table(&table)?;
    Ok(Json(context.records.get(table, &id).await?))
}

pub(super) async fn update(
    State(context): State<AppState>,
    Actor(actor): Actor,
    Path((table, id)): Path<(String, String)>,
    Json(changes): Json<Document>,
) -> Result<StatusCode, ApiError> {
    let table = parse_table(&table)?;
    let start = Instant::now();
    let result = context.records.update(&actor, table, &id, changes).await;
    log_operation("records::update", start.elapsed(), result.as_ref().err());

    result?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn delete(
    State(context): State<AppState>,
    Actor(actor): Actor,
    Path((table, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let table = parse_table(&table)?;
    let start = Instant::now();
    let result = context.records.delete(&actor, table, &id).await;
    log_operation("records::delete", start.elapsed(), result.as_ref().err());

    result?;
    Ok(StatusCode::NO_CONTENT)
}
