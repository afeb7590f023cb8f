//! Order workflow endpoints

use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ordertrack_domain::{NewExportScan, NewOrder, NewScan, OrderHeader};
use serde::Serialize;

use super::{Actor, AppState};
use crate::error::ApiError;
use crate::utils::logging::log_operation;

#[derive(Debug, Serialize)]
pub(super) struct Created {
    pub id: String,
}

pub(super) async fn initiate(
    State(context): State<AppState>,
    Actor(actor): Actor,
    Json(order): Json<NewOrder>,
) -> Result<(StatusCode, Json<OrderHeader>), ApiError> {
    let start = Instant::now();
    let result = context.orders.initiate_order(&actor, order).await;
    log_operation("orders::initiate", start.elapsed(), result.as_ref().err());

    Ok((StatusCode::CREATED, Json(result?)))
}

pub(super) async fn close(
    State(context): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let start = Instant::now();
    let result = context.orders.close_order(&actor, &id).await;
    log_operation("orders::close", start.elapsed(), result.as_ref().err());

    result?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn record_scan(
    State(context): State<AppState>,
    Actor(actor): Actor,
    Json(scan): Json<NewScan>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let start = Instant::now();
    let result = context.orders.record_scan(&actor, scan).await;
    log_operation("orders::record_scan", start.elapsed(), result.as_ref().err());

    Ok((StatusCode::CREATED, Json(Created { id: result? })))
}

pub(super) async fn record_export_scan(
    State(context): State<AppState>,
    Actor(actor): Actor,
    Json(scan): Json<NewExportScan>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let start = Instant::now();
    let result = context.orders.record_export_scan(&actor, scan).await;
    log_operation("orders::record_export_scan", start.elapsed(), result.as_ref().err());

    Ok((StatusCode::CREATED, Json(Created { id: result? })))
}
