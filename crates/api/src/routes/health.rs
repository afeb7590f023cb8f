use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::AppState;
use crate::utils::health::HealthStatus;

pub(super) async fn health(State(context): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let status = context.health_check().await;
    let code = if status.is_healthy { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (code, Json(status))
}
