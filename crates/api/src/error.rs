//! Mapping domain errors onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ordertrack_domain::OrderTrackError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Error returned by every handler
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub OrderTrackError);

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'static str,
    message: &'a str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            OrderTrackError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            OrderTrackError::NotFound(_) => StatusCode::NOT_FOUND,
            OrderTrackError::Network(_) => StatusCode::BAD_GATEWAY,
            OrderTrackError::Database(_)
            | OrderTrackError::Config(_)
            | OrderTrackError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error_type = self.0.label(), error = %self.0, "request failed");
        }

        let message = match &self.0 {
            OrderTrackError::Database(m)
            | OrderTrackError::Config(m)
            | OrderTrackError::Network(m)
            | OrderTrackError::NotFound(m)
            | OrderTrackError::InvalidInput(m)
            | OrderTrackError::Internal(m) => m.as_str(),
        };
        let body = ErrorBody { error: self.0.label(), message };

        (status, Json(body)).into_response()
    }
}
