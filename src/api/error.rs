use std::time::Duration;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::application::OperationError;

/// Failure of a single HTTP exchange.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error("request timed out after {0:?}")]
    TimedOut(Duration),

    #[error("internal server error")]
    Panicked,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) | ApiError::Operation(_) => StatusCode::BAD_REQUEST,
            ApiError::TimedOut(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Panicked => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::InvalidBody(e) => tracing::warn!(error = %e, "can't parse body"),
            // The service's observer already reported the store failure.
            ApiError::Operation(e) => tracing::debug!(op = %e.op, "request failed"),
            ApiError::TimedOut(limit) => tracing::warn!(?limit, "request timed out"),
            ApiError::Panicked => tracing::error!("handler panicked"),
        }

        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
