//! HTTP boundary.
//!
//! # Endpoints
//!
//! - `POST /put-num` - body `{"num": <integer>}`; stores the number and responds
//!   with every stored number in ascending order as a JSON array
//! - `GET /healthz` - liveness probe
//!
//! Every request runs inside a `request` span carrying a request id, taken from
//! the `x-request-id` header or generated, and echoed back on the response.
//! A panicking handler yields a 500 instead of a dropped connection.

mod error;

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::application::NumberOrdering;
use crate::domain::Number;

pub use error::ApiError;

/// Header carrying the request id in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request body for `POST /put-num`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutNumRequest {
    pub num: Number,
}

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    ordering: Arc<dyn NumberOrdering>,
    request_timeout: Duration,
}

impl AppState {
    pub fn new(ordering: Arc<dyn NumberOrdering>, request_timeout: Duration) -> Self {
        Self {
            ordering,
            request_timeout,
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/put-num", post(put_num))
        .route("/healthz", get(liveness))
        .layer(middleware::from_fn(track_request))
        .with_state(state)
}

async fn track_request(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    let outcome = AssertUnwindSafe(next.run(request))
        .catch_unwind()
        .instrument(span.clone())
        .await;
    let mut response = match outcome {
        Ok(response) => response,
        Err(_) => span.in_scope(|| ApiError::Panicked.into_response()),
    };

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Serve `app` on `listener` until `cancel` fires, then drain in-flight requests.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    cancel: CancellationToken,
) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn put_num(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<Number>>, ApiError> {
    let request: PutNumRequest = serde_json::from_slice(&body).map_err(ApiError::InvalidBody)?;

    let exchange = async {
        state.ordering.accept(request.num).await?;
        state.ordering.list_sorted().await
    };

    let numbers = tokio::time::timeout(state.request_timeout, exchange)
        .await
        .map_err(|_| ApiError::TimedOut(state.request_timeout))??;

    Ok(Json(numbers))
}

async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
