use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use historian_core::{HistorianError, RequestContext};
use historian_protocol::alertstate::{AlertStateQueryRequest, QueryResponse};
use serde::Serialize;
use tracing::instrument;

use crate::engine::Historian;
use crate::handlers::AlertStateHandlers;

pub const ALERT_STATE_QUERY_PATH: &str =
    "/apis/alerting.historian/v0alpha1/namespaces/:namespace/alertstate/query";
pub const ALERT_STATE_QUERY_ALIAS: &str = "/v1/alertstate/query";

#[derive(Clone)]
pub struct AppState {
    handlers: AlertStateHandlers<dyn Historian>,
    query_timeout: Duration,
}

impl AppState {
    pub fn new(historian: Arc<dyn Historian>, query_timeout: Duration) -> Self {
        Self {
            handlers: AlertStateHandlers::new(historian),
            query_timeout,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(ALERT_STATE_QUERY_PATH, post(alert_state_query))
        .route(ALERT_STATE_QUERY_ALIAS, post(alert_state_query))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "ok"
}

#[instrument(skip_all)]
async fn alert_state_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<QueryResponse>, ApiError> {
    let request: AlertStateQueryRequest = serde_json::from_slice(&body)?;
    let ctx = RequestContext::from_headers(&headers).with_timeout(state.query_timeout);

    let response = state.handlers.alert_state_query(&ctx, request).await?;
    Ok(Json(response))
}

/// Failure body mirroring a status object: `{kind, status, code, message}`.
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub kind: &'static str,
    pub status: &'static str,
    pub code: u16,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError(HistorianError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<HistorianError> for ApiError {
    fn from(err: HistorianError) -> Self {
        ApiError(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError(HistorianError::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = StatusBody {
            kind: "Status",
            status: "Failure",
            code: status.as_u16(),
            message: self.0.message(),
        };
        (status, Json(body)).into_response()
    }
}
