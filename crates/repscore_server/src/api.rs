//! HTTP surface for session evaluation.

use crate::{Evaluation, RepscoreConfig, evaluate_session};
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use repscore_error::{RepscoreError, RepscoreResult, ValidationError};
use repscore_models::ResponsesDriver;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{error, instrument, warn};

/// Route the evaluation endpoint is published under.
pub const EVALUATE_PATH: &str = "/api/elevenlabs";

/// Shared, read-only state for every request.
#[derive(Clone)]
pub struct ApiState {
    driver: Arc<dyn ResponsesDriver>,
    config: Arc<RepscoreConfig>,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(driver: Arc<dyn ResponsesDriver>, config: Arc<RepscoreConfig>) -> Self {
        Self { driver, config }
    }
}

/// Creates the API router.
///
/// The evaluation endpoint answers GET with a usage hint, POST with an
/// evaluation, and anything else with 405. HEAD is routed explicitly since
/// `get` would otherwise answer it.
pub fn create_router(state: ApiState) -> Router {
    let evaluate = get(describe)
        .head(method_not_allowed)
        .post(evaluate)
        .fallback(method_not_allowed);

    Router::new()
        .route("/health", get(health_check))
        .route("/", evaluate.clone())
        .route(EVALUATE_PATH, evaluate)
        .with_state(state)
}

#[derive(Serialize)]
struct Success {
    ok: bool,
    #[serde(flatten)]
    evaluation: Evaluation,
}

/// Error body returned for every failure.
struct ApiError(RepscoreError);

impl From<RepscoreError> for ApiError {
    fn from(err: RepscoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Evaluation failed");
        } else {
            warn!(error = %self.0, "Rejected request");
        }
        failure(status, self.0.message())
    }
}

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({"ok": false, "error": message.into()}))).into_response()
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Usage hint for anyone opening the endpoint in a browser.
async fn describe() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "ok": true,
            "message": "POST JSON to this endpoint: { transcript, timing, metrics, scenario }",
        })),
    )
}

async fn method_not_allowed() -> Response {
    failure(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed. Use POST.")
}

/// Score a session and prepare narrator fields.
#[instrument(skip_all, fields(body_len = body.len()))]
async fn evaluate(State(state): State<ApiState>, body: Bytes) -> Result<Json<Success>, ApiError> {
    let body = parse_body(&body)?;
    let evaluation = evaluate_session(state.driver.as_ref(), &state.config, &body).await?;
    Ok(Json(Success {
        ok: true,
        evaluation,
    }))
}

/// An empty body reads as `{}`; anything else must be JSON.
fn parse_body(body: &[u8]) -> RepscoreResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| {
        ValidationError::new(format!("Request body must be valid JSON: {}", e)).into()
    })
}
