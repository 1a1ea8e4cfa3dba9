//! REST API route handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::Instrument;
use uuid::Uuid;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /route
// ---------------------------------------------------------------------------

/// Request body for the route endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct RouteBody {
    /// The user's prompt.  Missing or `null` is treated like empty.
    #[serde(default)]
    pub prompt: Option<String>,
    /// Optional explicit provider identifier.
    #[serde(default)]
    pub model: Option<String>,
}

/// Successful route response.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// The normalized answer text.
    pub response: String,
    /// Label of the provider that produced it.
    pub model: String,
}

/// Route one prompt through the pipeline.
///
/// Provider failures still answer `200`; the failure is described in the
/// `response` text.  Only input problems produce `400`.
pub async fn route(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RouteBody>, JsonRejection>,
) -> Response {
    let request_id = Uuid::now_v7();
    let span = tracing::info_span!("route", %request_id);

    async move {
        let body = match body {
            Ok(Json(body)) => body,
            Err(rejection) => {
                tracing::warn!(error = %rejection, "rejected request body");
                return error_response(format!("invalid request body: {}", rejection.body_text()));
            }
        };

        let prompt = body.prompt.unwrap_or_default();
        tracing::info!(
            prompt_chars = prompt.chars().count(),
            model = body.model.as_deref().unwrap_or(""),
            "received request"
        );

        match state.router.route_input(&prompt, body.model).await {
            Ok(result) => Json(RouteResponse {
                response: result.text,
                model: result.model_label,
            })
            .into_response(),
            Err(e) => {
                tracing::warn!(error = %e, "request refused");
                error_response(e.to_string())
            }
        }
    }
    .instrument(span)
    .await
}

fn error_response(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.  Performs no dependency checks.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}
