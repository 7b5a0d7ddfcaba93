// src/routes/health.rs
//! Health check endpoint for the bike demand predictor.
//!
//! `/health` answers as soon as the model and schema are loaded, which is
//! before the listener is bound, so a reachable service always reports the
//! artifacts it is serving with.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::SharedState;

/// JSON response body for the `/health` endpoint.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    model: &'static str,
    feature_columns: usize,
}

/// Handle `GET /health`.
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.model.kind(),
        feature_columns: state.schema.len(),
    })
}

/// Create a subrouter containing the `/health` route.
pub fn router() -> Router<SharedState> {
    Router::new().route("/health", get(health))
}
