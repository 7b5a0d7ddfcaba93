use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::SharedState;
use crate::features::align;
use crate::models::{InputError, InputOverrides, RawInput};
use crate::predictor::{format_estimate, PredictError};
use crate::scenarios::{resolve_defaults, scenario_by_name, MANUAL_INPUT};

// ---

pub fn router() -> Router<SharedState> {
    // ---
    Router::new().route("/predict", post(handler))
}

/// Body of `POST /predict`: an optional scenario plus any edited fields.
#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    pub scenario: Option<String>,
    #[serde(flatten)]
    pub overrides: InputOverrides,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub request_id: Uuid,
    pub scenario: String,
    pub input: RawInput,
    pub prediction: f64,
    pub rented_bikes: i64,
    pub display: String,
    pub predicted_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
enum PredictFailure {
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("Invalid input: {0}")]
    Body(String),

    #[error("Prediction failed: {0}")]
    Model(#[from] PredictError),
}

impl IntoResponse for PredictFailure {
    fn into_response(self) -> Response {
        // ---
        let status = match self {
            PredictFailure::Input(_) | PredictFailure::Body(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PredictFailure::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for PredictFailure {
    fn from(rejection: JsonRejection) -> Self {
        PredictFailure::Body(rejection.body_text())
    }
}

async fn handler(
    State(state): State<SharedState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    // ---
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            return PredictFailure::from(rejection).into_response();
        }
    };
    let request_id = Uuid::new_v4();
    match run_prediction(&state, &req, request_id) {
        Ok(resp) => (StatusCode::OK, Json(resp)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(name = "predict", skip(state, req), fields(scenario = tracing::field::Empty))]
fn run_prediction(
    state: &SharedState,
    req: &PredictRequest,
    request_id: Uuid,
) -> Result<PredictResponse, PredictFailure> {
    // ---
    let scenario = req.scenario.as_deref().unwrap_or(MANUAL_INPUT);
    tracing::Span::current().record("scenario", scenario);
    info!("POST /predict - Starting prediction");

    // Step 1: Scenario defaults, then the caller's edits
    let preset = scenario_by_name(scenario);
    let raw = req.overrides.apply(resolve_defaults(preset));
    if let Err(e) = raw.validate() {
        warn!("Rejected input: {}", e);
        return Err(e.into());
    }
    debug!("POST /predict - Step 1: {:?}", raw);

    // Step 2: Align to the model's column order
    let vector = align(&raw, &state.schema);
    debug!("POST /predict - Step 2: {} features", vector.len());

    // Step 3: Score; a model failure goes back to the caller, not the log
    let prediction = state.model.predict(&vector).map_err(|e| {
        debug!("Model failed: {}", e);
        PredictFailure::from(e)
    })?;
    let (rented_bikes, grouped) = format_estimate(prediction);
    info!("Prediction complete: {} bikes", grouped);

    Ok(PredictResponse {
        request_id,
        scenario: preset.name.to_string(),
        input: raw,
        prediction,
        rented_bikes,
        display: format!("Estimated Rented Bikes: {}", grouped),
        predicted_at: Utc::now(),
    })
}
