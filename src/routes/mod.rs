use std::sync::Arc;

use axum::Router;

use crate::predictor::Predictor;
use crate::schema::FeatureSchema;

mod form;
mod health;
mod predict;
mod scenarios;

pub use predict::{PredictRequest, PredictResponse};

// ---

/// Model and schema, loaded once at startup and shared read-only by every
/// request handler.
pub struct AppState {
    pub schema: FeatureSchema,
    pub model: Box<dyn Predictor>,
}

pub type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    // ---
    Router::new()
        .merge(form::router())
        .merge(scenarios::router())
        .merge(predict::router())
        .merge(health::router())
        .with_state(state)
}
