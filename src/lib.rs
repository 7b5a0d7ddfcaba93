//! Seoul bike rental demand predictor.
//!
//! Collects weather and calendar inputs, optionally pre-filled from a
//! benchmark scenario, aligns them to the column schema of a model trained
//! elsewhere, and returns the model's estimate of rented bikes.

pub mod config;
pub mod features;
pub mod models;
pub mod predictor;
pub mod routes;
pub mod scenarios;
pub mod schema;

pub use config::Config;
pub use features::align;
pub use models::{FeatureVector, RawInput};
pub use predictor::{ModelArtifact, PredictError, Predictor};
pub use routes::{AppState, SharedState};
pub use schema::FeatureSchema;
