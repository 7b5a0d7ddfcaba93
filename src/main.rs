//! Application entry point for the `bike-demand-predictor` service.
//!
//! This binary orchestrates the full startup sequence:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Loading the feature schema and model bundle once
//! - Checking the schema for indicator columns the form can produce
//! - Mounting all routes via the `routes` gateway
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `MODEL_PATH` (**required**) – model bundle (JSON)
//! - `FEATURE_COLUMNS_PATH` (**required**) – feature column list (JSON array)
//! - `BIND_ADDR`, `PORT` (optional) – listen address (default: 0.0.0.0:8080)
//! - `STRICT_SCHEMA` (optional) – abort when indicator columns are missing
//! - `BIKE_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `BIKE_SPAN_EVENTS` (optional) – span event mode for tracing
use std::{env, io::IsTerminal, net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use bike_demand_predictor::{config, predictor, routes, schema, AppState, Predictor};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let feature_schema = schema::load_schema(&cfg.feature_columns_path)?;
    feature_schema.check_indicators(cfg.strict_schema)?;

    let model = predictor::load_model(&cfg.model_path)?;
    if let Some(width) = model.expected_width() {
        if width != feature_schema.len() {
            tracing::warn!(
                "Model expects {} features but schema lists {}; predictions will fail",
                width,
                feature_schema.len()
            );
        }
    }

    let state = Arc::new(AppState {
        schema: feature_schema,
        model: Box::new(model),
    });
    let app: Router = routes::router(state);

    let addr = SocketAddr::new(cfg.bind_addr, cfg.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ---

/// Initialize the global tracing subscriber for structured logging.
///
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var
/// - Span event emission mode controlled by `BIKE_SPAN_EVENTS`:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - unset or other values: emit CLOSE events only (default)
/// - Log level from `RUST_LOG`, else `BIKE_LOG_LEVEL`
///
/// Called once at startup before any logging macros are invoked.
fn init_tracing() {
    // ---
    let span_events = match env::var("BIKE_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("BIKE_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "debug",
        };
        EnvFilter::new(format!("{level},hyper=warn"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
