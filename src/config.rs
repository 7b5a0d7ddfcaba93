//! Configuration loader for the `bike-demand-predictor` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Artifact locations, the listen address, and the
//! schema strictness switch are all read here and nowhere else.
//!
use std::{env, net::IpAddr, path::PathBuf};

use anyhow::{anyhow, Result};

/// Parse an optional port environment variable with a default value.
macro_rules! parse_env_u16 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u16>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// JSON model bundle produced by the training pipeline.
    pub model_path: PathBuf,

    /// JSON array of the model's input column names, in order.
    pub feature_columns_path: PathBuf,

    /// Address the HTTP server binds to.
    pub bind_addr: IpAddr,

    /// Port the HTTP server listens on.
    pub port: u16,

    /// Refuse to start when the schema lacks an indicator column.
    pub strict_schema: bool,
}

/// Interpret common spellings of a boolean flag.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `MODEL_PATH` – model bundle (JSON)
/// - `FEATURE_COLUMNS_PATH` – feature column list (JSON array)
///
/// Optional:
/// - `BIND_ADDR` – listen address (default: 0.0.0.0)
/// - `PORT` – listen port (default: 8080)
/// - `STRICT_SCHEMA` – fail on missing indicator columns (default: false)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let model_path = PathBuf::from(require_env!("MODEL_PATH"));
    let feature_columns_path = PathBuf::from(require_env!("FEATURE_COLUMNS_PATH"));
    let port = parse_env_u16!("PORT", 8080);

    let bind_addr = match env::var("BIND_ADDR") {
        Ok(v) => v
            .parse::<IpAddr>()
            .map_err(|e| anyhow!("Invalid BIND_ADDR: {}", e))?,
        Err(_) => IpAddr::from([0, 0, 0, 0]),
    };

    let strict_schema = match env::var("STRICT_SCHEMA") {
        Ok(v) => parse_flag(&v).ok_or_else(|| anyhow!("Invalid STRICT_SCHEMA: {}", v))?,
        Err(_) => false,
    };

    Ok(Config {
        model_path,
        feature_columns_path,
        bind_addr,
        port,
        strict_schema,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  MODEL_PATH           : {}", self.model_path.display());
        tracing::info!("  FEATURE_COLUMNS_PATH : {}", self.feature_columns_path.display());
        tracing::info!("  BIND_ADDR            : {}", self.bind_addr);
        tracing::info!("  PORT                 : {}", self.port);
        tracing::info!("  STRICT_SCHEMA        : {}", self.strict_schema);
    }
}
