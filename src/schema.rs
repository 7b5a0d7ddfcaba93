//! Feature schema management for `bike-demand-predictor`.
//!
//! The schema is the ordered column list the trained model expects. It is
//! loaded once on startup from `main.rs` and never changes afterwards.

use std::{collections::HashSet, fs, path::Path};

use anyhow::{anyhow, bail, Context, Result};

use crate::models::all_indicator_names;

// ---

/// Ordered, duplicate-free list of model input columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Build a schema, rejecting empty lists and repeated column names.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        // ---
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            bail!("feature schema must contain at least one column");
        }

        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.as_str()) {
                return Err(anyhow!("duplicate column '{}' in feature schema", col));
            }
        }

        Ok(FeatureSchema { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    /// Indicator columns the encoder can emit that this schema lacks.
    ///
    /// Any name listed here is silently dropped by the aligner, so the model
    /// never sees that label.
    pub fn missing_indicators(&self) -> Vec<String> {
        // ---
        all_indicator_names()
            .into_iter()
            .filter(|name| !self.contains(name))
            .collect()
    }

    /// Warn about missing indicator columns, or fail when `strict` is set.
    pub fn check_indicators(&self, strict: bool) -> Result<()> {
        // ---
        let missing = self.missing_indicators();
        if missing.is_empty() {
            tracing::debug!("All indicator columns present in feature schema");
            return Ok(());
        }

        for name in &missing {
            tracing::warn!("Feature schema has no column '{}'; that label will be ignored", name);
        }

        if strict {
            bail!(
                "feature schema is missing {} indicator column(s): {}",
                missing.len(),
                missing.join(", ")
            );
        }
        Ok(())
    }
}

/// Load the schema from a JSON array of column names.
pub fn load_schema(path: &Path) -> Result<FeatureSchema> {
    // ---
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read feature columns from '{}'", path.display()))?;
    let columns: Vec<String> = serde_json::from_str(&text)
        .with_context(|| format!("Feature columns in '{}' are not a JSON string array", path.display()))?;

    let schema = FeatureSchema::from_columns(columns)?;
    tracing::info!("Loaded feature schema with {} columns", schema.len());
    Ok(schema)
}
