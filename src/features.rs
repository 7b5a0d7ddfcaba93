//! Feature alignment: turns form values into the model's input row.

use std::collections::HashMap;

use crate::models::{FeatureVector, RawInput};
use crate::schema::FeatureSchema;

// ---

/// Build the feature row for `raw`, ordered by `schema`.
///
/// Scalars are placed under their canonical column names, each selected
/// label sets its `Group_Label` indicator to 1, and every other schema
/// column is 0. Indicators the schema does not name are dropped.
pub fn align(raw: &RawInput, schema: &FeatureSchema) -> FeatureVector {
    // ---
    let mut named: HashMap<String, f64> = raw
        .scalar_columns()
        .iter()
        .map(|&(name, value)| (name.to_string(), value))
        .collect();

    for indicator in raw.indicator_columns() {
        named.insert(indicator, 1.0);
    }

    let values = schema
        .iter()
        .map(|col| named.get(col).copied().unwrap_or(0.0))
        .collect();

    FeatureVector::new(values)
}
