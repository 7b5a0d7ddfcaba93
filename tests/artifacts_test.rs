use std::path::PathBuf;

use anyhow::Result;

use bike_demand_predictor::predictor::{format_estimate, load_model};
use bike_demand_predictor::scenarios::{resolve_defaults, scenario_by_name};
use bike_demand_predictor::schema::load_schema;
use bike_demand_predictor::{align, Predictor};

fn artifact(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("artifacts").join(name)
}

#[test]
fn bundled_artifacts_load_and_predict() -> Result<()> {
    // ---
    let schema = load_schema(&artifact("feature_columns.json"))?;
    let model = load_model(&artifact("model.json"))?;

    assert_eq!(schema.len(), 18);
    assert!(schema.missing_indicators().is_empty());
    schema.check_indicators(true)?;
    assert_eq!(model.kind(), "forest");

    // Cold night: operating, below 5°C, late hour
    let raw = resolve_defaults(scenario_by_name("Cold Night (Winter No Holiday)"));
    let prediction = model.predict(&align(&raw, &schema))?;
    assert_eq!(prediction, 770.0);
    assert_eq!(format_estimate(prediction).1, "770");

    // Non-functioning day rents nothing
    let raw = resolve_defaults(scenario_by_name("Rainy Evening (Autumn Holiday)"));
    assert_eq!(model.predict(&align(&raw, &schema))?, 0.0);

    Ok(())
}
