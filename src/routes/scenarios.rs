use axum::{extract::Path, routing::get, Json, Router};

use super::SharedState;
use crate::models::RawInput;
use crate::scenarios::{resolve_defaults, scenario_by_name, scenario_names};

// ---

pub fn router() -> Router<SharedState> {
    // ---
    Router::new()
        .route("/scenarios", get(list_scenarios))
        .route("/scenarios/{name}", get(scenario_defaults))
}

/// Handle `GET /scenarios`: selector options, manual entry first.
async fn list_scenarios() -> Json<Vec<&'static str>> {
    Json(scenario_names())
}

/// Handle `GET /scenarios/{name}`: the form values the preset fills in.
async fn scenario_defaults(Path(name): Path<String>) -> Json<RawInput> {
    // ---
    tracing::debug!("GET /scenarios/{}", name);
    Json(resolve_defaults(scenario_by_name(&name)))
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::{FunctioningDay, Season};

    #[test]
    fn test_list_scenarios() {
        // ---
        let Json(names) = tokio_test::block_on(list_scenarios());
        assert_eq!(names.first(), Some(&"Manual Input"));
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_scenario_defaults() {
        // ---
        let Json(raw) = tokio_test::block_on(scenario_defaults(Path(
            "Sunny Morning (Spring Workday)".to_string(),
        )));
        assert_eq!(raw.hour, 9);
        assert_eq!(raw.visibility, 2000.0);
        assert_eq!(raw.season, Season::Spring);
        assert_eq!(raw.functioning_day, FunctioningDay::Yes);
    }
}
