//! The single-page form served at `/`.
//!
//! Choosing a scenario reloads the page with `?scenario=<name>` so the
//! inputs come back pre-filled; the predict button posts the form to
//! `/predict` and shows either the estimate or the error message.

use axum::{extract::Query, response::Html, routing::get, Router};
use serde::Deserialize;

use super::SharedState;
use crate::models::{Categorical, CategoricalGroup, RawInput};
use crate::scenarios::{resolve_defaults, scenario_by_name, scenario_names, MANUAL_INPUT};

// ---

pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(form))
}

#[derive(Debug, Deserialize)]
struct FormQuery {
    scenario: Option<String>,
}

async fn form(Query(query): Query<FormQuery>) -> Html<String> {
    // ---
    let preset = scenario_by_name(query.scenario.as_deref().unwrap_or(MANUAL_INPUT));
    Html(render_form(preset.name, &resolve_defaults(preset)))
}

const SCRIPT: &str = r#"
document.getElementById('scenario').addEventListener('change', (e) => {
  window.location.search = '?scenario=' + encodeURIComponent(e.target.value);
});
document.getElementById('predict').addEventListener('click', async () => {
  const body = { scenario: document.getElementById('scenario').value };
  document.querySelectorAll('[data-field]').forEach((el) => {
    if (el.tagName === 'SELECT') {
      body[el.name] = el.value;
    } else if (el.value.trim() !== '') {
      body[el.name] = Number(el.value);
    }
  });
  const out = document.getElementById('result');
  const resp = await fetch('/predict', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body),
  });
  const data = await resp.json().catch(() => ({ error: 'Prediction failed: ' + resp.statusText }));
  out.textContent = resp.ok ? data.display : data.error;
  out.className = resp.ok ? 'ok' : 'err';
});
"#;

fn number_input(html: &mut String, field: &str, label: &str, value: f64, bounds: Option<(u32, u32)>) {
    // ---
    let bounds = bounds
        .map(|(lo, hi)| format!(r#" min="{}" max="{}" step="1""#, lo, hi))
        .unwrap_or_else(|| r#" step="any""#.to_string());
    html.push_str(&format!(
        "<label>{label}<input type=\"number\" name=\"{field}\" data-field value=\"{value}\"{bounds}></label>\n"
    ));
}

fn select_input<T: Categorical>(html: &mut String, field: &str, selected: T) {
    // ---
    let group: CategoricalGroup = T::GROUP;
    html.push_str(&format!(
        "<label>{}<select name=\"{}\" data-field>\n",
        group.name(),
        field
    ));
    for &option in T::ALL {
        let attr = if option.label() == selected.label() { " selected" } else { "" };
        html.push_str(&format!("<option{attr}>{}</option>\n", option.label()));
    }
    html.push_str("</select></label>\n");
}

/// Render the full page with `raw` filled in and `scenario` selected.
pub(crate) fn render_form(scenario: &str, raw: &RawInput) -> String {
    // ---
    let mut html = String::from(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\">\
         <title>Bike Sharing Demand Predictor</title></head><body>\n\
         <h1>Bike Sharing Demand Predictor</h1>\n\
         <p>Predict the number of rented bikes based on weather and time conditions in Seoul.</p>\n",
    );

    html.push_str("<h3>Select a Benchmark Scenario (Optional)</h3>\n<select id=\"scenario\">\n");
    for name in scenario_names() {
        let attr = if name == scenario { " selected" } else { "" };
        html.push_str(&format!("<option{attr}>{name}</option>\n"));
    }
    html.push_str("</select>\n<h3>Input Features</h3>\n");

    number_input(&mut html, "hour", "Hour", f64::from(raw.hour), Some((0, 23)));
    number_input(&mut html, "temperature", "Temperature(°C)", raw.temperature, None);
    number_input(&mut html, "humidity", "Humidity(%)", raw.humidity, Some((0, 100)));
    number_input(&mut html, "wind_speed", "Wind speed (m/s)", raw.wind_speed, None);
    number_input(&mut html, "visibility", "Visibility (10m)", raw.visibility, None);
    number_input(&mut html, "dew_point", "Dew point temperature(°C)", raw.dew_point, None);
    number_input(&mut html, "solar_radiation", "Solar Radiation (MJ/m2)", raw.solar_radiation, None);
    number_input(&mut html, "rainfall", "Rainfall(mm)", raw.rainfall, None);
    number_input(&mut html, "snowfall", "Snowfall (cm)", raw.snowfall, None);
    select_input(&mut html, "functioning_day", raw.functioning_day);
    select_input(&mut html, "holiday", raw.holiday);
    select_input(&mut html, "season", raw.season);

    html.push_str("<button id=\"predict\">Predict Bike Demand</button>\n<p id=\"result\"></p>\n");
    html.push_str(&format!("<script>{SCRIPT}</script>\n</body></html>\n"));
    html
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::scenarios::PRESETS;

    #[test]
    fn test_manual_form_has_defaults() {
        // ---
        let html = render_form(MANUAL_INPUT, &RawInput::default());
        assert!(html.contains(r#"name="hour" data-field value="12" min="0" max="23""#));
        assert!(html.contains(r#"name="visibility" data-field value="1500""#));
        assert!(html.contains("<option selected>Manual Input</option>"));
        assert!(html.contains("<option selected>Spring</option>"));
        assert!(html.contains("<option selected>No Holiday</option>"));
    }

    #[test]
    fn test_scenario_form_is_prefilled() {
        // ---
        let preset = &PRESETS[1];
        let html = render_form(preset.name, &resolve_defaults(preset));
        assert!(html.contains("<option selected>Rainy Evening (Autumn Holiday)</option>"));
        assert!(html.contains(r#"name="rainfall" data-field value="2.5""#));
        assert!(html.contains("<option selected>Public Holiday</option>"));
        assert!(html.contains("<option selected>Autumn</option>"));
    }

    #[test]
    fn test_blank_number_fields_are_left_out_of_the_request() {
        // ---
        // An emptied input must fall back to the scenario default, not become 0.
        let html = render_form(MANUAL_INPUT, &RawInput::default());
        assert!(html.contains("el.value.trim() !== ''"));
        assert!(!html.contains("Number(el.value);\n  });"));
    }
}
