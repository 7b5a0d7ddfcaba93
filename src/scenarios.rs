//! Benchmark scenario presets used to pre-fill the form.

use crate::models::{Categorical, FunctioningDay, Holiday, RawInput, Season};

// ---

/// Selector entry that applies no preset.
pub const MANUAL_INPUT: &str = "Manual Input";

/// A named, sparse set of form defaults.
///
/// Keys are canonical scalar column names or one-hot names such as
/// `Season_Winter`. Entries are scanned in declaration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioPreset {
    pub name: &'static str,
    pub values: &'static [(&'static str, f64)],
}

impl ScenarioPreset {
    pub const MANUAL: ScenarioPreset = ScenarioPreset {
        name: MANUAL_INPUT,
        values: &[],
    };

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.iter().find(|(k, _)| *k == key).map(|&(_, v)| v)
    }
}

pub static PRESETS: [ScenarioPreset; 3] = [
    ScenarioPreset {
        name: "Sunny Morning (Spring Workday)",
        values: &[
            ("Hour", 9.0),
            ("Temperature(°C)", 18.0),
            ("Humidity(%)", 55.0),
            ("Wind speed (m/s)", 2.5),
            ("Visibility (10m)", 2000.0),
            ("Dew point temperature(°C)", 8.0),
            ("Solar Radiation (MJ/m2)", 0.6),
            ("Rainfall(mm)", 0.0),
            ("Snowfall (cm)", 0.0),
            ("Functioning Day_Yes", 1.0),
            ("Holiday_No Holiday", 1.0),
            ("Season_Spring", 1.0),
        ],
    },
    ScenarioPreset {
        name: "Rainy Evening (Autumn Holiday)",
        values: &[
            ("Hour", 18.0),
            ("Temperature(°C)", 14.0),
            ("Humidity(%)", 90.0),
            ("Wind speed (m/s)", 3.0),
            ("Visibility (10m)", 700.0),
            ("Dew point temperature(°C)", 12.0),
            ("Solar Radiation (MJ/m2)", 0.1),
            ("Rainfall(mm)", 2.5),
            ("Snowfall (cm)", 0.0),
            ("Functioning Day_No", 1.0),
            ("Holiday_Public Holiday", 1.0),
            ("Season_Autumn", 1.0),
        ],
    },
    ScenarioPreset {
        name: "Cold Night (Winter No Holiday)",
        values: &[
            ("Hour", 22.0),
            ("Temperature(°C)", -2.0),
            ("Humidity(%)", 40.0),
            ("Wind speed (m/s)", 1.0),
            ("Visibility (10m)", 500.0),
            ("Dew point temperature(°C)", -5.0),
            ("Solar Radiation (MJ/m2)", 0.0),
            ("Rainfall(mm)", 0.0),
            ("Snowfall (cm)", 3.0),
            ("Functioning Day_Yes", 1.0),
            ("Holiday_No Holiday", 1.0),
            ("Season_Winter", 1.0),
        ],
    },
];

/// Selector options: manual entry first, then every preset.
pub fn scenario_names() -> Vec<&'static str> {
    std::iter::once(MANUAL_INPUT)
        .chain(PRESETS.iter().map(|p| p.name))
        .collect()
}

/// Look up a preset by name. Unknown names behave like manual input.
pub fn scenario_by_name(name: &str) -> &'static ScenarioPreset {
    // ---
    match PRESETS.iter().find(|p| p.name == name) {
        Some(preset) => preset,
        None => {
            if name != MANUAL_INPUT {
                tracing::debug!("Unknown scenario '{}', falling back to manual input", name);
            }
            &ScenarioPreset::MANUAL
        }
    }
}

/// First label of `T` whose indicator key is set to 1 in the preset.
fn active_label<T: Categorical>(preset: &ScenarioPreset) -> Option<T> {
    // ---
    let prefix = format!("{}_", T::GROUP.name());
    preset
        .values
        .iter()
        .filter(|&&(_, v)| v == 1.0)
        .find_map(|(key, _)| key.strip_prefix(prefix.as_str()).and_then(T::from_label))
}

/// Expand a preset into a full form input, filling gaps with form defaults.
pub fn resolve_defaults(preset: &ScenarioPreset) -> RawInput {
    // ---
    let defaults = RawInput::default();
    let scalar = |key: &str, fallback: f64| preset.get(key).unwrap_or(fallback);

    RawInput {
        hour: preset.get("Hour").map_or(defaults.hour, |h| h as u8),
        temperature: scalar("Temperature(°C)", defaults.temperature),
        humidity: scalar("Humidity(%)", defaults.humidity),
        wind_speed: scalar("Wind speed (m/s)", defaults.wind_speed),
        visibility: scalar("Visibility (10m)", defaults.visibility),
        dew_point: scalar("Dew point temperature(°C)", defaults.dew_point),
        solar_radiation: scalar("Solar Radiation (MJ/m2)", defaults.solar_radiation),
        rainfall: scalar("Rainfall(mm)", defaults.rainfall),
        snowfall: scalar("Snowfall (cm)", defaults.snowfall),
        functioning_day: active_label::<FunctioningDay>(preset).unwrap_or(defaults.functioning_day),
        holiday: active_label::<Holiday>(preset).unwrap_or(defaults.holiday),
        season: active_label::<Season>(preset).unwrap_or(defaults.season),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::features::align;
    use crate::models::{all_indicator_names, SCALAR_COLUMNS};
    use crate::schema::FeatureSchema;

    #[test]
    fn test_manual_input_uses_form_defaults() {
        // ---
        let raw = resolve_defaults(scenario_by_name(MANUAL_INPUT));
        assert_eq!(raw, RawInput::default());
    }

    #[test]
    fn test_unknown_scenario_is_manual() {
        // ---
        assert_eq!(scenario_by_name("Heatwave"), &ScenarioPreset::MANUAL);
    }

    #[test]
    fn test_scenario_names_order() {
        // ---
        let names = scenario_names();
        assert_eq!(names.len(), 4);
        assert_eq!(names[0], "Manual Input");
        assert_eq!(names[3], "Cold Night (Winter No Holiday)");
    }

    #[test]
    fn test_cold_night_vector() {
        // ---
        let mut cols: Vec<String> = SCALAR_COLUMNS.iter().map(|s| s.to_string()).collect();
        cols.extend(all_indicator_names());
        let schema = FeatureSchema::from_columns(cols).unwrap();

        let raw = resolve_defaults(scenario_by_name("Cold Night (Winter No Holiday)"));
        assert_eq!(raw.hour, 22);
        assert_eq!(raw.temperature, -2.0);
        assert_eq!(raw.snowfall, 3.0);

        let vector = align(&raw, &schema);
        let at = |c: &str| vector.get(schema.position(c).unwrap()).unwrap();
        assert_eq!(at("Hour"), 22.0);
        assert_eq!(at("Temperature(°C)"), -2.0);
        assert_eq!(at("Season_Winter"), 1.0);
        assert_eq!(at("Holiday_No Holiday"), 1.0);
        assert_eq!(at("Functioning Day_Yes"), 1.0);

        let hot = ["Season_Winter", "Holiday_No Holiday", "Functioning Day_Yes"];
        for name in all_indicator_names() {
            if !hot.contains(&name.as_str()) {
                assert_eq!(at(&name), 0.0, "indicator {} should be 0", name);
            }
        }
    }

    #[test]
    fn test_rainy_evening_labels() {
        // ---
        let raw = resolve_defaults(scenario_by_name("Rainy Evening (Autumn Holiday)"));
        assert_eq!(raw.functioning_day, FunctioningDay::No);
        assert_eq!(raw.holiday, Holiday::PublicHoliday);
        assert_eq!(raw.season, Season::Autumn);
        assert_eq!(raw.rainfall, 2.5);
    }

    #[test]
    fn test_partial_preset_falls_back() {
        // ---
        let preset = ScenarioPreset {
            name: "partial",
            values: &[("Hour", 6.0), ("Season_Summer", 1.0), ("Holiday_Working Day", 0.0)],
        };
        let raw = resolve_defaults(&preset);
        assert_eq!(raw.hour, 6);
        assert_eq!(raw.season, Season::Summer);
        assert_eq!(raw.holiday, Holiday::NoHoliday);
        assert_eq!(raw.temperature, 20.0);
    }

    #[test]
    fn test_first_matching_indicator_wins() {
        // ---
        let preset = ScenarioPreset {
            name: "malformed",
            values: &[("Season_Winter", 1.0), ("Season_Summer", 1.0)],
        };
        assert_eq!(resolve_defaults(&preset).season, Season::Winter);
    }
}
