//! Data models for the bike demand predictor.
//!
//! `RawInput` is what the form collects, the categorical label enums name
//! the one-hot groups the model was trained with, and `FeatureVector` is the
//! ordered row handed to the predictor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---

/// Canonical column names for the nine scalar inputs, in form order.
pub const SCALAR_COLUMNS: [&str; 9] = [
    "Hour",
    "Temperature(°C)",
    "Humidity(%)",
    "Wind speed (m/s)",
    "Visibility (10m)",
    "Dew point temperature(°C)",
    "Solar Radiation (MJ/m2)",
    "Rainfall(mm)",
    "Snowfall (cm)",
];

/// The three one-hot encoded groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalGroup {
    FunctioningDay,
    Holiday,
    Season,
}

impl CategoricalGroup {
    pub const ALL: [CategoricalGroup; 3] = [
        CategoricalGroup::FunctioningDay,
        CategoricalGroup::Holiday,
        CategoricalGroup::Season,
    ];

    /// Column prefix used by the trained model.
    pub fn name(self) -> &'static str {
        match self {
            CategoricalGroup::FunctioningDay => "Functioning Day",
            CategoricalGroup::Holiday => "Holiday",
            CategoricalGroup::Season => "Season",
        }
    }

    /// Every label the group can take, in selector order.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            CategoricalGroup::FunctioningDay => &["Yes", "No"],
            CategoricalGroup::Holiday => &["No Holiday", "Public Holiday", "Working Day"],
            CategoricalGroup::Season => &["Autumn", "Spring", "Summer", "Winter"],
        }
    }
}

/// One-hot column name for `label` within `group`, e.g. `Season_Winter`.
pub fn indicator_name(group: CategoricalGroup, label: &str) -> String {
    format!("{}_{}", group.name(), label)
}

/// Every indicator column the encoder can ever produce.
pub fn all_indicator_names() -> Vec<String> {
    CategoricalGroup::ALL
        .iter()
        .flat_map(|&g| g.labels().iter().map(move |l| indicator_name(g, l)))
        .collect()
}

/// A label enum bound to its one-hot group.
pub trait Categorical: Sized + Copy + 'static {
    const GROUP: CategoricalGroup;
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.label() == label)
    }

    fn indicator(self) -> String {
        indicator_name(Self::GROUP, self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FunctioningDay {
    #[default]
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Holiday {
    #[default]
    #[serde(rename = "No Holiday")]
    NoHoliday,
    #[serde(rename = "Public Holiday")]
    PublicHoliday,
    #[serde(rename = "Working Day")]
    WorkingDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Season {
    Autumn,
    #[default]
    Spring,
    Summer,
    Winter,
}

impl Categorical for FunctioningDay {
    const GROUP: CategoricalGroup = CategoricalGroup::FunctioningDay;
    const ALL: &'static [Self] = &[FunctioningDay::Yes, FunctioningDay::No];

    fn label(self) -> &'static str {
        match self {
            FunctioningDay::Yes => "Yes",
            FunctioningDay::No => "No",
        }
    }
}

impl Categorical for Holiday {
    const GROUP: CategoricalGroup = CategoricalGroup::Holiday;
    const ALL: &'static [Self] = &[
        Holiday::NoHoliday,
        Holiday::PublicHoliday,
        Holiday::WorkingDay,
    ];

    fn label(self) -> &'static str {
        match self {
            Holiday::NoHoliday => "No Holiday",
            Holiday::PublicHoliday => "Public Holiday",
            Holiday::WorkingDay => "Working Day",
        }
    }
}

impl Categorical for Season {
    const GROUP: CategoricalGroup = CategoricalGroup::Season;
    const ALL: &'static [Self] = &[Season::Autumn, Season::Spring, Season::Summer, Season::Winter];

    fn label(self) -> &'static str {
        match self {
            Season::Autumn => "Autumn",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Winter => "Winter",
        }
    }
}

/// Values collected from the form for a single prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    // ---
    pub hour: u8,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub visibility: f64,
    pub dew_point: f64,
    pub solar_radiation: f64,
    pub rainfall: f64,
    pub snowfall: f64,
    pub functioning_day: FunctioningDay,
    pub holiday: Holiday,
    pub season: Season,
}

/// Out-of-range form values.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("hour must be between 0 and 23, got {0}")]
    HourOutOfRange(u8),

    #[error("humidity must be between 0 and 100, got {0}")]
    HumidityOutOfRange(f64),
}

impl Default for RawInput {
    /// Form defaults used when no scenario preset supplies a value.
    fn default() -> Self {
        // ---
        RawInput {
            hour: 12,
            temperature: 20.0,
            humidity: 50.0,
            wind_speed: 2.0,
            visibility: 1500.0,
            dew_point: 10.0,
            solar_radiation: 0.5,
            rainfall: 0.0,
            snowfall: 0.0,
            functioning_day: FunctioningDay::Yes,
            holiday: Holiday::NoHoliday,
            season: Season::Spring,
        }
    }
}

impl RawInput {
    /// Scalar fields paired with their canonical column names.
    pub fn scalar_columns(&self) -> [(&'static str, f64); 9] {
        // ---
        let values = [
            f64::from(self.hour),
            self.temperature,
            self.humidity,
            self.wind_speed,
            self.visibility,
            self.dew_point,
            self.solar_radiation,
            self.rainfall,
            self.snowfall,
        ];
        let mut out = [("", 0.0); 9];
        for (slot, (name, value)) in out.iter_mut().zip(SCALAR_COLUMNS.iter().zip(values)) {
            *slot = (*name, value);
        }
        out
    }

    /// One-hot column names for the three selected labels.
    pub fn indicator_columns(&self) -> [String; 3] {
        [
            self.functioning_day.indicator(),
            self.holiday.indicator(),
            self.season.indicator(),
        ]
    }

    /// Enforce the bounds the form sliders impose.
    pub fn validate(&self) -> Result<(), InputError> {
        // ---
        if self.hour > 23 {
            return Err(InputError::HourOutOfRange(self.hour));
        }
        if !(0.0..=100.0).contains(&self.humidity) {
            return Err(InputError::HumidityOutOfRange(self.humidity));
        }
        Ok(())
    }
}

/// Partial form values; any field left `None` keeps the scenario default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputOverrides {
    pub hour: Option<u8>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub visibility: Option<f64>,
    pub dew_point: Option<f64>,
    pub solar_radiation: Option<f64>,
    pub rainfall: Option<f64>,
    pub snowfall: Option<f64>,
    pub functioning_day: Option<FunctioningDay>,
    pub holiday: Option<Holiday>,
    pub season: Option<Season>,
}

impl InputOverrides {
    pub fn apply(&self, base: RawInput) -> RawInput {
        // ---
        RawInput {
            hour: self.hour.unwrap_or(base.hour),
            temperature: self.temperature.unwrap_or(base.temperature),
            humidity: self.humidity.unwrap_or(base.humidity),
            wind_speed: self.wind_speed.unwrap_or(base.wind_speed),
            visibility: self.visibility.unwrap_or(base.visibility),
            dew_point: self.dew_point.unwrap_or(base.dew_point),
            solar_radiation: self.solar_radiation.unwrap_or(base.solar_radiation),
            rainfall: self.rainfall.unwrap_or(base.rainfall),
            snowfall: self.snowfall.unwrap_or(base.snowfall),
            functioning_day: self.functioning_day.unwrap_or(base.functioning_day),
            holiday: self.holiday.unwrap_or(base.holiday),
            season: self.season.unwrap_or(base.season),
        }
    }
}

/// One row of model input, ordered by the feature schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        FeatureVector { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }
}
