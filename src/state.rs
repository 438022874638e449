//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// City shown on first launch when `--city` isn't given
pub const DEFAULT_CITY: &str = "London";

/// Weather condition as reported by WeatherAPI.com
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    pub text: String,
    /// Icon reference (protocol-relative URL on the API's CDN)
    pub icon: String,
    /// WeatherAPI condition code, used to pick a terminal glyph
    #[serde(default)]
    pub code: Option<u16>,
}

/// Instantaneous weather snapshot for the selected city
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentConditions {
    pub temp_f: f64,
    pub condition: Condition,
    pub humidity: u8,
    pub wind_mph: f64,
    pub wind_dir: String,
}

/// Per-day temperature statistics. Fields missing from the response stay `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastDay {
    pub date: String,
    pub avg_temp_f: Option<f64>,
    pub max_temp_f: Option<f64>,
    pub min_temp_f: Option<f64>,
}

/// Where the API resolved the query to
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedLocation {
    pub name: String,
    pub region: String,
    pub country: String,
    pub localtime: String,
}

impl ResolvedLocation {
    /// "Name, Region, Country", skipping empty parts
    pub fn display_name(&self) -> String {
        [&self.name, &self.region, &self.country]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Everything one successful forecast call yields
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastReport {
    pub location: Option<ResolvedLocation>,
    pub current: CurrentConditions,
    pub days: Vec<ForecastDay>,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Core data (visible in debug) ---
    /// Committed city; changing it triggers a fetch
    #[debug(section = "City", label = "Selected")]
    pub city: String,

    /// Text in the input field, committed on submit
    #[debug(section = "City", label = "Draft")]
    pub draft: String,

    #[debug(section = "Weather", label = "Current", debug_fmt)]
    pub current: Option<CurrentConditions>,

    #[debug(section = "Weather", label = "Forecast", debug_fmt)]
    pub forecast: Vec<ForecastDay>,

    #[debug(section = "Weather", label = "Location", debug_fmt)]
    pub location: Option<ResolvedLocation>,

    #[debug(section = "Weather", label = "Error", debug_fmt)]
    pub error: Option<String>,

    /// Id of the most recently issued fetch; results tagged otherwise are stale
    #[debug(section = "Weather", label = "Request")]
    pub latest_request_id: u64,

    // --- Input mode (skipped) ---
    /// Whether the city input has focus
    #[debug(skip)]
    pub input_mode: bool,
}

impl AppState {
    /// Create state for the given city, with nothing fetched yet
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            draft: String::new(),
            current: None,
            forecast: Vec::new(),
            location: None,
            error: None,
            latest_request_id: 0,
            input_mode: false,
        }
    }

    /// Drop every result of the previous fetch
    pub fn clear_results(&mut self) {
        self.current = None;
        self.forecast.clear();
        self.location = None;
        self.error = None;
    }

    pub fn has_forecast(&self) -> bool {
        !self.forecast.is_empty()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_CITY)
    }
}
