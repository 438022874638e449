//! Actions - every state transition as a tagged variant

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::ForecastReport;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== City category =====
    /// Focus the city input
    CityInputOpen,

    /// Leave the city input without committing the draft
    CityInputClose,

    /// Draft text changed
    CityDraftChange(String),

    /// Commit the draft as the selected city (triggers a fetch)
    CitySubmit,

    // ===== Forecast category =====
    /// Intent: fetch the forecast for the selected city
    ForecastFetch,

    /// Result: forecast loaded for the given request
    ForecastDidLoad {
        request_id: u64,
        report: ForecastReport,
    },

    /// Result: forecast failed for the given request
    ForecastDidError { request_id: u64, message: String },

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Exit the application
    Quit,
}
