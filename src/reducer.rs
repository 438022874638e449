//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== City actions =====
        Action::CityInputOpen => {
            if state.input_mode {
                return DispatchResult::unchanged();
            }
            // The fresh text field's cursor sits at 0, so start from an empty draft
            state.input_mode = true;
            state.draft.clear();
            DispatchResult::changed()
        }

        Action::CityInputClose => {
            if !state.input_mode {
                return DispatchResult::unchanged();
            }
            state.input_mode = false;
            DispatchResult::changed()
        }

        Action::CityDraftChange(draft) => {
            state.draft = draft;
            DispatchResult::changed()
        }

        Action::CitySubmit => {
            state.input_mode = false;
            state.city = state.draft.clone();
            start_fetch(state)
        }

        // ===== Forecast actions =====
        Action::ForecastFetch => start_fetch(state),

        Action::ForecastDidLoad { request_id, report } => {
            if request_id != state.latest_request_id {
                return DispatchResult::unchanged();
            }
            state.location = report.location;
            state.current = Some(report.current);
            state.forecast = report.days;
            state.error = None;
            DispatchResult::changed()
        }

        Action::ForecastDidError {
            request_id,
            message,
        } => {
            if request_id != state.latest_request_id {
                return DispatchResult::unchanged();
            }
            state.clear_results();
            state.error = Some(message);
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Clear prior results and issue a fetch tagged with the next request id
fn start_fetch(state: &mut AppState) -> DispatchResult<Effect> {
    state.clear_results();
    state.latest_request_id = state.latest_request_id.wrapping_add(1);
    DispatchResult::changed_with(Effect::FetchForecast {
        request_id: state.latest_request_id,
        city: state.city.clone(),
    })
}
