//! Action and state tests using TestHarness

use forecast_tui::{
    action::Action,
    components::{CityInput, Component, Dashboard, DashboardProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, CurrentConditions, ForecastDay, ForecastReport},
};
use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, NumericComponentId, assert_emitted, assert_not_emitted};

fn report(days: usize) -> ForecastReport {
    ForecastReport {
        location: None,
        current: CurrentConditions {
            temp_f: 55.4,
            humidity: 81,
            wind_mph: 11.9,
            wind_dir: "SW".into(),
            ..Default::default()
        },
        days: (0..days)
            .map(|i| ForecastDay {
                date: format!("2024-05-{:02}", 24 + i),
                avg_temp_f: Some(55.0 + i as f64),
                max_temp_f: Some(61.0 + i as f64),
                min_temp_f: Some(48.0 + i as f64),
            })
            .collect(),
    }
}

#[test]
fn test_initial_fetch_uses_default_city() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::ForecastFetch);

    assert!(result.changed);
    assert_eq!(
        result.effects,
        vec![Effect::FetchForecast {
            request_id: 1,
            city: "London".into(),
        }]
    );
}

#[test]
fn test_submit_any_city_fetches_once() {
    for city in ["Tokyo", "New York", "", "  padded  ", "Zzzzz", "Zürich"] {
        let mut store = EffectStore::new(AppState::default(), reducer);

        store.dispatch(Action::CityInputOpen);
        store.dispatch(Action::CityDraftChange(city.into()));
        let result = store.dispatch(Action::CitySubmit);

        assert_eq!(store.state().city, city, "city is committed verbatim");
        assert_eq!(result.effects.len(), 1, "exactly one fetch for {city:?}");
        assert!(matches!(
            &result.effects[0],
            Effect::FetchForecast { city: c, .. } if c == city
        ));
    }
}

#[test]
fn test_typing_does_not_fetch() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    for draft in ["P", "Pa", "Par", "Pari", "Paris"] {
        let result = store.dispatch(Action::CityDraftChange(draft.into()));
        assert!(result.effects.is_empty());
    }
    assert_eq!(store.state().city, "London");
    assert_eq!(store.state().draft, "Paris");
}

#[test]
fn test_load_populates_card_and_series() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::ForecastFetch);
    store.dispatch(Action::ForecastDidLoad {
        request_id: 1,
        report: report(7),
    });

    assert!(store.state().current.is_some());
    assert_eq!(store.state().forecast.len(), 7);
    assert!(store.state().error.is_none());
}

#[test]
fn test_component_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = Dashboard::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("/", |state, event| {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::CityInputOpen);
}

#[test]
fn test_input_submits_on_enter() {
    let state = AppState {
        input_mode: true,
        draft: "Lima".into(),
        ..Default::default()
    };
    let mut harness = TestHarness::<AppState, Action>::new(state);
    let mut input = CityInput::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("enter", |state, event| {
        input
            .handle_event(&event.kind, Dashboard::input_props(state))
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::CitySubmit);
}

#[test]
fn test_action_categories() {
    let did_load = Action::ForecastDidLoad {
        request_id: 1,
        report: ForecastReport::default(),
    };
    let submit = Action::CitySubmit;
    let quit = Action::Quit;

    assert_eq!(did_load.category(), Some("forecast_did"));
    assert_eq!(submit.category(), Some("city"));
    assert_eq!(quit.category(), None);

    assert!(did_load.is_forecast_did());
    assert!(submit.is_city());
}

#[test]
fn test_result_actions_drive_reducer() {
    let mut harness = TestHarness::<AppState, Action>::default();

    // Results arrive as emitted actions, the way spawned tasks deliver them
    harness.emit(Action::ForecastDidLoad {
        request_id: 1,
        report: report(7),
    });
    harness.emit(Action::ForecastDidError {
        request_id: 1,
        message: "late".into(),
    });
    let actions = harness.drain_emitted();
    actions.assert_count(2);
    assert_emitted!(actions, Action::ForecastDidLoad { .. });
    assert_not_emitted!(actions, Action::ForecastFetch);

    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::ForecastFetch);
    let changed: Vec<bool> = actions
        .into_iter()
        .map(|action| store.dispatch(action).changed)
        .collect();

    // The load applies; the error for the same id replaces it
    assert_eq!(changed, vec![true, true]);
    assert_eq!(store.state().error.as_deref(), Some("late"));
    assert!(store.state().current.is_none());
    assert!(store.state().forecast.is_empty());
}

#[test]
fn test_results_for_old_requests_are_ignored() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::ForecastFetch);
    let latest = store.dispatch(Action::ForecastFetch);
    assert!(matches!(
        latest.effects.as_slice(),
        [Effect::FetchForecast { request_id: 2, .. }]
    ));

    let stale = [
        Action::ForecastDidLoad {
            request_id: 1,
            report: report(7),
        },
        Action::ForecastDidError {
            request_id: 1,
            message: "late".into(),
        },
    ];
    for action in stale {
        assert!(!store.dispatch(action).changed);
    }

    assert!(store.state().current.is_none());
    assert!(store.state().error.is_none());
    assert_eq!(store.state().latest_request_id, 2);
}
