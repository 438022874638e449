//! Forecast TUI - current weather and a 7-day temperature chart

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use forecast_tui::action::Action;
use forecast_tui::api::{self, ApiConfig, WeatherApiClient};
use forecast_tui::components::{Component, Dashboard, DashboardProps};
use forecast_tui::effect::Effect;
use forecast_tui::reducer::reducer;
use forecast_tui::state::{AppState, DEFAULT_CITY};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Current weather and a 7-day temperature chart for any city
#[derive(Parser, Debug)]
#[command(name = "forecast-tui")]
#[command(about = "Current weather and a 7-day temperature chart, powered by WeatherAPI.com")]
struct Args {
    /// City to show on launch
    #[arg(long, short, default_value = DEFAULT_CITY)]
    city: String,

    /// WeatherAPI.com API key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// API base URL
    #[arg(long, env = "WEATHER_API_BASE_URL", default_value = api::DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds (minimum 1)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Re-fetch the selected city every N seconds (off unless given)
    #[arg(long, short, value_parser = clap::value_parser!(u64).range(1..))]
    refresh_interval: Option<u64>,

    /// Log file; level comes from RUST_LOG (default: info)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ForecastComponentId {
    Dashboard,
    Input,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum ForecastContext {
    Main,
    Input,
}

impl EventRoutingState<ForecastComponentId, ForecastContext> for AppState {
    fn focused(&self) -> Option<ForecastComponentId> {
        if self.input_mode {
            Some(ForecastComponentId::Input)
        } else {
            Some(ForecastComponentId::Dashboard)
        }
    }

    fn modal(&self) -> Option<ForecastComponentId> {
        if self.input_mode {
            Some(ForecastComponentId::Input)
        } else {
            None
        }
    }

    fn binding_context(&self, id: ForecastComponentId) -> ForecastContext {
        match id {
            ForecastComponentId::Dashboard => ForecastContext::Main,
            ForecastComponentId::Input => ForecastContext::Input,
        }
    }

    fn default_context(&self) -> ForecastContext {
        ForecastContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        api_key,
        base_url,
        timeout_secs,
        refresh_interval,
        log_file,
        debug: debug_args,
    } = Args::parse();

    let log_path = log_file.unwrap_or_else(|| std::env::temp_dir().join("forecast-tui.log"));
    init_logging(&log_path)?;

    if !api_key.as_deref().is_some_and(|key| !key.trim().is_empty()) {
        warn!("WEATHER_API_KEY is not set; every fetch will fail until it is");
    }
    let client = WeatherApiClient::new(ApiConfig {
        base_url,
        api_key,
        timeout: Duration::from_secs(timeout_secs),
    })
    .map_err(|e| io::Error::other(format!("failed to build HTTP client: {e}")))?;
    let client = Arc::new(client);

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(city))
        })
        .await
        .map_err(debug_error)?;
    info!(city = %state.city, "Starting");

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        client,
        refresh_interval,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

/// Send tracing output to a file so it never lands on the TUI
fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::other(format!("failed to init logging: {e}")))
}

struct ForecastUi {
    dashboard: Dashboard,
}

impl ForecastUi {
    fn new() -> Self {
        Self {
            dashboard: Dashboard::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<ForecastComponentId>,
    ) {
        event_ctx.set_component_area(ForecastComponentId::Dashboard, area);
        if state.input_mode {
            event_ctx.set_component_area(ForecastComponentId::Input, area);
        } else {
            event_ctx
                .component_areas
                .remove(&ForecastComponentId::Input);
        }

        let props = DashboardProps {
            state,
            is_focused: render_ctx.is_focused() && !state.input_mode,
        };
        self.dashboard.render(frame, area, props);
    }

    fn handle_dashboard_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .dashboard
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_input_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let input = &mut self.dashboard.input;
        input.set_open(state.input_mode);
        let actions: Vec<_> = input
            .handle_event(event, Dashboard::input_props(state))
            .into_iter()
            .collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: Arc<WeatherApiClient>,
    refresh_interval: Option<u64>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(ForecastUi::new()));
    let mut bus: EventBus<AppState, Action, ForecastComponentId, ForecastContext> =
        EventBus::new();
    let keybindings: Keybindings<ForecastContext> = Keybindings::new();

    let ui_dashboard = Rc::clone(&ui);
    bus.register(ForecastComponentId::Dashboard, move |event, state| {
        ui_dashboard
            .borrow_mut()
            .handle_dashboard_event(&event.kind, state)
    });

    let ui_input = Rc::clone(&ui);
    bus.register(ForecastComponentId::Input, move |event, state| {
        ui_input.borrow_mut().handle_input_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::ForecastFetch),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                if let Some(secs) = refresh_interval {
                    runtime.subscriptions().interval(
                        "refresh",
                        Duration::from_secs(secs),
                        || Action::ForecastFetch,
                    );
                }
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

/// Handle effects by spawning tasks
///
/// Every fetch shares one task key, so a new fetch cancels the one in flight.
fn handle_effect(
    effect: Effect,
    ctx: &mut EffectContext<Action>,
    client: &Arc<WeatherApiClient>,
) {
    match effect {
        Effect::FetchForecast { request_id, city } => {
            info!(request_id, %city, "Fetching forecast");
            let client = Arc::clone(client);
            ctx.tasks().spawn("forecast", async move {
                match client.fetch_forecast(&city).await {
                    Ok(report) => Action::ForecastDidLoad { request_id, report },
                    Err(e) => Action::ForecastDidError {
                        request_id,
                        message: e.to_string(),
                    },
                }
            });
        }
    }
}
