use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::city_input::INPUT_HEIGHT;
use super::conditions_card::CARD_HEIGHT;
use super::{
    CityInput, CityInputProps, Component, ConditionsCard, ConditionsCardProps, ErrorBanner,
    ErrorBannerProps, ForecastChart, ForecastChartProps, LocationHeader, LocationHeaderProps,
};
use crate::action::Action;
use crate::chart::ChartData;
use crate::state::AppState;

/// FIGlet name (terminus is 6 rows) plus the location line
const HEADER_MAX: u16 = 7;
const BANNER_HEIGHT: u16 = 3;
const CHART_MIN: u16 = 10;

/// Props for Dashboard - read-only view of state
pub struct DashboardProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole screen. Sections appear only when their state is populated.
#[derive(Default)]
pub struct Dashboard {
    pub input: CityInput,
}

enum Section {
    Header,
    Input,
    Banner,
    Card,
    Chart,
    StatusBar,
}

impl Section {
    fn constraint(&self) -> Constraint {
        match self {
            Section::Header => Constraint::Max(HEADER_MAX),
            Section::Input => Constraint::Length(INPUT_HEIGHT),
            Section::Banner => Constraint::Length(BANNER_HEIGHT),
            Section::Card => Constraint::Length(CARD_HEIGHT),
            Section::Chart => Constraint::Min(CHART_MIN),
            Section::StatusBar => Constraint::Length(1),
        }
    }
}

/// Sections to draw, top to bottom, each behind its own guard
fn sections(state: &AppState) -> Vec<Section> {
    let mut sections = vec![Section::Header, Section::Input];
    if state.error.is_some() {
        sections.push(Section::Banner);
    }
    if state.current.is_some() {
        sections.push(Section::Card);
    }
    if state.has_forecast() {
        sections.push(Section::Chart);
    }
    sections.push(Section::StatusBar);
    sections
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_props(state: &AppState) -> CityInputProps<'_> {
        CityInputProps {
            draft: &state.draft,
            is_focused: state.input_mode,
            on_change: Action::CityDraftChange,
            on_submit: |_| Action::CitySubmit,
        }
    }
}

impl Component<Action> for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('/') | KeyCode::Char('e') => Some(Action::CityInputOpen),
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::ForecastFetch),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DashboardProps<'_>) {
        let state = props.state;
        let sections = sections(state);
        let chunks = Layout::vertical(sections.iter().map(Section::constraint)).split(area);

        for (section, &chunk) in sections.iter().zip(chunks.iter()) {
            match section {
                Section::Header => LocationHeader.render(
                    frame,
                    chunk,
                    LocationHeaderProps {
                        city: &state.city,
                        location: state.location.as_ref(),
                        temperature_f: state.current.as_ref().map(|c| c.temp_f),
                    },
                ),
                Section::Input => {
                    self.input.set_open(state.input_mode);
                    self.input.render(frame, chunk, Self::input_props(state));
                }
                Section::Banner => {
                    if let Some(message) = state.error.as_deref() {
                        ErrorBanner.render(frame, chunk, ErrorBannerProps { message });
                    }
                }
                Section::Card => {
                    if let Some(current) = state.current.as_ref() {
                        ConditionsCard.render(frame, chunk, ConditionsCardProps { current });
                    }
                }
                Section::Chart => {
                    let chart = ChartData::project(&state.city, &state.forecast);
                    ForecastChart.render(frame, chunk, ForecastChartProps { chart: &chart });
                }
                Section::StatusBar => {
                    let hints = if state.input_mode {
                        vec![
                            StatusBarHint::new("enter", "submit"),
                            StatusBarHint::new("esc", "cancel"),
                        ]
                    } else {
                        vec![
                            StatusBarHint::new("/", "city"),
                            StatusBarHint::new("r", "refresh"),
                            StatusBarHint::new("q", "quit"),
                        ]
                    };
                    let mut status_bar = StatusBar::new();
                    <StatusBar as Component<Action>>::render(
                        &mut status_bar,
                        frame,
                        chunk,
                        StatusBarProps {
                            left: StatusBarSection::empty(),
                            center: StatusBarSection::hints(&hints),
                            right: StatusBarSection::empty(),
                            style: StatusBarStyle::default(),
                            is_focused: false,
                        },
                    );
                }
            }
        }
    }
}
