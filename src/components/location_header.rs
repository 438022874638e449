use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::ResolvedLocation;

/// FIGlet city name with the resolved location underneath
pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    pub city: &'a str,
    pub location: Option<&'a ResolvedLocation>,
    pub temperature_f: Option<f64>,
}

/// Gradient endpoints keyed on the current temperature
fn gradient_colors(temp_f: Option<f64>) -> (ArtColor, ArtColor) {
    match temp_f {
        Some(t) if t < 32.0 => (
            ArtColor::rgb(150, 200, 255), // Ice blue
            ArtColor::rgb(200, 230, 255), // Light ice
        ),
        Some(t) if t < 59.0 => (
            ArtColor::rgb(100, 180, 255), // Cool blue
            ArtColor::rgb(150, 220, 200), // Teal
        ),
        Some(t) if t < 77.0 => (
            ArtColor::rgb(100, 200, 150), // Green
            ArtColor::rgb(255, 220, 100), // Yellow
        ),
        Some(t) if t < 95.0 => (
            ArtColor::rgb(255, 180, 80),  // Orange
            ArtColor::rgb(255, 120, 80),  // Deep orange
        ),
        Some(_) => (
            ArtColor::rgb(255, 100, 80), // Red-orange
            ArtColor::rgb(255, 60, 60),  // Hot red
        ),
        None => (
            ArtColor::rgb(180, 180, 180), // Gray (no data)
            ArtColor::rgb(220, 220, 220),
        ),
    }
}

fn subtitle(location: Option<&ResolvedLocation>) -> String {
    match location {
        Some(loc) if loc.localtime.is_empty() => loc.display_name(),
        Some(loc) => format!("{} \u{00b7} {}", loc.display_name(), loc.localtime),
        None => String::new(),
    }
}

impl Component<Action> for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet city name
            Constraint::Length(1), // Resolved location
        ])
        .split(area);

        let (start, end) = gradient_colors(props.temperature_f);
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(Fill::Linear(LinearGradient::horizontal(start, end)));

        frame.render_widget(ArtBox::new(&renderer, props.city), chunks[0]);

        let line = Line::from(vec![Span::styled(
            subtitle(props.location),
            Style::default().fg(Color::DarkGray),
        )])
        .centered();
        frame.render_widget(Paragraph::new(line), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtitle() {
        let loc = ResolvedLocation {
            name: "London".into(),
            region: "City of London, Greater London".into(),
            country: "United Kingdom".into(),
            localtime: "2024-05-24 17:00".into(),
        };
        assert_eq!(
            subtitle(Some(&loc)),
            "London, City of London, Greater London, United Kingdom \u{00b7} 2024-05-24 17:00"
        );
        assert_eq!(subtitle(None), "");
    }
}
