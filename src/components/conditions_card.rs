use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::icon::WeatherCondition;
use crate::state::CurrentConditions;

/// Current temperature, condition, humidity and wind
pub struct ConditionsCard;

pub struct ConditionsCardProps<'a> {
    pub current: &'a CurrentConditions,
}

/// Rows the card needs, borders included
pub const CARD_HEIGHT: u16 = 6;

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("{text:<13}"), Style::default().fg(Color::DarkGray))
}

fn card_lines(current: &CurrentConditions) -> Vec<Line<'static>> {
    let condition = WeatherCondition::from_condition(&current.condition);
    vec![
        Line::from(vec![
            Span::raw(condition.glyph()),
            Span::raw(" "),
            Span::styled(
                current.condition.text.clone(),
                Style::default().fg(condition.color()).bold(),
            ),
        ]),
        Line::from(vec![
            label("Temperature"),
            Span::raw(format!("{:.1}°F", current.temp_f)),
        ]),
        Line::from(vec![
            label("Humidity"),
            Span::raw(format!("{}%", current.humidity)),
        ]),
        Line::from(vec![
            label("Wind"),
            Span::raw(format!("{:.1} mph {}", current.wind_mph, current.wind_dir)),
        ]),
    ]
}

impl Component<Action> for ConditionsCard {
    type Props<'a> = ConditionsCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::bordered()
            .title(" Current Weather ")
            .padding(Padding::horizontal(1));
        frame.render_widget(Paragraph::new(card_lines(props.current)).block(block), area);
    }
}
