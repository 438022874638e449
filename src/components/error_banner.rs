use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};

use super::Component;
use crate::action::Action;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

pub struct ErrorBanner;

pub struct ErrorBannerProps<'a> {
    pub message: &'a str,
}

impl Component<Action> for ErrorBanner {
    type Props<'a> = ErrorBannerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::bordered()
            .border_style(Style::default().fg(Color::Red))
            .title(Span::styled(" Error ", Style::default().fg(Color::Red).bold()));

        let line = Line::from(vec![
            Span::raw(ERROR_ICON),
            Span::raw(" "),
            Span::styled(
                props.message.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            ),
        ]);

        frame.render_widget(
            Paragraph::new(line).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }
}
