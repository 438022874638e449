use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;

/// Rows the input needs, borders included
pub const INPUT_HEIGHT: u16 = 3;

const PLACEHOLDER: &str = "Enter city name...";

/// City text field. Edits the draft; Enter commits it.
pub struct CityInput {
    input: TextInput,
    was_open: bool,
}

pub struct CityInputProps<'a> {
    pub draft: &'a str,
    pub is_focused: bool,
    // Action constructors
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl Default for CityInput {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            was_open: false,
        }
    }
}

impl CityInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset cursor state each time the field gains focus
    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.input = TextInput::new();
        }
        self.was_open = is_open;
    }

    fn input_style() -> TextInputStyle {
        TextInputStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: None,
                fg: None,
            },
            placeholder_style: None,
            cursor_style: None,
        }
    }
}

impl Component<Action> for CityInput {
    type Props<'a> = CityInputProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::CityInputClose],
            KeyCode::Enter => return vec![(props.on_submit)(props.draft.to_string())],
            _ => {}
        }

        let input_props = TextInputProps {
            value: props.draft,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: Self::input_style(),
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border = if props.is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::bordered()
            .title(" City ")
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let input_props = TextInputProps {
            value: props.draft,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: Self::input_style(),
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, inner, input_props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn props(draft: &str, is_focused: bool) -> CityInputProps<'_> {
        CityInputProps {
            draft,
            is_focused,
            on_change: Action::CityDraftChange,
            on_submit: |_| Action::CitySubmit,
        }
    }

    #[test]
    fn test_enter_submits() {
        let mut component = CityInput::new();
        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("enter")), props("Paris", true))
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::CitySubmit);
    }

    #[test]
    fn test_esc_closes() {
        let mut component = CityInput::new();
        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("esc")), props("Paris", true))
            .into_iter()
            .collect();
        actions.assert_first(Action::CityInputClose);
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut component = CityInput::new();
        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("enter")), props("Paris", false))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_shows_draft() {
        let mut render = RenderHarness::new(40, INPUT_HEIGHT);
        let mut component = CityInput::new();
        let output = render.render_to_string_plain(|frame| {
            component.render(frame, frame.area(), props("Reykjavik", false));
        });
        assert!(output.contains("Reykjavik"));
        assert!(output.contains("City"));
    }
}
