//! Single-line editor over tui-input, used for the free-text region.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{style_input, C_INPUT_BG, C_MUTED};

const PROMPT: &str = "› ";
const PROMPT_WIDTH: u16 = 2;

#[derive(Debug, PartialEq)]
pub enum InputAction {
    Changed,
    /// Enter pressed; carries the trimmed value.
    Confirmed(String),
    Cancelled,
}

pub struct TextInput {
    input: Input,
    active: bool,
    placeholder: String,
}

impl TextInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            active: false,
            placeholder: placeholder.into(),
        }
    }

    /// Start editing with `value` preloaded.
    pub fn begin(&mut self, value: &str) {
        self.input = Input::new(value.to_string());
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Esc => {
                self.active = false;
                InputAction::Cancelled
            }
            KeyCode::Enter => {
                self.active = false;
                InputAction::Confirmed(self.input.value().trim().to_string())
            }
            _ => {
                self.input.handle_event(&Event::Key(key));
                InputAction::Changed
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let room = area.width.saturating_sub(PROMPT_WIDTH + 1) as usize;
        let scroll = self.input.visual_scroll(room);
        let value = self.input.value();
        let span = if value.is_empty() {
            Span::styled(
                format!("{}{}", PROMPT, self.placeholder),
                Style::default().fg(C_MUTED),
            )
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(format!("{}{}", PROMPT, visible), style_input())
        };
        frame.render_widget(
            Paragraph::new(Line::from(span)).style(Style::default().bg(C_INPUT_BG)),
            area,
        );

        if self.active && area.width > 0 {
            let offset = PROMPT_WIDTH + self.input.visual_cursor().saturating_sub(scroll) as u16;
            let x = (area.x + offset).min(area.x + area.width - 1);
            frame.set_cursor_position((x, area.y));
        }
    }
}
