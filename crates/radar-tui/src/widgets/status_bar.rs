//! Bottom line with the input mode and the bindings for the
//! current screen.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use radar_core::controller::Screen;

use crate::theme::{C_MODE_CHOOSE, C_MODE_EDIT, C_MODE_NORMAL, C_MUTED};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    /// Typing into the region field.
    Edit,
    /// Service chooser is open.
    Choose,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Edit => "EDIT",
            Self::Choose => "OPEN",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Edit => C_MODE_EDIT,
            Self::Choose => C_MODE_CHOOSE,
        }
    }
}

fn keys_for(mode: InputMode, screen: Screen) -> &'static str {
    match mode {
        InputMode::Edit => " type region  Enter save  Esc cancel",
        InputMode::Choose => " 1/2/3 or ↑↓ Enter open  Esc close",
        InputMode::Normal => match screen {
            Screen::Home => {
                " ↑↓/jk select  ←→/hl genre  Enter open  f ♥  y copy link  r refresh  Tab/1-3 screens  ? help  q quit"
            }
            Screen::Favorites => {
                " ↑↓/jk select  Enter open  f remove  y copy link  Tab/1-3 screens  ? help  q quit"
            }
            Screen::Settings => {
                " ↑↓/jk row  ←→/hl change  Enter edit/toggle  Tab/1-3 screens  ? help  q quit"
            }
        },
    }
}

pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, screen: Screen) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default()
                .fg(mode.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys_for(mode, screen), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
