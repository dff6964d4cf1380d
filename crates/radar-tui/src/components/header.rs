//! Top bar: title, screen tabs, region and a search spinner.
//!
//! Row 1: app title, screen tabs, region, search spinner.
//! Row 2: separator.
//!
//! Not focusable.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use radar_core::controller::Screen;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_ACCENT_ALT, C_MUTED, C_PRIMARY, C_SECONDARY, C_SEPARATOR},
    widgets::toast::SPINNER_FRAMES,
};

pub struct Header {
    spinner_frame: usize,
}

impl Header {
    pub fn new() -> Self {
        Self { spinner_frame: 0 }
    }
}

impl Component for Header {
    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn tick(&mut self, state: &AppState) {
        if state.view.loading {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }

        let mut spans = vec![
            Span::styled(
                " Release",
                Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "Radar ",
                Style::default()
                    .fg(C_ACCENT_ALT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" AI ", Style::default().fg(C_MUTED)),
            Span::raw("  "),
        ];

        for (i, screen) in Screen::ALL.iter().enumerate() {
            let active = *screen == state.view.screen;
            let style = if active {
                Style::default()
                    .fg(C_PRIMARY)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(C_SECONDARY)
            };
            spans.push(Span::styled(format!("{} ", i + 1), Style::default().fg(C_MUTED)));
            spans.push(Span::styled(screen.label(), style));
            if *screen == Screen::Favorites && !state.view.favorites.is_empty() {
                spans.push(Span::styled(
                    format!(" ({})", state.view.favorites.len()),
                    Style::default().fg(C_ACCENT),
                ));
            }
            spans.push(Span::raw("   "));
        }

        spans.push(Span::styled("◎ ", Style::default().fg(C_MUTED)));
        spans.push(Span::styled(
            state.view.settings.region.clone(),
            Style::default().fg(C_SECONDARY),
        ));

        if state.view.loading {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("{} searching", SPINNER_FRAMES[self.spinner_frame]),
                Style::default().fg(C_ACCENT_ALT),
            ));
        }

        let row1 = Rect { height: 1, ..area };
        frame.render_widget(Paragraph::new(Line::from(spans)), row1);

        if area.height > 1 {
            let row2 = Rect {
                y: area.y + 1,
                height: 1,
                ..area
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "─".repeat(area.width as usize),
                    Style::default().fg(C_SEPARATOR),
                ))),
                row2,
            );
        }
    }
}
