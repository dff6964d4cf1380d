//! Streaming-service chooser shown when the default service is "ask".
//!
//! Visible whenever the controller holds a selected song. Captures all keys.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use radar_core::links::StreamService;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::help_overlay::centered_rect,
    theme::{
        style_muted, style_secondary, style_selected, C_ACCENT, C_OVERLAY_BG,
        C_PANEL_BORDER_FOCUSED, C_PRIMARY,
    },
    widgets::release_card::truncate_to_width,
};

pub struct StreamOverlay {
    cursor: usize,
}

impl StreamOverlay {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }
}

impl Component for StreamOverlay {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let services = StreamService::PLAYABLE;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => vec![Action::CloseOverlay],
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![]
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(services.len() - 1);
                vec![]
            }
            KeyCode::Enter => vec![Action::ChooseService(services[self.cursor])],
            KeyCode::Char(c @ '1'..='3') => {
                let idx = (c as u8 - b'1') as usize;
                vec![Action::ChooseService(services[idx])]
            }
            // any other key is swallowed while the chooser is up
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) {
        if let Action::OpenSong(_) = action {
            self.cursor = 0;
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let Some(song) = state.view.selected_song.as_ref() else {
            return;
        };

        let popup = centered_rect(70, 12, area);
        let url_room = popup.width.saturating_sub(8) as usize;

        let mut lines = vec![
            Line::from(Span::styled(
                format!(" {}", song.title),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(format!(" {}", song.artist), style_secondary())),
            Line::from(""),
        ];
        for (i, service) in StreamService::PLAYABLE.iter().enumerate() {
            let selected = i == self.cursor;
            let label_style = if selected {
                style_selected()
            } else {
                Style::default().fg(C_PRIMARY)
            };
            let url = service.deep_link(song).unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(if selected { " ▸ " } else { "   " }, Style::default().fg(C_ACCENT)),
                Span::styled(format!("{} ", i + 1), style_muted()),
                Span::styled(service.label(), label_style),
            ]));
            lines.push(Line::from(Span::styled(
                format!("     {}", truncate_to_width(&url, url_room)),
                style_muted(),
            )));
        }
        lines.push(Line::from(Span::styled(
            " 1-3 or enter to open · esc to close",
            style_muted(),
        )));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
                    .title(Span::styled(" open with ", Style::default().fg(C_ACCENT)))
                    .style(Style::default().bg(C_OVERLAY_BG)),
            ),
            popup,
        );
    }
}
