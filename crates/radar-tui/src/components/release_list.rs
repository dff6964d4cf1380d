//! Browse screen for the current genre.
//!
//! Genre chips on top, song cards below, a footer naming the data source.
//! While a search is running and nothing is loaded, five skeleton cards are
//! shown instead of the list.

use std::time::Instant;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use radar_core::fetch::BatchSource;
use radar_core::settings::GENRES;
use radar_core::song::Song;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{C_BADGE_LIVE, C_BADGE_SAMPLE, C_CHIP_BG, C_CHIP_FG, C_MUTED, C_SECONDARY},
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        release_card::{draw_card_list, skeleton_card, CARD_HEIGHT},
        scrollable_list::ScrollableList,
    },
};

const SKELETON_ROWS: usize = 5;
const DOUBLE_CLICK_MS: u128 = 400;

pub struct ReleaseList {
    list: ScrollableList<Song>,
    /// Card area from the last draw, for mouse hit-testing.
    cards_area: Rect,
    last_click: Option<(usize, Instant)>,
}

impl ReleaseList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(),
            cards_area: Rect::default(),
            last_click: None,
        }
    }

    /// Pull the current songs from the controller.
    pub fn sync(&mut self, state: &AppState) {
        self.list.set_items(state.view.songs.clone());
    }

    fn genre_step(state: &AppState, forward: bool) -> Action {
        let n = GENRES.len();
        let cur = GENRES
            .iter()
            .position(|g| *g == state.view.genre)
            .unwrap_or(0);
        let next = if forward { (cur + 1) % n } else { (cur + n - 1) % n };
        Action::SelectGenre(GENRES[next].to_string())
    }

    fn draw_chips(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let mut spans = vec![Span::raw(" ")];
        for genre in GENRES {
            let style = if genre == state.view.genre {
                Style::default()
                    .fg(C_CHIP_FG)
                    .bg(C_CHIP_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(C_SECONDARY)
            };
            spans.push(Span::styled(format!(" {} ", genre), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Only shown once a search has finished with something to list.
fn footer_text(state: &AppState) -> Option<String> {
    if state.view.loading || state.view.songs.is_empty() {
        return None;
    }
    Some(format!(
        " {} releases · powered by Gemini live search",
        state.view.songs.len()
    ))
}

impl Component for ReleaseList {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if self.list.handle_nav_key(key) {
            return vec![];
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => return vec![Self::genre_step(state, false)],
            KeyCode::Right | KeyCode::Char('l') => return vec![Self::genre_step(state, true)],
            // one search at a time
            KeyCode::Char('r') if state.view.loading => {}
            KeyCode::Char('r') => return vec![Action::Refresh],
            KeyCode::Enter => {
                if let Some(song) = self.list.selected_item() {
                    return vec![Action::OpenSong(song.clone())];
                }
            }
            KeyCode::Char('f') | KeyCode::Char(' ') => {
                if let Some(song) = self.list.selected_item() {
                    return vec![Action::ToggleFavorite(song.clone())];
                }
            }
            KeyCode::Char('y') => {
                if let Some(link) = self.list.selected_item().and_then(|s| state.share_link(s)) {
                    return vec![Action::CopyToClipboard(link)];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let a = self.cards_area;
                let inside = event.column >= a.x
                    && event.column < a.x + a.width
                    && event.row >= a.y
                    && event.row < a.y + a.height;
                if !inside {
                    return vec![];
                }
                let card = (event.row - a.y) as usize / CARD_HEIGHT;
                let is_double = self
                    .last_click
                    .map(|(c, t)| c == card && t.elapsed().as_millis() < DOUBLE_CLICK_MS)
                    .unwrap_or(false);
                if self.list.handle_click(card) {
                    if is_double {
                        self.last_click = None;
                        if let Some(song) = self.list.selected_item() {
                            return vec![Action::OpenSong(song.clone())];
                        }
                    } else {
                        self.last_click = Some((card, Instant::now()));
                    }
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) {
        if matches!(action, Action::SelectGenre(_) | Action::Refresh) {
            self.list.set_items(Vec::new());
            self.list.select_first();
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let badge = match &state.source {
            Some(BatchSource::Live) => Some(Badge {
                text: "LIVE",
                color: C_BADGE_LIVE,
            }),
            Some(BatchSource::Fallback(_)) => Some(Badge {
                text: "SAMPLE",
                color: C_BADGE_SAMPLE,
            }),
            None => None,
        };
        let block = pane_chrome("new releases", Some('1'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // chips
                Constraint::Length(1), // gap
                Constraint::Min(0),    // cards
                Constraint::Length(1), // footer
            ])
            .split(inner);

        self.draw_chips(frame, rows[0], state);
        self.cards_area = rows[2];

        if state.view.loading && state.view.songs.is_empty() {
            let width = rows[2].width as usize;
            let items: Vec<ListItem> = (0..SKELETON_ROWS)
                .map(|i| skeleton_card(i, width))
                .collect();
            frame.render_widget(List::new(items), rows[2]);
        } else if self.list.is_empty() {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  no new releases found",
                    Style::default().fg(C_SECONDARY),
                )),
                Line::from(Span::styled(
                    "  press r to search again",
                    Style::default().fg(C_MUTED),
                )),
            ];
            frame.render_widget(Paragraph::new(lines), rows[2]);
        } else {
            draw_card_list(frame, rows[2], &mut self.list, |s| {
                state.view.is_favorite(&s.id)
            });
        }

        if let Some(footer) = footer_text(state) {
            frame.render_widget(
                Paragraph::new(Span::styled(footer, Style::default().fg(C_MUTED))),
                rows[3],
            );
        }
    }
}
