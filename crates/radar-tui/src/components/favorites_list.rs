//! Favorites screen: saved songs, drawn with the browse-screen cards.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use radar_core::song::Song;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_SECONDARY},
    widgets::{
        pane_chrome::pane_chrome, release_card::draw_card_list, scrollable_list::ScrollableList,
    },
};

pub struct FavoritesList {
    list: ScrollableList<Song>,
}

impl FavoritesList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(),
        }
    }

    pub fn sync(&mut self, state: &AppState) {
        self.list.set_items(state.view.favorites.clone());
    }
}

impl Component for FavoritesList {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if self.list.handle_nav_key(key) {
            return vec![];
        }
        let Some(song) = self.list.selected_item() else {
            return vec![];
        };
        match key.code {
            KeyCode::Enter => vec![Action::OpenSong(song.clone())],
            KeyCode::Char('f') | KeyCode::Char(' ') | KeyCode::Delete => {
                vec![Action::ToggleFavorite(song.clone())]
            }
            KeyCode::Char('y') => state
                .share_link(song)
                .map(Action::CopyToClipboard)
                .into_iter()
                .collect(),
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let title = format!("favorites ({})", state.view.favorites.len());
        let block = pane_chrome(&title, Some('2'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.list.is_empty() {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  no favorites yet",
                    Style::default().fg(C_SECONDARY),
                )),
                Line::from(Span::styled(
                    "  press f on a release to keep it here",
                    Style::default().fg(C_MUTED),
                )),
            ];
            frame.render_widget(Paragraph::new(lines), inner);
            return;
        }

        // everything here is a favorite
        draw_card_list(frame, inner, &mut self.list, |_| true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_core::controller::Controller;
    use radar_core::settings::AppSettings;
    use radar_core::song::fallback_songs;
    use ratatui::crossterm::event::KeyModifiers;

    #[test]
    fn test_remove_selected() {
        let view = Controller::new(AppSettings::default(), fallback_songs()[..2].to_vec());
        let state = AppState::new(view, false, "test".into());
        let mut favs = FavoritesList::new();
        favs.sync(&state);

        favs.handle_key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE), &state);
        let actions = favs.handle_key(KeyEvent::new(KeyCode::Char('f'), KeyModifiers::NONE), &state);
        assert_eq!(actions, vec![Action::ToggleFavorite(fallback_songs().remove(1))]);
    }
}
