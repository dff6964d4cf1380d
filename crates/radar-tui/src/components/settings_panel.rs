//! Settings screen: default service, region and explicit filter, plus
//! read-only rows for the data source and version.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use radar_core::settings::SettingsPatch;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{style_muted, style_secondary, style_selected, C_ACCENT, C_PRIMARY},
    widgets::{pane_chrome::pane_chrome, text_input::{InputAction, TextInput}},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Service,
    Region,
    Explicit,
}

const ROWS: [Row; 3] = [Row::Service, Row::Region, Row::Explicit];
const LABEL_WIDTH: usize = 18;

pub struct SettingsPanel {
    row: usize,
    region_input: TextInput,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self {
            row: 0,
            region_input: TextInput::new("any country or region"),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.region_input.is_active()
    }

    fn current(&self) -> Row {
        ROWS[self.row.min(ROWS.len() - 1)]
    }

    fn change(&self, state: &AppState, forward: bool) -> Vec<Action> {
        let settings = &state.view.settings;
        let patch = match self.current() {
            Row::Service => SettingsPatch {
                default_service: Some(if forward {
                    settings.default_service.next()
                } else {
                    settings.default_service.prev()
                }),
                ..Default::default()
            },
            Row::Region => SettingsPatch {
                region: Some(settings.cycle_region(forward)),
                ..Default::default()
            },
            Row::Explicit => SettingsPatch {
                explicit: Some(!settings.explicit),
                ..Default::default()
            },
        };
        vec![Action::UpdateSettings(patch)]
    }

    fn edit_key(&mut self, key: KeyEvent) -> Vec<Action> {
        match self.region_input.handle_key(key) {
            InputAction::Changed => vec![],
            InputAction::Cancelled => vec![Action::EndEdit],
            InputAction::Confirmed(region) => vec![
                Action::UpdateSettings(SettingsPatch {
                    region: Some(region),
                    ..Default::default()
                }),
                Action::EndEdit,
            ],
        }
    }
}

fn row_line<'a>(label: &'a str, value: String, selected: bool) -> Line<'a> {
    let marker = if selected { "▸ " } else { "  " };
    let value_style = if selected {
        style_selected()
    } else {
        Style::default().fg(C_PRIMARY)
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(C_ACCENT)),
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), style_secondary()),
        Span::styled(value, value_style),
    ])
}

impl Component for SettingsPanel {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if self.region_input.is_active() {
            return self.edit_key(key);
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.row = self.row.saturating_sub(1);
                vec![]
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.row = (self.row + 1).min(ROWS.len() - 1);
                vec![]
            }
            KeyCode::Left | KeyCode::Char('h') => self.change(state, false),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => self.change(state, true),
            KeyCode::Enter | KeyCode::Char('e') if self.current() == Row::Region => {
                self.region_input.begin(&state.view.settings.region);
                vec![Action::BeginEdit]
            }
            KeyCode::Enter => self.change(state, true),
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("settings", Some('3'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let settings = &state.view.settings;
        let current = self.current();
        let mut lines = vec![
            Line::from(""),
            row_line(
                "default service",
                format!("‹ {} ›", settings.default_service.label()),
                current == Row::Service,
            ),
            row_line(
                "region",
                format!("‹ {} ›", settings.region),
                current == Row::Region,
            ),
            row_line(
                "explicit content",
                if settings.explicit { "[x] allowed" } else { "[ ] hidden" }.to_string(),
                current == Row::Explicit,
            ),
            Line::from(""),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{:<width$}", "data source", width = LABEL_WIDTH), style_muted()),
                Span::styled(state.data_source_label(), style_secondary()),
            ]),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{:<width$}", "version", width = LABEL_WIDTH), style_muted()),
                Span::styled(env!("CARGO_PKG_VERSION"), style_secondary()),
            ]),
        ];
        if current == Row::Region && !self.region_input.is_active() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "  enter to type a custom region",
                style_muted().add_modifier(Modifier::ITALIC),
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);

        if self.region_input.is_active() && inner.height > 3 {
            // overlays the region row
            let x_off = 2 + LABEL_WIDTH as u16;
            let edit_area = Rect {
                x: inner.x + x_off,
                y: inner.y + 2,
                width: inner.width.saturating_sub(x_off),
                height: 1,
            };
            self.region_input.draw(frame, edit_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_core::controller::Controller;
    use radar_core::links::StreamService;
    use radar_core::settings::AppSettings;
    use ratatui::crossterm::event::KeyModifiers;

    fn state() -> AppState {
        AppState::new(
            Controller::new(AppSettings::default(), Vec::new()),
            true,
            "gemini-2.5-flash".into(),
        )
    }

    fn press(panel: &mut SettingsPanel, code: KeyCode, state: &AppState) -> Vec<Action> {
        panel.handle_key(KeyEvent::new(code, KeyModifiers::NONE), state)
    }

    #[test]
    fn test_service_cycles() {
        let state = state();
        let mut panel = SettingsPanel::new();
        assert_eq!(
            press(&mut panel, KeyCode::Right, &state),
            vec![Action::UpdateSettings(SettingsPatch {
                default_service: Some(StreamService::Spotify),
                ..Default::default()
            })]
        );
    }

    #[test]
    fn test_region_cycle_and_edit() {
        let state = state();
        let mut panel = SettingsPanel::new();
        press(&mut panel, KeyCode::Down, &state);
        assert_eq!(
            press(&mut panel, KeyCode::Right, &state),
            vec![Action::UpdateSettings(SettingsPatch {
                region: Some("USA".into()),
                ..Default::default()
            })]
        );

        assert_eq!(press(&mut panel, KeyCode::Enter, &state), vec![Action::BeginEdit]);
        assert!(panel.is_editing());
        for _ in 0.."Germany".len() {
            press(&mut panel, KeyCode::Backspace, &state);
        }
        for c in "Brazil".chars() {
            assert!(press(&mut panel, KeyCode::Char(c), &state).is_empty());
        }
        assert_eq!(
            press(&mut panel, KeyCode::Enter, &state),
            vec![
                Action::UpdateSettings(SettingsPatch {
                    region: Some("Brazil".into()),
                    ..Default::default()
                }),
                Action::EndEdit,
            ]
        );
        assert!(!panel.is_editing());
    }

    #[test]
    fn test_explicit_toggle() {
        let state = state();
        let mut panel = SettingsPanel::new();
        press(&mut panel, KeyCode::Down, &state);
        press(&mut panel, KeyCode::Down, &state);
        press(&mut panel, KeyCode::Down, &state);
        assert_eq!(
            press(&mut panel, KeyCode::Enter, &state),
            vec![Action::UpdateSettings(SettingsPatch {
                explicit: Some(false),
                ..Default::default()
            })]
        );
    }
}
