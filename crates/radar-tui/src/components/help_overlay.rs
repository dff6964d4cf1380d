//! Key reference popup, toggled with `?`.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_OVERLAY_BG, C_PANEL_BORDER, C_PRIMARY, C_SECONDARY},
};

type Section = (&'static str, &'static [(&'static str, &'static str)]);

const SECTIONS: &[Section] = &[
    (
        " screens",
        &[
            ("1 / 2 / 3", "new releases / favorites / settings"),
            ("tab / shift-tab", "next / previous screen"),
        ],
    ),
    (
        " releases & favorites",
        &[
            ("↑ / ↓  or  j / k", "move selection"),
            ("pg up / pg dn", "jump 5 cards"),
            ("home / end  or  g / G", "first / last"),
            ("← / →  or  h / l", "previous / next genre"),
            ("enter", "open in streaming service"),
            ("f  or  space", "add / remove favorite"),
            ("y", "copy streaming link"),
            ("r", "search again"),
        ],
    ),
    (
        " settings",
        &[
            ("↑ / ↓", "choose row"),
            ("← / →", "change value"),
            ("enter", "type a region / toggle"),
        ],
    ),
    (
        " general",
        &[
            ("K", "toggle keys bar"),
            ("?", "toggle this help"),
            ("q / Ctrl+C", "quit"),
        ],
    ),
];

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }
}

impl Component for HelpOverlay {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => vec![Action::ToggleHelp],
            // swallow everything else while open
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) {
        if *action == Action::ToggleHelp {
            self.visible = !self.visible;
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        if !self.visible {
            return;
        }

        let popup = centered_rect(64, 30, area);

        let mut lines = vec![
            Line::from(Span::styled(
                " keyboard shortcuts",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
        ];
        for (heading, rows) in SECTIONS {
            lines.push(Line::from(""));
            lines.push(section(heading));
            lines.extend(rows.iter().map(|(k, d)| help_row(k, d)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " press ? or esc to close",
            Style::default().fg(C_MUTED),
        )));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(C_PANEL_BORDER))
                        .style(Style::default().bg(C_OVERLAY_BG)),
                )
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
    ))
}

fn help_row<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{:<22}", key),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, Style::default().fg(C_SECONDARY)),
    ])
}

/// A `width_pct`% wide, `height` rows tall rect in the middle of `r`.
pub fn centered_rect(width_pct: u16, height: u16, r: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(r);
    let [popup] = Layout::horizontal([Constraint::Percentage(width_pct)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
