//! Notices stacked in the top-right corner: favorite added, link copied,
//! sample data in use. A search in flight gets a spinner row above them
//! that stays until the fetch result turns it into an ordinary notice.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{C_TOAST_ERROR, C_TOAST_INFO, C_TOAST_SUCCESS, C_TOAST_WARNING};
use crate::widgets::release_card::truncate_to_width;

pub const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    fn color(self) -> ratatui::style::Color {
        match self {
            Self::Info => C_TOAST_INFO,
            Self::Success => C_TOAST_SUCCESS,
            Self::Warning => C_TOAST_WARNING,
            Self::Error => C_TOAST_ERROR,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Info => "·",
            Self::Success => "✓",
            Self::Warning => "!",
            Self::Error => "✗",
        }
    }

    fn lifetime(self) -> Duration {
        match self {
            Self::Info | Self::Success => Duration::from_secs(3),
            Self::Warning => Duration::from_secs(4),
            Self::Error => Duration::from_secs(5),
        }
    }
}

struct Notice {
    text: String,
    severity: Severity,
    until: Instant,
}

struct Spinner {
    message: String,
    frame: usize,
}

#[derive(Default)]
pub struct ToastManager {
    notices: VecDeque<Notice>,
    spinner: Option<Spinner>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity) {
        let text = message.into();
        // repeating a notice moves it to the top with a fresh timer
        self.notices.retain(|n| n.text != text);
        self.notices.push_back(Notice {
            text,
            severity,
            until: Instant::now() + severity.lifetime(),
        });
        while self.notices.len() > MAX_VISIBLE * 2 {
            self.notices.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Error);
    }

    /// Show `message` with an animated spinner until the search resolves.
    pub fn spinner(&mut self, message: impl Into<String>) {
        self.spinner = Some(Spinner {
            message: message.into(),
            frame: 0,
        });
    }

    /// The search is done: drop the spinner and report the outcome.
    pub fn resolve_spinner(&mut self, severity: Severity, message: impl Into<String>) {
        self.spinner = None;
        self.push(message, severity);
    }

    pub fn has_spinner(&self) -> bool {
        self.spinner.is_some()
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.notices.retain(|n| n.until > now);
        if let Some(s) = self.spinner.as_mut() {
            s.frame = (s.frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty() && self.spinner.is_none()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if self.is_empty() {
            return;
        }
        let max_width = (area.width / 2).clamp(30, 60).min(area.width);
        let mut y = area.y + 1;
        let bottom = area.y + area.height;

        let spinner_line = self.spinner.as_ref().map(|s| {
            let icon = SPINNER_FRAMES[s.frame % SPINNER_FRAMES.len()];
            (icon, s.message.as_str(), C_TOAST_INFO)
        });
        let notice_lines = self
            .notices
            .iter()
            .rev()
            .take(MAX_VISIBLE)
            .map(|n| (n.severity.icon(), n.text.as_str(), n.severity.color()));

        for (icon, message, color) in spinner_line.into_iter().chain(notice_lines) {
            if y >= bottom {
                break;
            }
            let text = format!(" {} {} ", icon, message);
            let text = truncate_to_width(&text, max_width as usize);
            let w = (text.width() as u16).min(max_width);
            let row = Rect {
                x: area.x + area.width.saturating_sub(w + 1),
                y,
                width: w,
                height: 1,
            };
            frame.render_widget(Clear, row);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    text,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))),
                row,
            );
            y += 1;
        }
    }
}
