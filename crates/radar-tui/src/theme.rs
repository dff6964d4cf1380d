//! Color palette and style constants for the release browser.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(16, 14, 22);
pub const C_ACCENT: Color = Color::Rgb(236, 72, 153); // pink
pub const C_ACCENT_ALT: Color = Color::Rgb(139, 92, 246); // violet
pub const C_HEART: Color = Color::Rgb(244, 63, 94);
pub const C_MUTED: Color = Color::Rgb(76, 72, 92);
pub const C_SEPARATOR: Color = Color::Rgb(42, 38, 56);
pub const C_SECONDARY: Color = Color::Rgb(120, 116, 142);
pub const C_PRIMARY: Color = Color::Rgb(214, 210, 228);
pub const C_SELECTION_BG: Color = Color::Rgb(34, 28, 48);
pub const C_PANEL_BORDER: Color = Color::Rgb(42, 38, 56);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(139, 92, 246);
pub const C_NUMBER_HINT: Color = Color::Rgb(96, 90, 120);
pub const C_INPUT_BG: Color = Color::Rgb(24, 20, 34);
pub const C_INPUT_FG: Color = Color::Rgb(250, 204, 120);
pub const C_GENRE_TAG: Color = Color::Rgb(167, 139, 250);
pub const C_DATE: Color = Color::Rgb(110, 160, 140);
pub const C_SKELETON: Color = Color::Rgb(36, 32, 48);
pub const C_CHIP_BG: Color = Color::Rgb(236, 72, 153);
pub const C_CHIP_FG: Color = Color::Rgb(16, 14, 22);
pub const C_TOAST_INFO: Color = Color::Rgb(96, 165, 250);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(74, 222, 128);
pub const C_TOAST_WARNING: Color = Color::Rgb(251, 191, 36);
pub const C_TOAST_ERROR: Color = Color::Rgb(248, 113, 113);
pub const C_BADGE_LIVE: Color = Color::Rgb(74, 222, 128);
pub const C_BADGE_SAMPLE: Color = Color::Rgb(251, 191, 36);
pub const C_MODE_NORMAL: Color = Color::Rgb(120, 116, 142);
pub const C_MODE_EDIT: Color = Color::Rgb(250, 204, 120);
pub const C_MODE_CHOOSE: Color = Color::Rgb(236, 72, 153);
pub const C_OVERLAY_BG: Color = Color::Rgb(20, 18, 30);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_selected() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_input() -> Style {
    Style::default().fg(C_INPUT_FG).bg(C_INPUT_BG)
}
