//! Rounded frame shared by the three screens.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding},
};

use crate::theme::{
    style_focused_border, style_unfocused_border, C_MUTED, C_NUMBER_HINT, C_PRIMARY,
};

/// Short tag in the top-right corner ("LIVE", "SAMPLE", a count).
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

/// `number_key` is the screen's hotkey, drawn as "[N]" before the title.
pub fn pane_chrome<'a>(
    title: &'a str,
    number_key: Option<char>,
    focused: bool,
    badge: Option<Badge<'a>>,
) -> Block<'a> {
    let (border, title_style) = if focused {
        (
            style_focused_border(),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        )
    } else {
        (style_unfocused_border(), Style::default().fg(C_MUTED))
    };

    let hint = number_key
        .map(|k| Span::styled(format!(" [{}]", k), Style::default().fg(C_NUMBER_HINT)))
        .unwrap_or_else(|| Span::raw(""));
    let heading = Line::from(vec![hint, Span::styled(format!(" {} ", title), title_style)]);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .padding(Padding::horizontal(1))
        .title(heading);

    if let Some(b) = badge {
        let tag = Span::styled(
            format!(" {} ", b.text),
            Style::default().fg(b.color).add_modifier(Modifier::BOLD),
        );
        block = block.title_top(Line::from(tag).right_aligned());
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[test]
    fn test_inner_area_leaves_border_and_padding() {
        let block = pane_chrome("favorites", Some('2'), true, None);
        let inner = block.inner(Rect::new(0, 0, 40, 10));
        assert_eq!(inner, Rect::new(2, 1, 36, 8));
    }
}
