//! Two-line song card shared by the browse and favorites panes.
//!
//! Line 1: heart, title, genre tag. Line 2: artist, album, release date.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use radar_core::song::Song;

use crate::widgets::scrollable_list::ScrollableList;

use crate::theme::{
    C_DATE, C_GENRE_TAG, C_HEART, C_MUTED, C_PRIMARY, C_SECONDARY, C_SELECTION_BG, C_SKELETON,
};

/// Rows each card occupies.
pub const CARD_HEIGHT: usize = 2;

/// Cut `text` to at most `max` terminal columns, ending in `…` when cut.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

pub fn render_card(song: &Song, favorite: bool, selected: bool, width: usize) -> ListItem<'static> {
    let heart = if favorite {
        Span::styled(" ♥ ", Style::default().fg(C_HEART))
    } else {
        Span::styled(" ♡ ", Style::default().fg(C_MUTED))
    };
    let marker = if selected { "▌" } else { " " };

    let genre = format!(" [{}]", song.genre);
    let date = song
        .release_date
        .as_deref()
        .map(|d| format!("  {}", d))
        .unwrap_or_default();

    // 1 marker + 3 heart
    let title_room = width.saturating_sub(4 + genre.width());
    let title = truncate_to_width(&song.title, title_room);

    let mut byline = song.artist.clone();
    if let Some(album) = song.album.as_deref().filter(|a| !a.is_empty()) {
        byline.push_str(" · ");
        byline.push_str(album);
    }
    let byline_room = width.saturating_sub(4 + date.width());
    let byline = truncate_to_width(&byline, byline_room);

    let title_style = if selected {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_PRIMARY)
    };

    let line1 = Line::from(vec![
        Span::styled(marker, Style::default().fg(C_HEART)),
        heart,
        Span::styled(title, title_style),
        Span::styled(genre, Style::default().fg(C_GENRE_TAG)),
    ]);
    let line2 = Line::from(vec![
        Span::styled(marker, Style::default().fg(C_HEART)),
        Span::raw("   "),
        Span::styled(byline, Style::default().fg(C_SECONDARY)),
        Span::styled(date, Style::default().fg(C_DATE)),
    ]);

    let item = ListItem::new(vec![line1, line2]);
    if selected {
        item.style(Style::default().bg(C_SELECTION_BG))
    } else {
        item
    }
}

/// Render the visible window of `list` as cards into `area`.
pub fn draw_card_list(
    frame: &mut Frame,
    area: Rect,
    list: &mut ScrollableList<Song>,
    is_favorite: impl Fn(&Song) -> bool,
) {
    let rows = area.height as usize / CARD_HEIGHT;
    list.ensure_visible(rows);
    let width = area.width as usize;
    let items: Vec<ListItem> = list
        .visible_items(rows)
        .into_iter()
        .map(|(i, song)| render_card(song, is_favorite(song), i == list.selected, width))
        .collect();
    frame.render_widget(List::new(items), area);
}

/// Placeholder card shown while a search runs.
pub fn skeleton_card(row: usize, width: usize) -> ListItem<'static> {
    let long = (width.saturating_sub(8) * (60 + (row * 17) % 30) / 100).max(4);
    let short = (long / 2).max(3);
    let block = Style::default().fg(C_SKELETON);
    ListItem::new(vec![
        Line::from(vec![
            Span::raw("    "),
            Span::styled("▆".repeat(long), block),
        ]),
        Line::from(vec![
            Span::raw("    "),
            Span::styled("▂".repeat(short), block),
        ]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("Talk Talk", 20), "Talk Talk");
        assert_eq!(truncate_to_width("Talk Talk", 5), "Talk…");
        assert_eq!(truncate_to_width("Talk Talk", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // each CJK char is two columns
        let cut = truncate_to_width("東京事変", 5);
        assert_eq!(cut, "東京…");
        assert!(cut.width() <= 5);
    }

    #[test]
    fn test_card_is_two_lines() {
        let song = radar_core::song::fallback_songs().remove(0);
        let item = render_card(&song, true, false, 40);
        assert_eq!(item.height(), CARD_HEIGHT);
        assert_eq!(skeleton_card(3, 40).height(), CARD_HEIGHT);
    }
}
