//! Streaming services and their search deep links.

use serde::{Deserialize, Serialize};

use crate::song::Song;

/// Where a selected song is opened. `Ask` means "show the chooser".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamService {
    #[default]
    Ask,
    Spotify,
    Apple,
    Youtube,
}

impl StreamService {
    /// Every setting value, in the order the settings screen cycles through.
    pub const ALL: [StreamService; 4] = [Self::Ask, Self::Spotify, Self::Apple, Self::Youtube];

    /// Services that can actually open a song; listed in the chooser.
    pub const PLAYABLE: [StreamService; 3] = [Self::Spotify, Self::Apple, Self::Youtube];

    pub fn label(self) -> &'static str {
        match self {
            Self::Ask => "always ask",
            Self::Spotify => "Spotify",
            Self::Apple => "Apple Music",
            Self::Youtube => "YouTube",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Ask => "ask",
            Self::Spotify => "spotify",
            Self::Apple => "apple",
            Self::Youtube => "youtube",
        }
    }

    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let pos = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Search URL for an already-assembled term. `None` for `Ask`.
    pub fn search_url(self, term: &str) -> Option<String> {
        let term = urlencoding::encode(term);
        match self {
            Self::Ask => None,
            Self::Spotify => Some(format!("https://open.spotify.com/search/{}", term)),
            Self::Apple => Some(format!("https://music.apple.com/us/search?term={}", term)),
            Self::Youtube => Some(format!(
                "https://www.youtube.com/results?search_query={}",
                term
            )),
        }
    }

    pub fn deep_link(self, song: &Song) -> Option<String> {
        self.search_url(&song.search_term())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(artist: &str, title: &str) -> Song {
        Song {
            id: "1".into(),
            artist: artist.into(),
            title: title.into(),
            album: None,
            genre: "Pop".into(),
            release_date: None,
            cover_url: None,
        }
    }

    #[test]
    fn test_deep_links() {
        let s = song("X", "Y");
        assert_eq!(
            StreamService::Spotify.deep_link(&s).as_deref(),
            Some("https://open.spotify.com/search/X%20Y")
        );
        assert_eq!(
            StreamService::Apple.deep_link(&s).as_deref(),
            Some("https://music.apple.com/us/search?term=X%20Y")
        );
        assert_eq!(
            StreamService::Youtube.deep_link(&s).as_deref(),
            Some("https://www.youtube.com/results?search_query=X%20Y")
        );
        assert!(StreamService::Ask.deep_link(&s).is_none());
    }

    #[test]
    fn test_term_is_encoded() {
        let s = song("Simon & Garfunkel", "Mrs. Robinson");
        assert_eq!(
            StreamService::Spotify.deep_link(&s).as_deref(),
            Some("https://open.spotify.com/search/Simon%20%26%20Garfunkel%20Mrs.%20Robinson")
        );
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(StreamService::Youtube.next(), StreamService::Ask);
        assert_eq!(StreamService::Ask.prev(), StreamService::Youtube);
        assert_eq!(StreamService::Ask.next(), StreamService::Spotify);
    }

    #[test]
    fn test_serde_keys() {
        let json = serde_json::to_string(&StreamService::Youtube).unwrap();
        assert_eq!(json, "\"youtube\"");
        let parsed: StreamService = serde_json::from_str("\"apple\"").unwrap();
        assert_eq!(parsed, StreamService::Apple);
    }
}
