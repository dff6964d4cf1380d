//! Turns a free-text search answer into validated `Song` records.
//!
//! The backend is asked for a bare JSON array, but answers often arrive
//! wrapped in prose or a ```json fence. We take the outermost bracket span
//! (first `[` through last `]`) and decode that. The span heuristic can
//! mis-match when the prose itself contains brackets; in that case decoding
//! fails and the caller gets the sample list.
//!
//! Every array element is checked on its own. Elements without a usable
//! artist and title are dropped instead of reaching the UI half-empty. An
//! array that had entries but kept none counts as a failed parse; only a
//! literal `[]` is a real empty result.

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::song::{cover_url_for, fallback_songs, Song};

const UNKNOWN_GENRE: &str = "Unknown";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON array found in response")]
    NoArray,
    #[error("response array is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("none of the {0} array entries is a release")]
    NoValidEntries(usize),
    #[error("bad extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Shape requested from the backend. Everything is optional here; required
/// fields are enforced in `into_song`.
#[derive(Debug, Deserialize)]
struct RawRelease {
    artist: Option<String>,
    title: Option<String>,
    album: Option<String>,
    genre: Option<String>,
    #[serde(rename = "releaseDate")]
    release_date: Option<String>,
}

impl RawRelease {
    fn into_song(self, generated_at: i64, index: usize) -> Option<Song> {
        let artist = non_blank(self.artist)?;
        let title = non_blank(self.title)?;
        let genre = non_blank(self.genre).unwrap_or_else(|| UNKNOWN_GENRE.to_string());
        let cover_url = Some(cover_url_for(&artist, &title));
        Some(Song {
            id: format!("gen-{}-{}", generated_at, index),
            artist,
            title,
            album: non_blank(self.album),
            genre,
            release_date: non_blank(self.release_date),
            cover_url,
        })
    }
}

/// Whitespace-only counts as missing; otherwise the value is kept as sent.
fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// Outermost `[ ... ]` span, greedy across newlines.
fn extract_array(text: &str) -> Result<Option<&str>, ParseError> {
    let re = Regex::new(r"(?s)\[.*\]")?;
    Ok(re.find(text).map(|m| m.as_str()))
}

/// Strict parse: errors when no array can be located or decoded.
///
/// `generated_at` (epoch millis) is baked into every id together with the
/// element's position, so ids are unique within one response.
pub fn parse_releases(text: &str, generated_at: i64) -> Result<Vec<Song>, ParseError> {
    let span = extract_array(text)?.ok_or(ParseError::NoArray)?;
    let elements: Vec<serde_json::Value> = serde_json::from_str(span)?;

    let total = elements.len();
    let songs: Vec<Song> = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let raw = match serde_json::from_value::<RawRelease>(value) {
                Ok(raw) => raw,
                Err(e) => {
                    debug!("[parser] dropping element {}: {}", index, e);
                    return None;
                }
            };
            let song = raw.into_song(generated_at, index);
            if song.is_none() {
                debug!("[parser] dropping element {}: missing artist or title", index);
            }
            song
        })
        .collect();

    if total > 0 && songs.is_empty() {
        return Err(ParseError::NoValidEntries(total));
    }
    if songs.len() < total {
        warn!("[parser] kept {} of {} releases", songs.len(), total);
    }
    Ok(songs)
}

/// Lenient parse used by the fetch path: any failure yields the sample list.
pub fn parse_or_fallback(text: &str, generated_at: i64) -> Vec<Song> {
    match parse_releases(text, generated_at) {
        Ok(songs) => songs,
        Err(e) => {
            warn!("[parser] {}; using sample releases", e);
            fallback_songs()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: i64 = 1_726_000_000_000;

    #[test]
    fn test_plain_array() {
        let text = r#"[{"artist":"A","title":"B","genre":"Pop","releaseDate":"2024-01-01"}]"#;
        let songs = parse_releases(text, TS).unwrap();
        assert_eq!(songs.len(), 1);
        let s = &songs[0];
        assert_eq!(s.artist, "A");
        assert_eq!(s.title, "B");
        assert_eq!(s.genre, "Pop");
        assert_eq!(s.release_date.as_deref(), Some("2024-01-01"));
        assert_eq!(s.id, format!("gen-{}-0", TS));
        assert_eq!(
            s.cover_url.as_deref(),
            Some("https://picsum.photos/seed/AB/300/300")
        );
    }

    #[test]
    fn test_fenced_with_prose() {
        let text = "Here are this week's releases:\n```json\n[\n  {\"artist\": \"Tyla\", \"title\": \"Push 2 Start\", \"album\": \"Tyla +\", \"genre\": \"Afrobeats\"},\n  {\"artist\": \"Rosé\", \"title\": \"APT.\", \"genre\": \"K-Pop\", \"releaseDate\": \"2024-10-18\"}\n]\n```\nEnjoy!";
        let songs = parse_releases(text, TS).unwrap();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].album.as_deref(), Some("Tyla +"));
        assert_eq!(songs[1].id, format!("gen-{}-1", TS));
        assert_eq!(songs[1].artist, "Rosé");
    }

    #[test]
    fn test_no_array_is_error() {
        let err = parse_releases("Sorry, I could not find anything.", TS).unwrap_err();
        assert!(matches!(err, ParseError::NoArray));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = parse_releases("[{\"artist\": \"A\", ]", TS).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_stray_brackets_in_prose_fail() {
        // Greedy span swallows "[1]" through the array end and no longer decodes.
        let text = "Sources [1] below.\n[{\"artist\":\"A\",\"title\":\"B\",\"genre\":\"Pop\"}]";
        assert!(parse_releases(text, TS).is_err());
    }

    #[test]
    fn test_invalid_elements_are_dropped() {
        let text = r#"[
            {"artist":"A","title":"B","genre":"Pop"},
            {"artist":"","title":"No Artist","genre":"Pop"},
            {"title":"Missing Artist","genre":"Rock"},
            {"artist":"C","title":42,"genre":"Rock"},
            "not an object",
            {"artist":"D","title":"E"}
        ]"#;
        let songs = parse_releases(text, TS).unwrap();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].id, format!("gen-{}-0", TS));
        // ids keep the element's original position
        assert_eq!(songs[1].id, format!("gen-{}-5", TS));
        assert_eq!(songs[1].genre, "Unknown");
    }

    #[test]
    fn test_empty_array_is_empty_not_fallback() {
        let songs = parse_or_fallback("```json\n[]\n```", TS);
        assert!(songs.is_empty());
    }

    #[test]
    fn test_all_dropped_is_error() {
        let err = parse_releases(r#"[{"genre":"Pop"}, {"artist":" ","title":"X"}]"#, TS)
            .unwrap_err();
        assert!(matches!(err, ParseError::NoValidEntries(2)));
        assert_eq!(parse_or_fallback(r#"[{"genre":"Pop"}]"#, TS), fallback_songs());
    }

    #[test]
    fn test_citation_only_prose_falls_back() {
        let songs = parse_or_fallback("I could not find any releases this week [1].", TS);
        assert_eq!(songs, fallback_songs());
    }

    #[test]
    fn test_array_of_strings_falls_back() {
        let text = r#"["The Weeknd - Timeless", "Tyla - Push 2 Start"]"#;
        assert!(matches!(
            parse_releases(text, TS),
            Err(ParseError::NoValidEntries(2))
        ));
        assert_eq!(parse_or_fallback(text, TS), fallback_songs());
    }

    #[test]
    fn test_field_values_pass_through() {
        let text = r#"[{"artist":"A ","title":" B","genre":"Pop ","album":" Live "}]"#;
        let songs = parse_releases(text, TS).unwrap();
        let s = &songs[0];
        assert_eq!(s.artist, "A ");
        assert_eq!(s.title, " B");
        assert_eq!(s.genre, "Pop ");
        assert_eq!(s.album.as_deref(), Some(" Live "));
        assert_eq!(
            s.cover_url.as_deref(),
            Some("https://picsum.photos/seed/A%20%20B/300/300")
        );
    }

    #[test]
    fn test_fallback_on_failure() {
        let songs = parse_or_fallback("no data today", TS);
        assert_eq!(songs, fallback_songs());
    }

    #[test]
    fn test_cover_is_stable_across_fetches() {
        let text = r#"[{"artist":"A","title":"B","genre":"Pop"}]"#;
        let first = parse_releases(text, TS).unwrap();
        let second = parse_releases(text, TS + 5_000).unwrap();
        assert_ne!(first[0].id, second[0].id);
        assert_eq!(first[0].cover_url, second[0].cover_url);
    }
}
