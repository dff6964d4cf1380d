//! Song records and the built-in sample list.

use serde::{Deserialize, Serialize};

const COVER_BASE: &str = "https://picsum.photos/seed";
const COVER_SIZE: u32 = 300;

/// One release as shown in the browse and favorites lists.
///
/// Field names serialize in camelCase so persisted favorites share the shape
/// of the objects the search backend is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique within one in-memory list; not stable across fetches.
    pub id: String,
    pub artist: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

impl Song {
    /// The "{artist} {title}" phrase used for streaming-service searches.
    pub fn search_term(&self) -> String {
        format!("{} {}", self.artist, self.title)
    }

    /// "Artist – Title" for toasts and log lines.
    pub fn display(&self) -> String {
        format!("{} \u{2013} {}", self.artist, self.title)
    }
}

/// Placeholder cover keyed by an arbitrary seed. The seed is URL-encoded so
/// repeated fetches of the same song map to the same image.
pub fn cover_url(seed: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        COVER_BASE,
        urlencoding::encode(seed),
        COVER_SIZE,
        COVER_SIZE
    )
}

/// Cover for a fetched song: seeded by artist and title concatenated.
pub fn cover_url_for(artist: &str, title: &str) -> String {
    cover_url(&format!("{}{}", artist, title))
}

// ── Sample list ───────────────────────────────────────────────────────────────

const SAMPLES: [(&str, &str, &str, &str, &str); 5] = [
    ("1", "The Weeknd", "Dancing In The Flames", "Pop", "2024-09-13"),
    ("2", "Playboi Carti", "All Red", "Hip Hop", "2024-09-13"),
    ("3", "FKA twigs", "Eusexua", "Electronic", "2024-09-13"),
    ("4", "Charli XCX", "Talk Talk", "Pop", "2024-09-12"),
    ("5", "Linkin Park", "The Emptiness Machine", "Rock", "2024-09-05"),
];

/// The fixed list returned whenever live data cannot be obtained or parsed.
/// Covers are seeded by the sample id.
pub fn fallback_songs() -> Vec<Song> {
    SAMPLES
        .iter()
        .map(|(id, artist, title, genre, date)| Song {
            id: id.to_string(),
            artist: artist.to_string(),
            title: title.to_string(),
            album: None,
            genre: genre.to_string(),
            release_date: Some(date.to_string()),
            cover_url: Some(cover_url(id)),
        })
        .collect()
}
