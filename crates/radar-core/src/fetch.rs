//! Release fetch: one prompt, one backend call, always a usable list back.

use tracing::{info, warn};

use crate::gemini::SearchBackend;
use crate::parser::parse_releases;
use crate::song::{fallback_songs, Song};

const DIVERSE_MIX: &str = "Pop, Hip Hop, Electronic, Rock, Latin, K-Pop";

/// Where a batch of songs came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchSource {
    Live,
    /// Sample list; the string says why.
    Fallback(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseBatch {
    pub songs: Vec<Song>,
    pub source: BatchSource,
    /// Epoch millis the request was issued; also embedded in live song ids.
    pub generated_at: i64,
}

impl ReleaseBatch {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, BatchSource::Fallback(_))
    }

    fn fallback(reason: String, generated_at: i64) -> Self {
        Self {
            songs: fallback_songs(),
            source: BatchSource::Fallback(reason),
            generated_at,
        }
    }
}

/// Natural-language instruction for the search backend.
pub fn build_prompt(region: &str, genre: Option<&str>) -> String {
    let focus = match genre {
        Some(g) => format!("Focus genre: {}.", g),
        None => format!("Please give a varied mix of genres such as {}.", DIVERSE_MIX),
    };
    format!(
        "Search for the newest music releases (singles and albums) of the last 7 days.\n\
         Region focus: {region}.\n\
         {focus}\n\
         \n\
         Create a list of 10-15 songs.\n\
         \n\
         IMPORTANT: Answer ONLY with a JSON array in exactly this format, without markdown \
         formatting and without any explanatory text before or after it:\n\
         \n\
         [\n\
         \x20 {{\n\
         \x20   \"artist\": \"Artist Name\",\n\
         \x20   \"title\": \"Song Title\",\n\
         \x20   \"album\": \"Album Name (optional)\",\n\
         \x20   \"genre\": \"Genre\",\n\
         \x20   \"releaseDate\": \"YYYY-MM-DD\"\n\
         \x20 }}\n\
         ]\n"
    )
}

pub struct ReleaseService<B> {
    backend: B,
}

impl<B: SearchBackend> ReleaseService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetch with the current wall-clock time as the id stamp.
    pub async fn fetch(&self, region: &str, genre: Option<&str>) -> ReleaseBatch {
        self.fetch_at(region, genre, chrono::Utc::now().timestamp_millis())
            .await
    }

    /// Never fails: backend and parse errors both produce the sample list.
    pub async fn fetch_at(
        &self,
        region: &str,
        genre: Option<&str>,
        generated_at: i64,
    ) -> ReleaseBatch {
        info!("[fetch] region={} genre={:?}", region, genre);
        let prompt = build_prompt(region, genre);

        let text = match self.backend.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("[fetch] backend error: {}", e);
                return ReleaseBatch::fallback(e.to_string(), generated_at);
            }
        };

        match parse_releases(&text, generated_at) {
            Ok(songs) => {
                info!("[fetch] {} releases", songs.len());
                ReleaseBatch {
                    songs,
                    source: BatchSource::Live,
                    generated_at,
                }
            }
            Err(e) => {
                warn!("[fetch] unparseable answer: {}", e);
                ReleaseBatch::fallback(e.to_string(), generated_at)
            }
        }
    }
}
