//! Key-value persistence for favorites and settings.
//!
//! Each key is one JSON file under the data directory, overwritten in full
//! on every save. There is no locking and no merge: the last writer wins.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::settings::AppSettings;
use crate::song::Song;

pub const FAVORITES_KEY: &str = "favorites";
pub const SETTINGS_KEY: &str = "settings";

/// Current layout of the persisted settings envelope.
pub const SETTINGS_VERSION: u32 = 1;

#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// `Ok(None)` when the key was never written.
    pub fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write through a sibling temp file so a crash never leaves half a blob.
    pub fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

// ── Favorites ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FavoritesStore {
    kv: KvStore,
}

impl FavoritesStore {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Missing or unreadable data yields an empty list.
    pub fn load(&self) -> Vec<Song> {
        let content = match self.kv.get(FAVORITES_KEY) {
            Ok(Some(c)) => c,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("[store] reading favorites: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Song>>(&content) {
            Ok(mut songs) => {
                dedup_by_id(&mut songs);
                debug!("[store] loaded {} favorites", songs.len());
                songs
            }
            Err(e) => {
                warn!("[store] favorites blob is corrupt, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    pub fn save(&self, favorites: &[Song]) -> anyhow::Result<()> {
        let json = serde_json::to_string(favorites)?;
        self.kv.set(FAVORITES_KEY, &json)?;
        debug!("[store] saved {} favorites", favorites.len());
        Ok(())
    }
}

fn dedup_by_id(songs: &mut Vec<Song>) {
    let mut seen = std::collections::HashSet::new();
    songs.retain(|s| seen.insert(s.id.clone()));
}

// ── Settings ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct SettingsEnvelope {
    version: u32,
    settings: AppSettings,
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    kv: KvStore,
}

impl SettingsStore {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// `None` when nothing usable is stored; callers fall back to defaults.
    pub fn load(&self) -> Option<AppSettings> {
        let content = match self.kv.get(SETTINGS_KEY) {
            Ok(c) => c?,
            Err(e) => {
                warn!("[store] reading settings: {}", e);
                return None;
            }
        };
        let envelope: SettingsEnvelope = match serde_json::from_str(&content) {
            Ok(env) => env,
            Err(e) => {
                warn!("[store] settings blob is corrupt, using defaults: {}", e);
                return None;
            }
        };
        if envelope.version != SETTINGS_VERSION {
            warn!(
                "[store] settings version {} not understood (want {}), using defaults",
                envelope.version, SETTINGS_VERSION
            );
            return None;
        }
        Some(envelope.settings)
    }

    pub fn save(&self, settings: &AppSettings) -> anyhow::Result<()> {
        let envelope = SettingsEnvelope {
            version: SETTINGS_VERSION,
            settings: settings.clone(),
        };
        self.kv
            .set(SETTINGS_KEY, &serde_json::to_string_pretty(&envelope)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::StreamService;
    use crate::song::fallback_songs;
    use tempfile::TempDir;

    fn kv() -> (TempDir, KvStore) {
        let dir = TempDir::new().unwrap();
        let kv = KvStore::new(dir.path().join("nested"));
        (dir, kv)
    }

    #[test]
    fn test_kv_missing_key() {
        let (_dir, kv) = kv();
        assert!(kv.get("nothing").unwrap().is_none());
        kv.set("k", "v").unwrap();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_favorites_round_trip() {
        let (_dir, kv) = kv();
        let store = FavoritesStore::new(kv);
        assert!(store.load().is_empty());

        let songs = fallback_songs();
        store.save(&songs).unwrap();
        assert_eq!(store.load(), songs);

        store.save(&songs[..2]).unwrap();
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn test_favorites_corrupt_blob() {
        let (_dir, kv) = kv();
        kv.set(FAVORITES_KEY, "{not json").unwrap();
        assert!(FavoritesStore::new(kv).load().is_empty());
    }

    #[test]
    fn test_favorites_dedup_on_load() {
        let (_dir, kv) = kv();
        let mut songs = fallback_songs();
        songs.push(songs[0].clone());
        kv.set(FAVORITES_KEY, &serde_json::to_string(&songs).unwrap())
            .unwrap();
        assert_eq!(FavoritesStore::new(kv).load().len(), 5);
    }

    #[test]
    fn test_favorites_wire_format() {
        let (_dir, kv) = kv();
        let store = FavoritesStore::new(kv.clone());
        store.save(&fallback_songs()[..1]).unwrap();
        let raw = kv.get(FAVORITES_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["artist"], "The Weeknd");
        assert_eq!(value[0]["coverUrl"], "https://picsum.photos/seed/1/300/300");
    }

    #[test]
    fn test_settings_round_trip() {
        let (_dir, kv) = kv();
        let store = SettingsStore::new(kv);
        assert!(store.load().is_none());

        let settings = AppSettings {
            default_service: StreamService::Youtube,
            region: "Japan".into(),
            explicit: false,
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load(), Some(settings));
    }

    #[test]
    fn test_settings_unknown_version() {
        let (_dir, kv) = kv();
        kv.set(
            SETTINGS_KEY,
            r#"{"version":99,"settings":{"defaultService":"apple","region":"UK","explicit":true}}"#,
        )
        .unwrap();
        assert!(SettingsStore::new(kv).load().is_none());
    }
}
