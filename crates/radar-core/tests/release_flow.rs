//! End-to-end flow through the core: controller effects driven against a
//! scripted backend and a file-backed store.
//!
//! Run with: cargo test -p radar-core --test release_flow

use std::collections::VecDeque;
use std::sync::Mutex;

use radar_core::controller::{Controller, Effect, Screen};
use radar_core::fetch::{BatchSource, ReleaseService};
use radar_core::gemini::{BackendError, SearchBackend};
use radar_core::links::StreamService;
use radar_core::settings::{AppSettings, SettingsPatch};
use radar_core::song::fallback_songs;
use radar_core::store::{FavoritesStore, KvStore, SettingsStore};
use tempfile::TempDir;

/// Pops one scripted answer per call. `None` simulates a transport failure.
struct ScriptedBackend {
    answers: Mutex<VecDeque<Option<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn new(answers: Vec<Option<&str>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().map(|a| a.map(String::from)).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl SearchBackend for ScriptedBackend {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.answers.lock().unwrap().pop_front().flatten() {
            Some(text) => Ok(text),
            None => Err(BackendError::EmptyResponse),
        }
    }
}

/// Minimal runtime: executes effects the way the terminal app does, but
/// synchronously and against the temp store.
struct Harness {
    controller: Controller,
    service: ReleaseService<ScriptedBackend>,
    favorites: FavoritesStore,
    settings: SettingsStore,
    opened: Vec<String>,
    sources: Vec<BatchSource>,
}

impl Harness {
    fn new(dir: &TempDir, backend: ScriptedBackend) -> Self {
        let kv = KvStore::new(dir.path());
        let favorites = FavoritesStore::new(kv.clone());
        let settings = SettingsStore::new(kv);
        let controller = Controller::new(
            settings.load().unwrap_or_default(),
            favorites.load(),
        );
        Self {
            controller,
            service: ReleaseService::new(backend),
            favorites,
            settings,
            opened: Vec::new(),
            sources: Vec::new(),
        }
    }

    async fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch(req) => {
                    let batch = self
                        .service
                        .fetch(&req.region, req.genre.as_deref())
                        .await;
                    self.sources.push(batch.source.clone());
                    self.controller.apply_fetch(req.seq, batch.songs);
                }
                Effect::SaveFavorites(songs) => self.favorites.save(&songs).unwrap(),
                Effect::SaveSettings(s) => self.settings.save(&s).unwrap(),
                Effect::OpenUrl(url) => self.opened.push(url),
            }
        }
    }
}

const POP_ANSWER: &str = r#"Here are this week's releases:
```json
[
  {"artist": "A", "title": "B", "genre": "Pop", "releaseDate": "2024-09-20"},
  {"artist": "C", "title": "D", "album": "E", "genre": "Pop", "releaseDate": "2024-09-19"}
]
```"#;

#[tokio::test]
async fn genre_selection_shows_live_results() {
    let dir = TempDir::new().unwrap();
    let mut h = Harness::new(&dir, ScriptedBackend::new(vec![Some("[]"), Some(POP_ANSWER)]));

    let effects = h.controller.start();
    h.run(effects).await;
    assert!(h.controller.songs.is_empty());
    assert!(!h.controller.loading);

    let effects = h.controller.select_genre("Pop");
    assert!(h.controller.loading);
    h.run(effects).await;

    assert_eq!(h.sources.last(), Some(&BatchSource::Live));
    assert_eq!(h.controller.songs.len(), 2);
    assert_eq!(h.controller.songs[0].artist, "A");
    assert_eq!(h.controller.songs[0].title, "B");
    assert!(h.controller.songs.iter().all(|s| s.cover_url.is_some()));

    let prompts = h.service.backend().prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("Germany"));
    assert!(prompts[1].contains("Pop"));
}

#[tokio::test]
async fn backend_failure_shows_samples() {
    let dir = TempDir::new().unwrap();
    let mut h = Harness::new(&dir, ScriptedBackend::new(vec![None]));

    let effects = h.controller.start();
    h.run(effects).await;

    assert!(matches!(h.sources[0], BatchSource::Fallback(_)));
    assert_eq!(h.controller.songs, fallback_songs());
    assert!(!h.controller.loading);
}

#[tokio::test]
async fn favorites_survive_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut h = Harness::new(&dir, ScriptedBackend::new(vec![None]));
        let effects = h.controller.start();
        h.run(effects).await;

        let picks: Vec<_> = h.controller.songs[..2].to_vec();
        for song in &picks {
            let effects = h.controller.toggle_favorite(song);
            h.run(effects).await;
        }
        // un-favorite the first again
        let effects = h.controller.toggle_favorite(&picks[0]);
        h.run(effects).await;
    }

    let h = Harness::new(&dir, ScriptedBackend::new(vec![]));
    assert_eq!(h.controller.favorites.len(), 1);
    assert_eq!(h.controller.favorites[0].id, "2");
    assert!(h.controller.is_favorite("2"));
    assert!(!h.controller.is_favorite("1"));
}

#[tokio::test]
async fn settings_drive_region_and_links() {
    let dir = TempDir::new().unwrap();
    {
        let mut h = Harness::new(&dir, ScriptedBackend::new(vec![]));
        h.controller.navigate(Screen::Settings);
        let effects = h.controller.update_settings(SettingsPatch {
            default_service: Some(StreamService::Spotify),
            region: Some("Japan".into()),
            ..Default::default()
        });
        h.run(effects).await;
    }

    let mut h = Harness::new(&dir, ScriptedBackend::new(vec![None]));
    assert_eq!(
        h.controller.settings,
        AppSettings {
            default_service: StreamService::Spotify,
            region: "Japan".into(),
            explicit: true,
        }
    );

    let effects = h.controller.start();
    h.run(effects).await;
    assert!(h.service.backend().prompts.lock().unwrap()[0].contains("Region focus: Japan."));

    let song = h.controller.songs[3].clone();
    let effects = h.controller.select_song(&song);
    h.run(effects).await;
    assert_eq!(
        h.opened,
        vec!["https://open.spotify.com/search/Charli%20XCX%20Talk%20Talk".to_string()]
    );
    assert!(!h.controller.overlay_open());
}
