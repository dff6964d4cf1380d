//! View controller: the whole UI state in one container.
//!
//! Every operation is a plain state transition that returns the effects the
//! runtime must carry out. Nothing in here does I/O.
//!
//! Fetches are stamped with a monotonically increasing sequence number. A
//! result is applied only if its stamp matches the most recent request; an
//! older response arriving late is dropped.

use tracing::{debug, info};

use crate::links::StreamService;
use crate::settings::{genre_filter, AppSettings, SettingsPatch, ALL_GENRES};
use crate::song::Song;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Favorites,
    Settings,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Home, Screen::Favorites, Screen::Settings];

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Favorites => "favorites",
            Self::Settings => "settings",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub region: String,
    pub genre: Option<String>,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(FetchRequest),
    SaveFavorites(Vec<Song>),
    SaveSettings(AppSettings),
    OpenUrl(String),
}

#[derive(Debug, Clone)]
pub struct Controller {
    pub screen: Screen,
    pub genre: String,
    pub loading: bool,
    /// Song whose service chooser is open.
    pub selected_song: Option<Song>,
    pub songs: Vec<Song>,
    pub favorites: Vec<Song>,
    pub settings: AppSettings,
    latest_seq: u64,
}

impl Controller {
    pub fn new(settings: AppSettings, favorites: Vec<Song>) -> Self {
        Self {
            screen: Screen::Home,
            genre: ALL_GENRES.to_string(),
            loading: false,
            selected_song: None,
            songs: Vec::new(),
            favorites,
            settings,
            latest_seq: 0,
        }
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f.id == id)
    }

    pub fn overlay_open(&self) -> bool {
        self.selected_song.is_some()
    }

    // ── Navigation ────────────────────────────────────────────────────────────

    pub fn navigate(&mut self, screen: Screen) -> Vec<Effect> {
        self.screen = screen;
        Vec::new()
    }

    // ── Fetching ──────────────────────────────────────────────────────────────

    /// Initial load.
    pub fn start(&mut self) -> Vec<Effect> {
        vec![self.begin_fetch()]
    }

    pub fn select_genre(&mut self, genre: &str) -> Vec<Effect> {
        self.genre = genre.to_string();
        vec![self.begin_fetch()]
    }

    pub fn refresh(&mut self) -> Vec<Effect> {
        vec![self.begin_fetch()]
    }

    /// Clears the list so the UI shows the loading state, not stale rows.
    fn begin_fetch(&mut self) -> Effect {
        self.latest_seq += 1;
        self.songs.clear();
        self.loading = true;
        let request = FetchRequest {
            seq: self.latest_seq,
            region: self.settings.region.clone(),
            genre: genre_filter(&self.genre).map(str::to_string),
        };
        debug!("[controller] fetch #{} {:?}", request.seq, request.genre);
        Effect::Fetch(request)
    }

    /// Returns false when the result belongs to a superseded request.
    pub fn apply_fetch(&mut self, seq: u64, songs: Vec<Song>) -> bool {
        if seq != self.latest_seq {
            info!(
                "[controller] dropping stale fetch #{} (latest #{})",
                seq, self.latest_seq
            );
            return false;
        }
        self.songs = songs;
        self.loading = false;
        true
    }

    // ── Favorites ─────────────────────────────────────────────────────────────

    pub fn toggle_favorite(&mut self, song: &Song) -> Vec<Effect> {
        if self.is_favorite(&song.id) {
            self.favorites.retain(|f| f.id != song.id);
        } else {
            self.favorites.push(song.clone());
        }
        vec![Effect::SaveFavorites(self.favorites.clone())]
    }

    // ── Opening songs ─────────────────────────────────────────────────────────

    pub fn select_song(&mut self, song: &Song) -> Vec<Effect> {
        match self.settings.default_service.deep_link(song) {
            Some(url) => vec![Effect::OpenUrl(url)],
            None => {
                self.selected_song = Some(song.clone());
                Vec::new()
            }
        }
    }

    /// Pick a service in the chooser. Closes the chooser.
    pub fn choose_service(&mut self, service: StreamService) -> Vec<Effect> {
        let Some(song) = self.selected_song.take() else {
            return Vec::new();
        };
        service
            .deep_link(&song)
            .map(Effect::OpenUrl)
            .into_iter()
            .collect()
    }

    pub fn close_overlay(&mut self) -> Vec<Effect> {
        self.selected_song = None;
        Vec::new()
    }

    // ── Settings ──────────────────────────────────────────────────────────────

    pub fn update_settings(&mut self, patch: SettingsPatch) -> Vec<Effect> {
        if self.settings.apply(patch) {
            vec![Effect::SaveSettings(self.settings.clone())]
        } else {
            Vec::new()
        }
    }
}
