//! Event loop: terminal input and fetch results in, controller effects out.
//!
//! - `App` owns all components and `AppState` (read-only for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from the terminal
//!   reader and from fetch tasks.
//! - Components return `Vec<Action>`; App dispatches each Action into the
//!   controller and carries out the `Effect`s it returns.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use radar_core::controller::{Controller, Effect, FetchRequest, Screen};
use radar_core::fetch::{ReleaseBatch, ReleaseService};
use radar_core::gemini::SearchBackend;
use radar_core::settings::AppSettings;
use radar_core::song::Song;
use radar_core::store::{FavoritesStore, SettingsStore};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::{
        favorites_list::FavoritesList, header::Header, help_overlay::HelpOverlay,
        release_list::ReleaseList, settings_panel::SettingsPanel, stream_overlay::StreamOverlay,
    },
    theme::C_BG,
    widgets::{
        status_bar::{self, InputMode},
        toast::{Severity, ToastManager},
    },
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    FetchCompleted { seq: u64, batch: ReleaseBatch },
}

pub struct App<B> {
    state: AppState,
    service: Arc<ReleaseService<B>>,
    favorites_store: FavoritesStore,
    settings_store: SettingsStore,

    header: Header,
    release_list: ReleaseList,
    favorites_list: FavoritesList,
    settings_panel: SettingsPanel,
    stream_overlay: StreamOverlay,
    help_overlay: HelpOverlay,
    toast: ToastManager,

    show_keys_bar: bool,
    body_area: Rect,
    msg_tx: Option<mpsc::Sender<AppMessage>>,
    should_quit: bool,
}

impl<B> App<B>
where
    B: SearchBackend + Send + Sync + 'static,
{
    pub fn new(
        service: Arc<ReleaseService<B>>,
        favorites_store: FavoritesStore,
        settings_store: SettingsStore,
        settings: AppSettings,
        favorites: Vec<Song>,
        live_backend: bool,
        model: String,
    ) -> Self {
        let state = AppState::new(Controller::new(settings, favorites), live_backend, model);
        let mut favorites_list = FavoritesList::new();
        favorites_list.sync(&state);
        Self {
            state,
            service,
            favorites_store,
            settings_store,
            header: Header::new(),
            release_list: ReleaseList::new(),
            favorites_list,
            settings_panel: SettingsPanel::new(),
            stream_overlay: StreamOverlay::new(),
            help_overlay: HelpOverlay::new(),
            toast: ToastManager::new(),
            show_keys_bar: true,
            body_area: Rect::default(),
            msg_tx: None,
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        self.msg_tx = Some(tx.clone());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Initial search ────────────────────────────────────────────────────
        let effects = self.state.view.start();
        self.run_effects(effects);

        // Toast expiry + spinner animation
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    let mut redraw = self.handle_message(msg);
                    while let Ok(next) = rx.try_recv() {
                        redraw |= self.handle_message(next);
                    }
                    needs_redraw = redraw;
                }

                _ = ui_tick.tick() => {
                    // one more frame after the last toast expires, to erase it
                    let had_toasts = !self.toast.is_empty();
                    self.toast.tick();
                    self.header.tick(&self.state);
                    needs_redraw = had_toasts || self.state.view.loading;
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Returns true when the screen needs a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                let actions = self.handle_key(key);
                for action in actions {
                    self.dispatch(action);
                }
                true
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                let actions = self.handle_mouse(mouse);
                for action in actions {
                    self.dispatch(action);
                }
                true
            }
            AppMessage::Event(Event::Resize(..)) => true,
            AppMessage::Event(_) => false,
            AppMessage::FetchCompleted { seq, batch } => self.on_fetch_completed(seq, batch),
        }
    }

    fn on_fetch_completed(&mut self, seq: u64, batch: ReleaseBatch) -> bool {
        let count = batch.songs.len();
        let fallback = batch.is_fallback();
        if !self.state.view.apply_fetch(seq, batch.songs) {
            return false;
        }
        self.state.source = Some(batch.source);
        self.release_list.sync(&self.state);

        if fallback {
            self.toast
                .resolve_spinner(Severity::Warning, "live search unavailable, showing samples");
        } else if count == 0 {
            self.toast.resolve_spinner(Severity::Info, "no new releases found");
        } else {
            self.toast
                .resolve_spinner(Severity::Success, format!("{} new releases", count));
        }
        true
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // Modal input owns the keyboard
        match self.state.input_mode {
            InputMode::Edit => return self.settings_panel.handle_key(key, &self.state),
            InputMode::Choose => return self.stream_overlay.handle_key(key, &self.state),
            InputMode::Normal => {}
        }
        if self.help_overlay.visible {
            return self.help_overlay.handle_key(key, &self.state);
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::Char('K') => return vec![Action::ToggleKeys],
            KeyCode::Tab => return vec![Action::NextScreen],
            KeyCode::BackTab => return vec![Action::PrevScreen],
            KeyCode::Char('1') => return vec![Action::Navigate(Screen::Home)],
            KeyCode::Char('2') => return vec![Action::Navigate(Screen::Favorites)],
            KeyCode::Char('3') => return vec![Action::Navigate(Screen::Settings)],
            _ => {}
        }

        match self.state.view.screen {
            Screen::Home => self.release_list.handle_key(key, &self.state),
            Screen::Favorites => self.favorites_list.handle_key(key, &self.state),
            Screen::Settings => self.settings_panel.handle_key(key, &self.state),
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        if self.state.input_mode != InputMode::Normal || self.help_overlay.visible {
            return vec![];
        }
        let area = self.body_area;
        match self.state.view.screen {
            Screen::Home => self.release_list.handle_mouse(event, area, &self.state),
            Screen::Favorites => self.favorites_list.handle_mouse(event, area, &self.state),
            Screen::Settings => self.settings_panel.handle_mouse(event, area, &self.state),
        }
    }

    fn dispatch(&mut self, action: Action) {
        {
            let s = &self.state;
            self.release_list.on_action(&action, s);
            self.stream_overlay.on_action(&action, s);
            self.help_overlay.on_action(&action, s);
        }
        self.apply_action(action);
        self.sync_input_mode();
    }

    fn apply_action(&mut self, action: Action) {
        debug!("apply_action: {:?}", action);
        let effects = match action {
            // ── Navigation ────────────────────────────────────────────────────
            Action::Navigate(screen) => self.navigate(screen),
            Action::NextScreen => self.step_screen(true),
            Action::PrevScreen => self.step_screen(false),

            // ── Browse ────────────────────────────────────────────────────────
            Action::SelectGenre(genre) => self.state.view.select_genre(&genre),
            Action::Refresh => self.state.view.refresh(),

            // ── Songs ─────────────────────────────────────────────────────────
            Action::OpenSong(song) => self.state.view.select_song(&song),
            Action::ToggleFavorite(song) => {
                let was_favorite = self.state.view.is_favorite(&song.id);
                let effects = self.state.view.toggle_favorite(&song);
                if was_favorite {
                    self.toast.info(format!("removed from favorites: {}", song.display()));
                } else {
                    self.toast.success(format!("added to favorites: {}", song.display()));
                }
                self.favorites_list.sync(&self.state);
                effects
            }
            Action::ChooseService(service) => self.state.view.choose_service(service),
            Action::CloseOverlay => self.state.view.close_overlay(),

            // ── Settings ──────────────────────────────────────────────────────
            Action::UpdateSettings(patch) => {
                let region_changed = patch
                    .region
                    .as_deref()
                    .is_some_and(|r| r.trim() != self.state.view.settings.region);
                let effects = self.state.view.update_settings(patch);
                if region_changed && !effects.is_empty() {
                    self.toast.info(format!(
                        "region: {} (press r on releases to search)",
                        self.state.view.settings.region
                    ));
                }
                effects
            }
            // input mode follows the panel; see sync_input_mode
            Action::BeginEdit | Action::EndEdit => Vec::new(),

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleHelp => Vec::new(),
            Action::ToggleKeys => {
                self.show_keys_bar = !self.show_keys_bar;
                Vec::new()
            }
            Action::CopyToClipboard(text) => {
                self.copy_to_clipboard(&text);
                Vec::new()
            }

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => {
                info!("quit requested");
                self.should_quit = true;
                Vec::new()
            }
        };
        self.run_effects(effects);
    }

    fn navigate(&mut self, screen: Screen) -> Vec<Effect> {
        if screen == Screen::Favorites {
            self.favorites_list.sync(&self.state);
        }
        self.state.view.navigate(screen)
    }

    fn step_screen(&mut self, forward: bool) -> Vec<Effect> {
        let n = Screen::ALL.len();
        let cur = Screen::ALL
            .iter()
            .position(|s| *s == self.state.view.screen)
            .unwrap_or(0);
        let next = if forward { (cur + 1) % n } else { (cur + n - 1) % n };
        self.navigate(Screen::ALL[next])
    }

    fn sync_input_mode(&mut self) {
        self.state.input_mode = if self.settings_panel.is_editing() {
            InputMode::Edit
        } else if self.state.view.overlay_open() {
            InputMode::Choose
        } else {
            InputMode::Normal
        };
    }

    // ── Effects ───────────────────────────────────────────────────────────────

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch(req) => {
                    self.toast.spinner("searching new releases…");
                    self.spawn_fetch(req);
                }
                Effect::SaveFavorites(songs) => {
                    if let Err(e) = self.favorites_store.save(&songs) {
                        error!("saving favorites: {}", e);
                        self.toast.error(format!("could not save favorites: {}", e));
                    }
                }
                Effect::SaveSettings(settings) => {
                    if let Err(e) = self.settings_store.save(&settings) {
                        error!("saving settings: {}", e);
                        self.toast.error(format!("could not save settings: {}", e));
                    }
                }
                Effect::OpenUrl(url) => self.open_url(&url),
            }
        }
    }

    fn spawn_fetch(&self, req: FetchRequest) {
        let Some(tx) = self.msg_tx.clone() else {
            warn!("no event channel; fetch #{} not started", req.seq);
            return;
        };
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let batch = service.fetch(&req.region, req.genre.as_deref()).await;
            if tx
                .send(AppMessage::FetchCompleted {
                    seq: req.seq,
                    batch,
                })
                .await
                .is_err()
            {
                debug!("fetch #{} finished after shutdown", req.seq);
            }
        });
    }

    fn open_url(&mut self, url: &str) {
        info!("opening {}", url);
        match open::that(url) {
            Ok(()) => self.toast.success("opened in browser"),
            Err(e) => {
                warn!("open {} failed: {}", url, e);
                self.toast.error(format!("could not open link: {}", e));
            }
        }
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_string())) {
            Ok(()) => {
                let display = if text.chars().count() > 40 {
                    format!("{}…", text.chars().take(40).collect::<String>())
                } else {
                    text.to_string()
                };
                self.toast.success(format!("copied: {}", display));
            }
            Err(e) => {
                warn!("clipboard: {}", e);
                self.toast.error(format!("clipboard unavailable: {}", e));
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let status_h = if self.show_keys_bar { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(status_h),
            ])
            .split(area);
        let (header_area, body_area, status_area) = (outer[0], outer[1], outer[2]);

        self.header.draw(frame, header_area, false, &self.state);

        self.body_area = body_area;
        let focused = self.state.input_mode != InputMode::Choose && !self.help_overlay.visible;
        match self.state.view.screen {
            Screen::Home => self.release_list.draw(frame, body_area, focused, &self.state),
            Screen::Favorites => self.favorites_list.draw(frame, body_area, focused, &self.state),
            Screen::Settings => self.settings_panel.draw(frame, body_area, focused, &self.state),
        }

        if self.show_keys_bar {
            status_bar::draw_keys_bar(
                frame,
                status_area,
                self.state.input_mode,
                self.state.view.screen,
            );
        }

        // ── Overlays (on top of everything) ──────────────────────────────────
        self.stream_overlay.draw(frame, area, true, &self.state);
        self.help_overlay.draw(frame, area, false, &self.state);

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_core::fetch::BatchSource;
    use radar_core::gemini::BackendError;
    use radar_core::song::fallback_songs;
    use radar_core::store::KvStore;
    use tempfile::TempDir;

    struct OfflineBackend;

    impl SearchBackend for OfflineBackend {
        async fn generate(&self, _prompt: &str) -> Result<String, BackendError> {
            Err(BackendError::MissingCredential)
        }
    }

    fn app(dir: &TempDir) -> App<OfflineBackend> {
        let kv = KvStore::new(dir.path());
        App::new(
            Arc::new(ReleaseService::new(OfflineBackend)),
            FavoritesStore::new(kv.clone()),
            SettingsStore::new(kv),
            AppSettings::default(),
            Vec::new(),
            false,
            "test".into(),
        )
    }

    fn key(app: &mut App<OfflineBackend>, code: KeyCode) {
        let msg = AppMessage::Event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        app.handle_message(msg);
    }

    fn sample_batch() -> ReleaseBatch {
        ReleaseBatch {
            songs: fallback_songs(),
            source: BatchSource::Fallback("offline".into()),
            generated_at: 0,
        }
    }

    /// Issue the initial fetch and deliver its result.
    fn loaded(dir: &TempDir) -> App<OfflineBackend> {
        let mut app = app(dir);
        let effects = app.state.view.start();
        app.run_effects(effects);
        let seq = app.state.view.latest_seq();
        assert!(app.handle_message(AppMessage::FetchCompleted {
            seq,
            batch: sample_batch(),
        }));
        app
    }

    #[test]
    fn test_quit_keys() {
        let dir = TempDir::new().unwrap();
        let mut a = app(&dir);
        key(&mut a, KeyCode::Char('q'));
        assert!(a.should_quit);

        let mut a = app(&dir);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(a.handle_key(ctrl_c), vec![Action::Quit]);
    }

    #[test]
    fn test_screen_keys() {
        let dir = TempDir::new().unwrap();
        let mut a = app(&dir);
        key(&mut a, KeyCode::Char('3'));
        assert_eq!(a.state.view.screen, Screen::Settings);
        key(&mut a, KeyCode::Tab);
        assert_eq!(a.state.view.screen, Screen::Home);
        key(&mut a, KeyCode::BackTab);
        assert_eq!(a.state.view.screen, Screen::Settings);
    }

    #[test]
    fn test_fetch_result_fills_list() {
        let dir = TempDir::new().unwrap();
        let a = loaded(&dir);
        assert!(!a.state.view.loading);
        assert_eq!(a.state.view.songs.len(), 5);
        assert!(matches!(a.state.source, Some(BatchSource::Fallback(_))));
        assert!(!a.toast.has_spinner());
    }

    #[test]
    fn test_stale_result_ignored() {
        let dir = TempDir::new().unwrap();
        let mut a = app(&dir);
        let effects = a.state.view.start();
        a.run_effects(effects);
        // switching genre supersedes the first request
        key(&mut a, KeyCode::Right);
        assert_eq!(a.state.view.genre, "Pop");
        assert!(!a.handle_message(AppMessage::FetchCompleted {
            seq: 1,
            batch: sample_batch(),
        }));
        assert!(a.state.view.songs.is_empty());
        assert!(a.state.view.loading);
    }

    #[test]
    fn test_favorite_key_persists() {
        let dir = TempDir::new().unwrap();
        let mut a = loaded(&dir);
        key(&mut a, KeyCode::Down);
        key(&mut a, KeyCode::Char('f'));
        assert!(a.state.view.is_favorite("2"));

        let stored = FavoritesStore::new(KvStore::new(dir.path())).load();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "2");

        // removing from the favorites screen
        key(&mut a, KeyCode::Char('2'));
        key(&mut a, KeyCode::Char('f'));
        assert!(a.state.view.favorites.is_empty());
        assert!(FavoritesStore::new(KvStore::new(dir.path())).load().is_empty());
    }

    #[test]
    fn test_ask_opens_chooser_and_captures_keys() {
        let dir = TempDir::new().unwrap();
        let mut a = loaded(&dir);
        key(&mut a, KeyCode::Enter);
        assert!(a.state.view.overlay_open());
        assert_eq!(a.state.input_mode, InputMode::Choose);

        // q closes the chooser instead of quitting
        key(&mut a, KeyCode::Char('q'));
        assert!(!a.should_quit);
        assert!(!a.state.view.overlay_open());
        assert_eq!(a.state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_region_edit_mode() {
        let dir = TempDir::new().unwrap();
        let mut a = app(&dir);
        key(&mut a, KeyCode::Char('3'));
        key(&mut a, KeyCode::Down);
        key(&mut a, KeyCode::Enter);
        assert_eq!(a.state.input_mode, InputMode::Edit);

        for _ in 0.."Germany".len() {
            key(&mut a, KeyCode::Backspace);
        }
        // global keys are plain text while editing
        for c in "q2".chars() {
            key(&mut a, KeyCode::Char(c));
        }
        assert!(!a.should_quit);
        assert_eq!(a.state.view.screen, Screen::Settings);

        key(&mut a, KeyCode::Enter);
        assert_eq!(a.state.input_mode, InputMode::Normal);
        assert_eq!(a.state.view.settings.region, "q2");
        let stored = SettingsStore::new(KvStore::new(dir.path())).load();
        assert_eq!(stored.map(|s| s.region), Some("q2".to_string()));
    }

    #[test]
    fn test_help_swallows_keys() {
        let dir = TempDir::new().unwrap();
        let mut a = app(&dir);
        key(&mut a, KeyCode::Char('?'));
        assert!(a.help_overlay.visible);
        key(&mut a, KeyCode::Char('2'));
        assert_eq!(a.state.view.screen, Screen::Home);
        key(&mut a, KeyCode::Esc);
        assert!(!a.help_overlay.visible);
    }
}
