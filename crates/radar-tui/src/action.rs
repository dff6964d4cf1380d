//! Intents produced by components and applied by the app.

use radar_core::controller::Screen;
use radar_core::links::StreamService;
use radar_core::settings::SettingsPatch;
use radar_core::song::Song;

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Navigation ───────────────────────────────────────────────────────────
    Navigate(Screen),
    NextScreen,
    PrevScreen,

    // ── Browse ───────────────────────────────────────────────────────────────
    SelectGenre(String),
    Refresh,

    // ── Songs ────────────────────────────────────────────────────────────────
    OpenSong(Song),
    ToggleFavorite(Song),
    ChooseService(StreamService),
    CloseOverlay,

    // ── Settings ─────────────────────────────────────────────────────────────
    UpdateSettings(SettingsPatch),
    BeginEdit,
    EndEdit,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    ToggleKeys,
    CopyToClipboard(String), // text to copy

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
