//! Read-only state handed to components while drawing and handling input.
//!
//! Components read this but never mutate it. The App event-loop is the only
//! thing that writes to AppState, and it does so through the controller.

use radar_core::controller::Controller;
use radar_core::fetch::BatchSource;
use radar_core::links::StreamService;
use radar_core::song::Song;

use crate::widgets::status_bar::InputMode;

pub struct AppState {
    pub view: Controller,
    /// Origin of the list currently shown; `None` until the first fetch lands.
    pub source: Option<BatchSource>,
    pub input_mode: InputMode,
    /// Whether an API key was found at startup.
    pub live_backend: bool,
    pub model: String,
}

impl AppState {
    pub fn new(view: Controller, live_backend: bool, model: String) -> Self {
        Self {
            view,
            source: None,
            input_mode: InputMode::Normal,
            live_backend,
            model,
        }
    }

    /// Label for the settings screen's data-source row.
    pub fn data_source_label(&self) -> String {
        if self.live_backend {
            format!("Gemini ({}) + Google Search", self.model)
        } else {
            "sample data (no API key)".to_string()
        }
    }

    /// Link copied by `y`: the default service, or Spotify when set to ask.
    pub fn share_link(&self, song: &Song) -> Option<String> {
        self.view
            .settings
            .default_service
            .deep_link(song)
            .or_else(|| StreamService::Spotify.deep_link(song))
    }
}
