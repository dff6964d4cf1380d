mod action;
mod app;
mod app_state;
mod component;
mod components;
mod theme;
mod widgets;

use std::sync::Arc;

use radar_core::config::Config;
use radar_core::fetch::ReleaseService;
use radar_core::gemini::GeminiClient;
use radar_core::store::{FavoritesStore, KvStore, SettingsStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config decides where the data dir is, so it is read before logging is up.
    let config_result = Config::load();
    let config = match &config_result {
        Ok(c) => c.clone(),
        Err(_) => Config::default(),
    };

    let data_dir = config.paths.data_dir.clone();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("release-radar.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; keep HTTP client internals quiet by default.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("release-radar log: {}", log_path.display());

    tracing::info!("release-radar starting…");
    if let Err(e) = config_result {
        tracing::warn!(
            "config {} unreadable, using defaults: {}",
            Config::config_path().display(),
            e
        );
    }

    // ── Stores ───────────────────────────────────────────────────────────────
    let kv = KvStore::new(&data_dir);
    let favorites_store = FavoritesStore::new(kv.clone());
    let settings_store = SettingsStore::new(kv);
    let settings = settings_store
        .load()
        .unwrap_or_else(|| config.defaults.to_settings());
    let favorites = favorites_store.load();
    tracing::info!(
        "loaded {} favorites, region={}, service={}",
        favorites.len(),
        settings.region,
        settings.default_service.key()
    );

    // ── Search backend ───────────────────────────────────────────────────────
    let client = GeminiClient::new(&config.backend)?;
    let live_backend = client.has_credential();
    if !live_backend {
        tracing::warn!("no API key found; every fetch will show the sample list");
    }
    let service = Arc::new(ReleaseService::new(client));

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(
        service,
        favorites_store,
        settings_store,
        settings,
        favorites,
        live_backend,
        config.backend.model.clone(),
    );
    app.run().await?;

    tracing::info!("release-radar exiting");
    Ok(())
}
