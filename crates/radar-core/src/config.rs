use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;
use crate::links::StreamService;
use crate::settings::AppSettings;

/// Environment variables checked for the backend credential, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Used only when none of `API_KEY_VARS` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Seeds the in-app settings on first run, before anything was persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub default_service: StreamService,
    #[serde(default = "default_explicit")]
    pub explicit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Where favorites, settings and the log live.
    #[serde(default = "platform::data_dir")]
    pub data_dir: PathBuf,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            default_service: StreamService::default(),
            explicit: default_explicit(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: platform::data_dir(),
        }
    }
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_region() -> String {
    "Germany".to_string()
}

fn default_explicit() -> bool {
    true
}

impl BackendConfig {
    /// Environment first, then the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        API_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .chain(self.api_key.clone())
            .map(|k| k.trim().to_string())
            .find(|k| !k.is_empty())
    }
}

impl DefaultsConfig {
    pub fn to_settings(&self) -> AppSettings {
        AppSettings {
            default_service: self.default_service,
            region: self.region.clone(),
            explicit: self.explicit,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend.model, "gemini-2.5-flash");
        assert!(config.backend.endpoint.starts_with("https://"));
        assert_eq!(config.backend.timeout_secs, 60);
        assert_eq!(config.defaults.region, "Germany");
        assert_eq!(config.defaults.default_service, StreamService::Ask);
        assert!(config.paths.data_dir.ends_with("release-radar"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            "[backend]\nmodel = \"gemini-2.0-flash\"\n\n[defaults]\ndefault_service = \"spotify\"\n",
        )
        .unwrap();
        assert_eq!(config.backend.model, "gemini-2.0-flash");
        assert_eq!(config.backend.timeout_secs, 60);
        assert_eq!(config.defaults.default_service, StreamService::Spotify);
        assert_eq!(config.defaults.region, "Germany");
    }

    #[test]
    fn test_defaults_seed_settings() {
        let settings = DefaultsConfig::default().to_settings();
        assert_eq!(settings, AppSettings::default());
    }
}
