//! Per-user directories for the config file, the stores and the log.
//!
//! Unix (macOS included) uses the XDG layout under the home directory so a
//! dotfiles setup finds everything in one place. Windows uses the roaming and
//! local app-data folders.

use std::path::PathBuf;

const APP_DIR: &str = "release-radar";

fn home_or_cwd() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(unix)]
pub fn data_dir() -> PathBuf {
    home_or_cwd().join(".local").join("share").join(APP_DIR)
}

#[cfg(not(unix))]
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir().unwrap_or_else(home_or_cwd).join(APP_DIR)
}

#[cfg(unix)]
pub fn config_dir() -> PathBuf {
    home_or_cwd().join(".config").join(APP_DIR)
}

#[cfg(not(unix))]
pub fn config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(home_or_cwd).join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_are_app_scoped() {
        assert!(data_dir().ends_with(APP_DIR));
        assert!(config_dir().ends_with(APP_DIR));
        assert_ne!(data_dir(), config_dir());
    }
}
