//! User settings and the fixed choice lists offered by the UI.

use serde::{Deserialize, Serialize};

use crate::links::StreamService;

/// Regions offered by the settings screen. Any other text is accepted too.
pub const REGIONS: [&str; 5] = ["Worldwide", "Germany", "USA", "UK", "Japan"];

/// Genre chips on the browse screen. The first entry means "no filter".
pub const GENRES: [&str; 8] = [
    "All",
    "Pop",
    "Hip Hop",
    "Electronic",
    "Rock",
    "R&B",
    "K-Pop",
    "Latin",
];

pub const ALL_GENRES: &str = GENRES[0];

/// The genre to put in a prompt, if any.
pub fn genre_filter(genre: &str) -> Option<&str> {
    if genre.is_empty() || genre == ALL_GENRES {
        None
    } else {
        Some(genre)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub default_service: StreamService,
    pub region: String,
    /// Stored and shown but not sent anywhere.
    #[serde(default = "default_explicit")]
    pub explicit: bool,
}

fn default_explicit() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_service: StreamService::Ask,
            region: "Germany".to_string(),
            explicit: true,
        }
    }
}

/// A partial update; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub default_service: Option<StreamService>,
    pub region: Option<String>,
    pub explicit: Option<bool>,
}

impl AppSettings {
    /// Merge a patch. Returns true if anything changed.
    pub fn apply(&mut self, patch: SettingsPatch) -> bool {
        let before = self.clone();
        if let Some(service) = patch.default_service {
            self.default_service = service;
        }
        if let Some(region) = patch.region {
            let region = region.trim();
            if !region.is_empty() {
                self.region = region.to_string();
            }
        }
        if let Some(explicit) = patch.explicit {
            self.explicit = explicit;
        }
        *self != before
    }

    /// Next/previous entry of `REGIONS`; a custom region steps to the first.
    pub fn cycle_region(&self, forward: bool) -> String {
        let n = REGIONS.len();
        let next = match REGIONS.iter().position(|r| *r == self.region) {
            Some(i) if forward => (i + 1) % n,
            Some(i) => (i + n - 1) % n,
            None => 0,
        };
        REGIONS[next].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_merges_only_given_fields() {
        let mut s = AppSettings::default();
        let changed = s.apply(SettingsPatch {
            default_service: Some(StreamService::Spotify),
            ..Default::default()
        });
        assert!(changed);
        assert_eq!(s.default_service, StreamService::Spotify);
        assert_eq!(s.region, "Germany");
        assert!(s.explicit);
    }

    #[test]
    fn test_blank_region_ignored() {
        let mut s = AppSettings::default();
        let changed = s.apply(SettingsPatch {
            region: Some("   ".into()),
            ..Default::default()
        });
        assert!(!changed);
        assert_eq!(s.region, "Germany");
    }

    #[test]
    fn test_free_text_region_kept() {
        let mut s = AppSettings::default();
        s.apply(SettingsPatch {
            region: Some(" Brazil ".into()),
            ..Default::default()
        });
        assert_eq!(s.region, "Brazil");
        assert_eq!(s.cycle_region(true), "Worldwide");
    }

    #[test]
    fn test_cycle_region() {
        let s = AppSettings::default();
        assert_eq!(s.cycle_region(true), "USA");
        assert_eq!(s.cycle_region(false), "Worldwide");
        let last = AppSettings {
            region: "Japan".into(),
            ..AppSettings::default()
        };
        assert_eq!(last.cycle_region(true), "Worldwide");
    }

    #[test]
    fn test_genre_filter() {
        assert_eq!(genre_filter("All"), None);
        assert_eq!(genre_filter(""), None);
        assert_eq!(genre_filter("K-Pop"), Some("K-Pop"));
    }
}
