//! Application settings persistence
//!
//! Handles saving and loading user preferences.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::lyrics::LyricViewConfig;

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Lyrics view settings
    #[serde(default)]
    pub lyrics: LyricsSettings,
    /// Cover cache settings
    #[serde(default)]
    pub cache: CacheSettings,
}

/// Lyrics view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricsSettings {
    /// How long a manual scroll is respected before the view recenters
    #[serde(default = "default_auto_center_time_ms")]
    pub auto_center_time_ms: u64,
    /// Height of one lyric line in logical pixels
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    /// Look for a `.krc` sidecar before a `.lrc` one
    #[serde(default)]
    pub prefer_krc: bool,
}

fn default_auto_center_time_ms() -> u64 {
    3000
}

fn default_line_height() -> f32 {
    32.0
}

impl Default for LyricsSettings {
    fn default() -> Self {
        Self {
            auto_center_time_ms: default_auto_center_time_ms(),
            line_height: default_line_height(),
            prefer_krc: false,
        }
    }
}

impl LyricsSettings {
    pub fn auto_center(&self) -> Duration {
        Duration::from_millis(self.auto_center_time_ms)
    }

    /// View configuration for a viewport of the given height
    pub fn view_config(&self, viewport_height: f32) -> LyricViewConfig {
        LyricViewConfig {
            line_height: self.line_height,
            viewport_height,
            auto_center: self.auto_center(),
        }
    }
}

/// Cover cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Seconds an unused cover stays cached
    #[serde(default = "default_cover_max_age_secs")]
    pub cover_max_age_secs: u64,
}

fn default_cover_max_age_secs() -> u64 {
    10
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            cover_max_age_secs: default_cover_max_age_secs(),
        }
    }
}

impl CacheSettings {
    pub fn cover_max_age(&self) -> Duration {
        Duration::from_secs(self.cover_max_age_secs)
    }
}

impl Settings {
    /// Get the settings file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "lyricsync", "LyricSync")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return defaults if not found
    pub fn load() -> Self {
        Self::file_path()
            .and_then(|path| match Self::load_from_file(&path) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    tracing::debug!("Using default settings ({:?}): {}", path, e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Save settings to the default file
    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(path) = Self::file_path() {
            self.save_to_file(&path)
        } else {
            Err(SettingsError::Io(
                "Could not determine config directory".to_string(),
            ))
        }
    }

    /// Save settings to a specific file
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| SettingsError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Errors that can occur with settings
#[derive(Debug, Clone)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}
