//! Application state definitions
//!
//! Everything a frame needs is reachable from [`AppState`], which the frame
//! loop owns and lends to each component.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::TimedCache;
use crate::features::Settings;
use crate::features::lyrics::LyricSession;
use crate::features::media::CoverArt;

/// Main application state
#[derive(Debug)]
pub struct AppState {
    /// User preferences
    pub settings: Settings,
    /// Playback as reported by the audio side
    pub player: PlayerState,
    /// Lyrics of the current track and their view state
    pub lyrics: LyricSession,
    /// Lyrics surface geometry and scroll position
    pub view: ViewState,
    /// Covers keyed by track id
    pub covers: TimedCache<Arc<CoverArt>>,
}

/// Playback state
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    pub track: Option<PathBuf>,
    pub track_id: Option<u64>,
    /// Position in seconds
    pub position: f64,
    pub playing: bool,
}

/// Lyrics surface state
#[derive(Debug, Clone)]
pub struct ViewState {
    pub viewport_height: f32,
    /// Offset the surface currently shows
    pub scroll_offset: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            viewport_height: 480.0,
            scroll_offset: 0.0,
        }
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let view = ViewState::default();
        let lyrics = LyricSession::new(settings.lyrics.view_config(view.viewport_height));
        let covers = TimedCache::new(settings.cache.cover_max_age());
        Self {
            settings,
            player: PlayerState::default(),
            lyrics,
            view,
            covers,
        }
    }
}
