//! Application messages

use std::path::PathBuf;
use std::sync::Arc;

use crate::features::Settings;
use crate::features::lyrics::RawLyric;
use crate::features::media::CoverArt;

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // ============ Playback ============
    /// The player switched tracks (`None` = nothing loaded)
    TrackChanged(Option<PathBuf>),
    /// Current playback position in seconds
    PlaybackPosition(f64),
    /// Playback started (`true`) or paused/stopped (`false`)
    PlaybackStateChanged(bool),

    // ============ Background results ============
    /// Lyrics lookup finished for a track
    LyricsLoaded {
        track_id: u64,
        lyrics: Option<RawLyric>,
    },
    /// Cover lookup finished for a track
    CoverLoaded {
        track_id: u64,
        cover: Option<Arc<CoverArt>>,
    },

    // ============ Lyrics view ============
    /// The lyrics surface now shows this scroll offset
    Scrolled(f32),
    /// The lyrics surface changed height
    ViewportResized(f32),

    // ============ Settings ============
    /// Preferences were edited
    SettingsChanged(Settings),
}
