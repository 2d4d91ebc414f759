//! Per-track lyrics session
//!
//! Keeps the compiled lyrics of the active track and its view state. Lyrics
//! are only recompiled when the track identity changes.

use super::engine::{FrameInput, FrameOutput, LyricView, LyricViewConfig};
use super::parser::{CompiledLyric, RawLyric, compile_raw};

#[derive(Debug, Default)]
pub struct LyricSession {
    /// Identity hash of the track the lyrics belong to
    track_id: Option<u64>,
    lyric: CompiledLyric,
    view: LyricView,
}

impl LyricSession {
    pub fn new(config: LyricViewConfig) -> Self {
        Self {
            track_id: None,
            lyric: CompiledLyric::new(),
            view: LyricView::new(config),
        }
    }

    pub fn track_id(&self) -> Option<u64> {
        self.track_id
    }

    pub fn lyric(&self) -> &CompiledLyric {
        &self.lyric
    }

    pub fn view(&self) -> &LyricView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut LyricView {
        &mut self.view
    }

    /// Load lyrics for `track_id`.
    ///
    /// Returns `true` if the lyrics were (re)compiled, `false` if the track
    /// was already loaded and the cached lyrics were kept. A track cleared
    /// without lyrics still accepts a later load.
    pub fn load(&mut self, track_id: u64, raw: &RawLyric) -> bool {
        if self.track_id == Some(track_id) && !self.lyric.is_empty() {
            return false;
        }

        self.lyric = compile_raw(raw);
        self.track_id = Some(track_id);
        self.view.reset();
        tracing::debug!(
            "Loaded {} lyric lines ({:?}) for track {:016x}",
            self.lyric.len(),
            raw.format(),
            track_id
        );
        true
    }

    /// Switch to a track without lyrics
    pub fn clear(&mut self, track_id: Option<u64>) {
        self.track_id = track_id;
        self.lyric = CompiledLyric::new();
        self.view.reset();
    }

    /// Run one render pass on the loaded lyrics
    pub fn frame(&mut self, input: &FrameInput) -> FrameOutput {
        self.view.frame(&self.lyric, input)
    }
}
