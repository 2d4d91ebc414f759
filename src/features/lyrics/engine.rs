//! Lyrics view engine
//!
//! Decides, once per frame, which line is highlighted and whether the view
//! should scroll. Rendering itself is left to the caller: the engine only
//! hands back per-line styles and an optional scroll command.
//!
//! ## Key Components
//!
//! - `LyricView`: per-frame highlight and scroll decisions
//! - `AutoScroll`: debounced return to the current line after user scrolling

pub mod scroll;

pub use scroll::{AutoScroll, DEFAULT_AUTO_CENTER, ScrollCommand, ScrollReason};

use std::time::Duration;

use super::parser::CompiledLyric;

/// Which line (if any) playback is on
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Highlight {
    /// Before the first timestamp, or no lyrics at all
    #[default]
    Idle,
    /// Playback is within `[time, next.time)` of this line
    Highlighted { index: usize, time: f64 },
}

impl Highlight {
    pub fn index(&self) -> Option<usize> {
        match self {
            Highlight::Idle => None,
            Highlight::Highlighted { index, .. } => Some(*index),
        }
    }
}

/// Render style of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// The line currently being sung
    Highlighted,
    /// Any other line
    Inactive,
}

/// Layout and timing configuration for the lyrics view
///
/// Distances are in logical pixels.
#[derive(Debug, Clone)]
pub struct LyricViewConfig {
    /// Height of one lyric line
    pub line_height: f32,
    /// Height of the visible area
    pub viewport_height: f32,
    /// How long the user's scroll position is respected
    pub auto_center: Duration,
}

impl Default for LyricViewConfig {
    fn default() -> Self {
        Self {
            line_height: 32.0,
            viewport_height: 480.0,
            auto_center: DEFAULT_AUTO_CENTER,
        }
    }
}

/// Per-frame input from the player and the rendering surface
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// Playback position in seconds
    pub position: f64,
    /// Whether playback is running
    pub playing: bool,
    /// Scroll offset the surface currently shows
    pub scroll_offset: f32,
    /// Monotonic frame timestamp
    pub now: Duration,
}

/// What the caller should draw this frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub highlight: Highlight,
    /// One entry per compiled line, in time order
    pub styles: Vec<LineStyle>,
    pub scroll: Option<ScrollCommand>,
}

/// Highlight tracking and auto-scroll for one lyrics view
#[derive(Debug, Clone, Default)]
pub struct LyricView {
    config: LyricViewConfig,
    scroll: AutoScroll,
    highlight: Highlight,
}

impl LyricView {
    pub fn new(config: LyricViewConfig) -> Self {
        let scroll = AutoScroll::new(config.auto_center);
        Self {
            config,
            scroll,
            highlight: Highlight::Idle,
        }
    }

    pub fn config(&self) -> &LyricViewConfig {
        &self.config
    }

    /// Replace the configuration, keeping scroll tracking
    pub fn set_config(&mut self, config: LyricViewConfig) {
        self.scroll.set_grace(config.auto_center);
        self.config = config;
    }

    pub fn set_auto_center(&mut self, grace: Duration) {
        self.config.auto_center = grace;
        self.scroll.set_grace(grace);
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.config.viewport_height = height;
    }

    /// Highlight from the last frame
    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn auto_scroll(&self) -> &AutoScroll {
        &self.scroll
    }

    /// Drop all per-track state (track change or view teardown)
    pub fn reset(&mut self) {
        self.scroll.reset();
        self.highlight = Highlight::Idle;
    }

    /// Find the line playing at `position`
    pub fn find_highlight(lyric: &CompiledLyric, position: f64) -> Highlight {
        match lyric.highlighted(position) {
            Some(line) => Highlight::Highlighted {
                index: line.index,
                time: line.time,
            },
            None => Highlight::Idle,
        }
    }

    /// Scroll offset that puts line `index` in the middle of the view
    pub fn center_offset(&self, index: usize, line_count: usize) -> f32 {
        let line_height = self.config.line_height;
        let content = line_count as f32 * line_height;
        let max = (content - self.config.viewport_height).max(0.0);
        let offset = index as f32 * line_height - (self.config.viewport_height - line_height) / 2.0;
        offset.clamp(0.0, max)
    }

    /// Run one render pass
    pub fn frame(&mut self, lyric: &CompiledLyric, input: &FrameInput) -> FrameOutput {
        let highlight = Self::find_highlight(lyric, input.position);
        if highlight != self.highlight {
            tracing::trace!("Lyric highlight {:?} -> {:?}", self.highlight, highlight);
        }
        self.highlight = highlight;

        let current = highlight.index();
        let styles = (0..lyric.len())
            .map(|i| {
                if Some(i) == current {
                    LineStyle::Highlighted
                } else {
                    LineStyle::Inactive
                }
            })
            .collect();

        // Only a highlighted line drives scrolling
        let scroll = current.and_then(|index| {
            let target = self.center_offset(index, lyric.len());
            self.scroll
                .update(input.scroll_offset, target, input.playing, input.now)
        });

        FrameOutput {
            highlight,
            styles,
            scroll,
        }
    }
}
