//! Main application module
//!
//! [`App`] owns all state and runs the frame loop: every frame first drains
//! results handed back by worker threads, then renders the lyrics view.

pub mod jobs;
mod message;
mod state;
mod update;

use std::sync::Arc;
use std::time::Instant;

use crate::features::Settings;
use crate::features::lyrics::FrameInput;
use crate::features::lyrics::FrameOutput;
use crate::features::media::CoverArt;
use jobs::{BackgroundTask, JobQueue};

pub use message::Message;
pub use state::{AppState, PlayerState, ViewState};

/// Result of one frame
#[derive(Debug, Clone)]
pub struct AppFrame {
    pub lyrics: FrameOutput,
    /// Cover of the current track, if loaded
    pub cover: Option<Arc<CoverArt>>,
}

#[derive(Debug)]
pub struct App {
    pub state: AppState,
    jobs: JobQueue<Message>,
    tasks: Vec<BackgroundTask>,
    started: Instant,
    /// Timestamp of the frame being processed
    now: Instant,
}

impl App {
    /// Create new application instance
    pub fn new(settings: Settings) -> Self {
        let now = Instant::now();
        Self {
            state: AppState::new(settings),
            jobs: JobQueue::new(),
            tasks: Vec::new(),
            started: now,
            now,
        }
    }

    /// Queue handle for code outside the frame loop (player callbacks etc.)
    pub fn queue(&self) -> JobQueue<Message> {
        self.jobs.clone()
    }

    /// Number of worker threads still running
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Run one frame at `now`
    pub fn frame(&mut self, now: Instant) -> AppFrame {
        self.now = now;
        self.tasks.retain_mut(|task| !task.poll());

        for message in self.jobs.drain() {
            self.update(message);
        }

        // Touch the current cover before evicting so it never ages out while shown
        let cover = self
            .state
            .player
            .track_id
            .and_then(|id| self.state.covers.get(id, now).cloned());
        self.state.covers.evict_expired(now);

        let input = FrameInput {
            position: self.state.player.position,
            playing: self.state.player.playing,
            scroll_offset: self.state.view.scroll_offset,
            now: now.saturating_duration_since(self.started),
        };
        let lyrics = self.state.lyrics.frame(&input);
        if let Some(command) = lyrics.scroll {
            self.state.view.scroll_offset = command.offset;
        }

        AppFrame { lyrics, cover }
    }
}
