//! Auto-centering for the lyrics view
//!
//! Lets the user scroll the lyrics freely and only pulls the view back to the
//! current line once the scroll offset has stayed put for a grace period.
//! Any further movement restarts the countdown.

use std::time::Duration;

/// Default grace period before the view is pulled back
pub const DEFAULT_AUTO_CENTER: Duration = Duration::from_millis(3000);

/// Why a scroll command was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollReason {
    /// Nobody touched the view since the last command; keep following
    Follow,
    /// The user scrolled away and left it alone for the grace period
    Recenter,
}

/// Request to move the view to `offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub offset: f32,
    pub reason: ScrollReason,
}

/// Debounced auto-scroll state
#[derive(Debug, Clone)]
pub struct AutoScroll {
    /// Grace period after the last user movement
    grace: Duration,
    /// Offset this component last asked for
    last_set: f32,
    /// Offset seen on the previous frame while deviating
    last_observed: f32,
    /// When the current deviation was first seen (or last moved)
    deviation_since: Option<Duration>,
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_CENTER)
    }
}

impl AutoScroll {
    pub fn new(grace: Duration) -> Self {
        Self {
            grace,
            last_set: 0.0,
            last_observed: 0.0,
            deviation_since: None,
        }
    }

    pub fn grace(&self) -> Duration {
        self.grace
    }

    pub fn set_grace(&mut self, grace: Duration) {
        self.grace = grace;
    }

    /// Offset last requested by [`AutoScroll::update`]
    pub fn last_set(&self) -> f32 {
        self.last_set
    }

    /// Whether a user deviation is currently being tracked
    pub fn is_deviating(&self) -> bool {
        self.deviation_since.is_some()
    }

    /// Forget all tracking, as if the view was just created
    pub fn reset(&mut self) {
        self.last_set = 0.0;
        self.last_observed = 0.0;
        self.deviation_since = None;
    }

    fn snap(&mut self, target: f32, reason: ScrollReason) -> ScrollCommand {
        self.last_set = target;
        self.last_observed = target;
        self.deviation_since = None;
        ScrollCommand {
            offset: target,
            reason,
        }
    }

    /// Run one frame of the state machine.
    ///
    /// `observed` is the view's current scroll offset, `target` the offset
    /// that centers the highlighted line, `now` a monotonic timestamp.
    pub fn update(
        &mut self,
        observed: f32,
        target: f32,
        playing: bool,
        now: Duration,
    ) -> Option<ScrollCommand> {
        if observed == self.last_set {
            return Some(self.snap(target, ScrollReason::Follow));
        }

        if !playing {
            return None;
        }

        match self.deviation_since {
            Some(since) if observed == self.last_observed => {
                if now.saturating_sub(since) >= self.grace {
                    tracing::debug!(
                        "Lyrics view idle for {:?}, recentering to {}",
                        self.grace,
                        target
                    );
                    Some(self.snap(target, ScrollReason::Recenter))
                } else {
                    None
                }
            }
            _ => {
                self.last_observed = observed;
                self.deviation_since = Some(now);
                None
            }
        }
    }
}
