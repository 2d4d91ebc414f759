//! Lyrics module - parsing and synchronization
//!
//! - `parser`: KRC decoding and LRC compilation
//! - `engine`: highlight tracking and auto-scroll
//! - `session`: per-track compiled lyrics cache

pub mod engine;
pub mod parser;
pub mod session;

// Re-export commonly used items
pub use engine::{
    FrameInput, FrameOutput, Highlight, LineStyle, LyricView, LyricViewConfig, ScrollCommand,
    ScrollReason,
};
pub use parser::*;
pub use session::LyricSession;
