//! Synchronized lyrics for a music player
//!
//! Decodes KRC blobs, compiles LRC text into a time-indexed map and drives a
//! lyrics view that highlights the current line and recenters itself after
//! the user scrolls away.

pub mod app;
pub mod cache;
pub mod features;
pub mod utils;
