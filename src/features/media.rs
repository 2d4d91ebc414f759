//! Media file discovery
//!
//! Handles finding cover art and lyrics for a track:
//! 1. External files (same-name .lrc/.krc, cover.jpg, folder.jpg, etc.)
//! 2. Embedded metadata (ID3/FLAC tags), read only

pub mod cover;
pub mod lyrics;

pub use cover::{CoverArt, load_cover};
pub use lyrics::find_lyrics;
