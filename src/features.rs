//! Feature modules - business logic separated from the frame loop
//!
//! Each feature module contains the core logic for a specific functionality.

pub mod lyrics;
pub mod media;
pub mod settings;

pub use settings::Settings;
