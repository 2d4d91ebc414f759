//! Utility functions

use std::path::Path;

/// Identity hash of a track, derived from its path.
///
/// Used both to decide when lyrics must be recompiled and as the cover
/// cache key.
pub fn track_id(path: &Path) -> u64 {
    xxhash_rust::xxh3::xxh3_64(path.to_string_lossy().as_bytes())
}

/// Format a playback position as `mm:ss`
pub fn format_position(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_id_is_stable() {
        let a = track_id(Path::new("/music/a.mp3"));
        assert_eq!(a, track_id(Path::new("/music/a.mp3")));
        assert_ne!(a, track_id(Path::new("/music/b.mp3")));
    }

    #[test]
    fn test_format_position() {
        assert_eq!(format_position(0.0), "00:00");
        assert_eq!(format_position(61.9), "01:01");
        assert_eq!(format_position(-3.0), "00:00");
    }
}
