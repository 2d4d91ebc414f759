//! Lyrics discovery for local audio files
//!
//! Finds lyrics from sidecar files (LRC, KRC) or embedded metadata.
//! Parsing is left to `features::lyrics`.

use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::ItemKey;
use std::fs;
use std::path::{Path, PathBuf};

use crate::features::lyrics::{RawLyric, raw_from_text};

/// Supported lyrics file extensions, in default lookup order
const LYRICS_EXTENSIONS: &[&str] = &[
    "lrc", // Standard LRC
    "krc", // Kugou KRC
];

/// Find lyrics for an audio file
///
/// Priority:
/// 1. Same-name lyrics file (.lrc, .krc)
/// 2. Embedded lyrics (USLT tag)
pub fn find_lyrics(audio_path: &Path, prefer_krc: bool) -> Option<RawLyric> {
    // Priority 1: Check for same-name lyrics file (any supported format)
    if let Some(lyrics_path) = find_lyrics_file(audio_path, prefer_krc) {
        match read_lyrics_file(&lyrics_path) {
            Ok(raw) => {
                tracing::debug!("Loaded {:?} lyrics from {:?}", raw.format(), lyrics_path);
                return Some(raw);
            }
            Err(e) => tracing::warn!("Failed to read lyrics file {:?}: {}", lyrics_path, e),
        }
    }

    // Priority 2: Check embedded lyrics
    let embedded = extract_embedded_lyrics(audio_path)?;
    tracing::debug!("Loaded embedded lyrics from {:?}", audio_path);
    Some(raw_from_text(embedded))
}

/// Read a sidecar lyrics file. `.krc` files hold the binary blob, anything
/// else is text.
pub fn read_lyrics_file(path: &Path) -> std::io::Result<RawLyric> {
    let is_krc = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("krc"));

    if is_krc {
        let bytes = fs::read(path)?;
        // Some tools store KRC base64-encoded
        if bytes.starts_with(b"krc1") {
            Ok(RawLyric::KrcBytes(bytes))
        } else {
            Ok(RawLyric::Krc(String::from_utf8_lossy(&bytes).into_owned()))
        }
    } else {
        fs::read_to_string(path).map(raw_from_text)
    }
}

/// Find lyrics file with same name as audio file
/// Searches for all supported extensions
fn find_lyrics_file(audio_path: &Path, prefer_krc: bool) -> Option<PathBuf> {
    let parent = audio_path.parent()?;
    let stem = audio_path.file_stem()?.to_str()?;

    let mut extensions = LYRICS_EXTENSIONS.to_vec();
    if prefer_krc {
        extensions.reverse();
    }

    for ext in extensions {
        // Try lowercase extension
        let path = parent.join(format!("{}.{}", stem, ext));
        if path.exists() {
            return Some(path);
        }

        // Try uppercase extension
        let path = parent.join(format!("{}.{}", stem, ext.to_uppercase()));
        if path.exists() {
            return Some(path);
        }
    }

    None
}

/// Extract embedded lyrics from audio file
fn extract_embedded_lyrics(audio_path: &Path) -> Option<String> {
    let tagged_file = Probe::open(audio_path).ok()?.read().ok()?;

    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())?;

    // Try USLT (Unsynchronized Lyrics) first
    if let Some(lyrics) = tag.get_string(&ItemKey::Lyrics) {
        if !lyrics.trim().is_empty() {
            return Some(lyrics.to_string());
        }
    }

    None
}

/// Get lyrics file path for a song (if exists)
pub fn get_lyrics_path(audio_path: &Path, prefer_krc: bool) -> Option<PathBuf> {
    find_lyrics_file(audio_path, prefer_krc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::lyrics::LyricsFormat;

    #[test]
    fn test_lyrics_extensions() {
        assert!(LYRICS_EXTENSIONS.contains(&"lrc"));
        assert!(LYRICS_EXTENSIONS.contains(&"krc"));
    }

    #[test]
    fn test_sidecar_lrc() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("song.mp3");
        std::fs::write(dir.path().join("song.lrc"), "[00:01.00]hi").unwrap();

        let raw = find_lyrics(&audio, false).unwrap();
        assert_eq!(raw, RawLyric::Lrc("[00:01.00]hi".into()));
    }

    #[test]
    fn test_sidecar_preference() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("song.flac");
        std::fs::write(dir.path().join("song.lrc"), "[00:01.00]hi").unwrap();
        std::fs::write(dir.path().join("song.krc"), b"krc1\x00").unwrap();

        assert_eq!(
            find_lyrics(&audio, false).map(|r| r.format()),
            Some(LyricsFormat::Lrc)
        );
        assert_eq!(
            find_lyrics(&audio, true),
            Some(RawLyric::KrcBytes(b"krc1\x00".to_vec()))
        );
    }

    #[test]
    fn test_base64_krc_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.krc");
        std::fs::write(&path, "a3JjMQ==").unwrap();
        assert_eq!(
            read_lyrics_file(&path).unwrap(),
            RawLyric::Krc("a3JjMQ==".into())
        );
    }

    #[test]
    fn test_uppercase_extension() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("Song.flac");
        std::fs::write(dir.path().join("Song.LRC"), "[00:02.00]loud").unwrap();

        assert_eq!(
            get_lyrics_path(&audio, false),
            Some(dir.path().join("Song.LRC"))
        );
        assert_eq!(
            find_lyrics(&audio, false),
            Some(RawLyric::Lrc("[00:02.00]loud".into()))
        );
    }

    #[test]
    fn test_no_lyrics() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("missing.mp3");
        assert!(find_lyrics(&audio, false).is_none());
        assert!(get_lyrics_path(&audio, false).is_none());
    }
}
