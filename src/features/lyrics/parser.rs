//! Lyrics parsing module
//!
//! Supports two input formats:
//! - LRC: Standard line-level lyrics [mm:ss.xx]text
//! - KRC: Kugou word-level lyrics, base64 + XOR + zlib
//!
//! Both end up as a [`CompiledLyric`]: KRC is decoded to LRC-like text first.

pub mod krc;
pub mod lrc;
mod types;

pub use lrc::{compile, stringify_lrc};
pub use types::*;

/// Detect lyrics format from content
///
/// Decoded KRC bytes start with `krc1`, so base64 text of them always
/// starts with `a3JjM`.
pub fn detect_format(content: &str) -> LyricsFormat {
    if content.trim_start().starts_with("a3JjM") {
        LyricsFormat::Krc
    } else {
        LyricsFormat::Lrc
    }
}

/// Decode (if needed) and compile raw lyrics
pub fn compile_raw(raw: &RawLyric) -> CompiledLyric {
    match raw {
        RawLyric::Lrc(text) => lrc::compile(text),
        RawLyric::Krc(encoded) => compile_krc(krc::decode(encoded)),
        RawLyric::KrcBytes(bytes) => compile_krc(krc::decode_bytes(bytes)),
    }
}

fn compile_krc(text: String) -> CompiledLyric {
    if text.is_empty() {
        tracing::warn!("KRC lyrics decoded to nothing");
    }
    lrc::compile(&text)
}

/// Wrap text of unknown format as raw lyrics
pub fn raw_from_text(content: String) -> RawLyric {
    match detect_format(&content) {
        LyricsFormat::Krc => RawLyric::Krc(content),
        LyricsFormat::Lrc => RawLyric::Lrc(content),
    }
}

/// Parse lyrics from string content with format detection
pub fn parse_lyrics(content: &str) -> CompiledLyric {
    compile_raw(&raw_from_text(content.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    #[test]
    fn test_detect_lrc() {
        let content = "[00:01.12]First line\n[00:05.00]Second line";
        assert_eq!(detect_format(content), LyricsFormat::Lrc);
    }

    #[test]
    fn test_detect_krc() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"krc1\x00\x01\x02");
        assert_eq!(detect_format(&encoded), LyricsFormat::Krc);
    }

    #[test]
    fn test_parse_lrc() {
        let content = "[00:01.12]First line\n[00:05.00]Second line";
        let lyric = parse_lyrics(content);
        assert_eq!(lyric.len(), 2);
        assert_eq!(lyric.iter().next().map(|l| l.text), Some("First line"));
    }

    #[test]
    fn test_compile_bad_krc_is_empty() {
        let lyric = compile_raw(&RawLyric::Krc("garbage".into()));
        assert!(lyric.is_empty());
    }
}
