//! LRC compiler
//!
//! Turns LRC-style text into a [`CompiledLyric`]. Each line may start with a
//! `[mm:ss.xx]` tag; lines without one land at time 0.

use super::types::CompiledLyric;

/// Bracketed digit groups `dd:dd?dd` or `dd:dd.ddd`, checked by position.
///
/// `[mm:ss.xx]` and `[mm:ss.xxx]` carry a fractional second. `[hh:mm:ss]`
/// (a colon in the separator slot) is what the KRC decoder emits.
fn parse_tag(src: &[u8], open: u8, close: u8) -> Option<(usize, f64)> {
    let digit = |i: usize| src.get(i).filter(|b| b.is_ascii_digit()).map(|b| (b - b'0') as u32);
    let pair = |i: usize| Some(digit(i)? * 10 + digit(i + 1)?);

    if src.first() != Some(&open) || src.get(3) != Some(&b':') {
        return None;
    }
    let a = pair(1)?;
    let b = pair(4)?;
    let sep = *src.get(6)?;
    let c = pair(7)?;

    match (sep, src.get(9)) {
        // [hh:mm:ss]
        (b':', Some(&end)) if end == close => {
            Some((10, (a * 3600 + b * 60 + c) as f64))
        }
        // [mm:ss.xx], hundredths
        (b'.', Some(&end)) if end == close => {
            Some((10, (a * 60 + b) as f64 + c as f64 / 100.0))
        }
        // [mm:ss.xxx]
        (b'.', Some(_)) => {
            let ms = c * 10 + digit(9)?;
            if src.get(10) != Some(&close) {
                return None;
            }
            Some((11, (a * 60 + b) as f64 + ms as f64 / 1000.0))
        }
        _ => None,
    }
}

/// Parse the leading `[mm:ss.xxx]` tag of a line.
///
/// Returns the byte length of the tag and the time in seconds.
pub fn parse_time(line: &str) -> Option<(usize, f64)> {
    parse_tag(line.as_bytes(), b'[', b']')
}

/// Remove inline `<mm:ss.xx>` word tags. A `<` that does not open a
/// well-formed tag is kept.
pub fn strip_word_tags(sentence: &str) -> String {
    let bytes = sentence.as_bytes();
    let mut result = String::with_capacity(sentence.len());
    let mut pos = 0;

    while let Some(offset) = sentence[pos..].find('<') {
        let start = pos + offset;
        result.push_str(&sentence[pos..start]);
        match parse_tag(&bytes[start..], b'<', b'>') {
            Some((consumed, _)) => pos = start + consumed,
            None => {
                result.push('<');
                pos = start + 1;
            }
        }
    }
    result.push_str(&sentence[pos..]);

    result
}

/// Compile a single trimmed line into `(time, sentence)`
fn compile_line(line: &str) -> (f64, String) {
    match parse_time(line) {
        Some((consumed, time)) => (time, strip_word_tags(&line[consumed..])),
        None => (0.0, strip_word_tags(line)),
    }
}

/// Compile LRC text into an ordered time -> sentence map.
///
/// Empty lines are skipped. Lines that share a time overwrite each other.
pub fn compile(text: &str) -> CompiledLyric {
    let mut lyric = CompiledLyric::new();

    for line in text.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        let (time, sentence) = compile_line(line);
        lyric.insert(time, sentence);
    }

    tracing::debug!("Compiled {} lyric lines", lyric.len());
    lyric
}

/// Write timestamp in LRC format
pub fn write_timestamp(result: &mut String, seconds: f64) {
    use std::fmt::Write;
    let time = (seconds * 1000.0).round().max(0.0) as u64;
    let ms = time % 1000;
    let sec = (time / 1000) % 60;
    let min = time / 60000;
    let _ = write!(result, "[{:02}:{:02}.{:03}]", min, sec, ms);
}

/// Convert compiled lyrics back to LRC text
pub fn stringify_lrc(lyric: &CompiledLyric) -> String {
    let capacity: usize = lyric.iter().map(|l| l.text.len() + 12).sum();
    let mut result = String::with_capacity(capacity);

    for line in lyric.iter() {
        write_timestamp(&mut result, line.time);
        result.push_str(line.text);
        result.push('\n');
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_parse_time() {
        let (len, t) = parse_time("[00:01.12]").unwrap();
        assert_eq!(len, 10);
        assert!(close(t, 1.12));

        let (len, t) = parse_time("[00:10.254]x").unwrap();
        assert_eq!(len, 11);
        assert!(close(t, 10.254));

        let (len, t) = parse_time("[01:02:03]").unwrap();
        assert_eq!(len, 10);
        assert!(close(t, 3723.0));
    }

    #[test]
    fn test_parse_time_rejects_malformed() {
        assert!(parse_time("[0:01.12]").is_none());
        assert!(parse_time("[00:01.1]").is_none());
        assert!(parse_time("[00:01.1234]").is_none());
        assert!(parse_time("[ab:01.12]").is_none());
        assert!(parse_time("[ti:Title]").is_none());
        assert!(parse_time("00:01.12]").is_none());
        assert!(parse_time("[00:01").is_none());
    }

    #[test]
    fn test_compile_basic() {
        let lyric = compile("[00:01.00]First\n[00:05.50]Second\n[00:10.000]Third");
        assert_eq!(lyric.len(), 3);
        let lines: Vec<_> = lyric.iter().map(|l| (l.time, l.text)).collect();
        assert!(close(lines[0].0, 1.0));
        assert_eq!(lines[0].1, "First");
        assert!(close(lines[1].0, 5.5));
        assert_eq!(lines[2].1, "Third");
    }

    #[test]
    fn test_compile_skips_empty_lines() {
        let lyric = compile("\n\n  [00:01.00]a  \n\r\n\n[00:02.00]b\n");
        assert_eq!(lyric.len(), 2);
    }

    #[test]
    fn test_malformed_line_falls_back_to_zero() {
        let lyric = compile("not a timestamp");
        assert_eq!(lyric.len(), 1);
        assert_eq!(lyric.get(0.0), Some("not a timestamp"));
    }

    #[test]
    fn test_tag_without_fraction_is_text() {
        let lyric = compile("[00:01]x");
        assert_eq!(lyric.len(), 1);
        assert_eq!(lyric.get(0.0), Some("[00:01]x"));
        assert_eq!(lyric.get(1.0), None);
    }

    #[test]
    fn test_malformed_lines_collide() {
        let lyric = compile("[ti:Song]\n[ar:Someone]\n[00:03.00]sung");
        assert_eq!(lyric.len(), 2);
        assert_eq!(lyric.get(0.0), Some("[ar:Someone]"));
    }

    #[test]
    fn test_compile_is_idempotent() {
        let text = "[00:01.00]a\n[00:02.50]b\nplain\n[00:04.125]c";
        let first = compile(text);
        let second = compile(text);
        assert_eq!(first.times(), second.times());
        assert_eq!(first, second);
    }

    #[test]
    fn test_strip_word_tags() {
        assert_eq!(strip_word_tags("<00:01.00>he<00:01.500>llo"), "hello");
        assert_eq!(strip_word_tags("a < b <00:01.0> c"), "a < b <00:01.0> c");
        assert_eq!(strip_word_tags("<00:00:01>hello<00:00:03>"), "hello");
        assert_eq!(strip_word_tags("trailing <"), "trailing <");
    }

    #[test]
    fn test_compile_decoded_krc_line() {
        let lyric = compile("[00:00:01]<00:00:01>hel<00:00:02>lo<00:00:03>");
        assert_eq!(lyric.get(1.0), Some("hello"));
    }

    #[test]
    fn test_stringify_lrc() {
        let lyric = compile("[00:01.12] test\n[00:10.254]sss");
        let output = stringify_lrc(&lyric);
        assert!(output.contains("[00:01.120] test"));
        assert!(output.contains("[00:10.254]sss"));
    }
}
