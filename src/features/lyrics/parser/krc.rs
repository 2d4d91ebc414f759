//! Kugou KRC format decoder
//!
//! KRC 逐字歌词格式 (酷狗音乐)
//! 文件: base64( "krc1" + xor(zlib(text)) )
//! 行格式: [start,duration]<offset,duration,0>word<offset,duration,0>word...
//! offset 相对于行开始时间

use std::io::Read;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::read::ZlibDecoder;
use once_cell::sync::Lazy;
use regex::Regex;

/// Magic prefix of a decoded KRC blob
pub const KRC_MAGIC: &[u8; 4] = b"krc1";

/// Repeating XOR key applied after the magic
const KRC_KEY: [u8; 16] = [
    0x40, 0x47, 0x61, 0x77, 0x5e, 0x32, 0x74, 0x47, 0x51, 0x36, 0x31, 0x2d, 0xce, 0xd2, 0x6e, 0x69,
];

/// Inflate chunk size
const CHUNK: usize = 4096;

static META_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(\S+):(\S+)\]$").expect("valid meta regex"));

static LINE_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(\d+),(\d+)\]").expect("valid line regex"));

static WORD_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(\d+),(\d+),\d+>([^<]*)").expect("valid word regex"));

/// Decode a base64-encoded KRC blob into normalized lyric text.
///
/// Any failure along the way yields an empty or truncated result.
pub fn decode(encoded: &str) -> String {
    let bytes = match STANDARD.decode(encoded.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("KRC base64 decode failed: {}", e);
            return String::new();
        }
    };
    decode_bytes(&bytes)
}

/// Decode a raw KRC blob (already base64-decoded, e.g. a `.krc` file)
pub fn decode_bytes(bytes: &[u8]) -> String {
    let inflated = decrypt(bytes);
    if inflated.is_empty() {
        return String::new();
    }
    normalize(&String::from_utf8_lossy(&inflated))
}

/// Check magic, undo the XOR and inflate. Returns the inflated bytes.
pub fn decrypt(bytes: &[u8]) -> Vec<u8> {
    if !bytes.starts_with(KRC_MAGIC) {
        tracing::debug!("Not a KRC blob: bad magic");
        return Vec::new();
    }

    let xored: Vec<u8> = bytes[KRC_MAGIC.len()..]
        .iter()
        .enumerate()
        .map(|(i, b)| b ^ KRC_KEY[i % KRC_KEY.len()])
        .collect();

    inflate(&xored)
}

/// Inflate a zlib stream chunk by chunk, keeping whatever came out before
/// an error.
fn inflate(data: &[u8]) -> Vec<u8> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::with_capacity(data.len() * 4);
    let mut chunk = [0u8; CHUNK];

    loop {
        match decoder.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => out.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!("KRC inflate stopped after {} bytes: {}", out.len(), e);
                break;
            }
        }
    }

    out
}

/// Format milliseconds as `HH:MM:SS`, truncating the sub-second part
fn format_time(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// Rewrite one timed KRC line as `[start]<t>word...<end>`
fn normalize_timed_line(line: &str) -> Option<String> {
    let caps = LINE_TIME.captures(line)?;
    let start: u64 = caps[1].parse().ok()?;
    let duration: u64 = caps[2].parse().ok()?;
    let rest = &line[caps.get(0)?.end()..];

    let mut result = format!("[{}]", format_time(start));
    for word in WORD_TIME.captures_iter(rest) {
        let Ok(offset) = word[1].parse::<u64>() else {
            continue;
        };
        result.push('<');
        result.push_str(&format_time(start.saturating_add(offset)));
        result.push('>');
        result.push_str(&word[3]);
    }
    result.push('<');
    result.push_str(&format_time(start.saturating_add(duration)));
    result.push('>');

    Some(result)
}

/// Normalize inflated KRC text line by line
pub fn normalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if META_LINE.is_match(line) {
            result.push_str(line);
        } else if let Some(timed) = normalize_timed_line(line) {
            result.push_str(&timed);
        } else {
            result.push_str(line);
        }
        result.push('\n');
    }

    result
}
