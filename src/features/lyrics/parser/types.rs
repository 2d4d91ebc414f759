//! Lyrics data types
//!
//! Compiled lyrics are an ordered time -> sentence map. Times are seconds.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Lyrics format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricsFormat {
    /// Standard LRC format [mm:ss.xx]text
    Lrc,
    /// Kugou KRC format (base64 + XOR + zlib, word-level)
    Krc,
}

/// Raw lyric text as it was fetched, before compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLyric {
    /// LRC-like plain text, one timestamp tag per line
    Lrc(String),
    /// Base64-encoded KRC blob
    Krc(String),
    /// KRC blob as stored in a `.krc` file
    KrcBytes(Vec<u8>),
}

impl RawLyric {
    pub fn format(&self) -> LyricsFormat {
        match self {
            RawLyric::Lrc(_) => LyricsFormat::Lrc,
            RawLyric::Krc(_) | RawLyric::KrcBytes(_) => LyricsFormat::Krc,
        }
    }
}

/// Totally ordered seconds value used as the map key.
#[derive(Debug, Clone, Copy)]
pub struct TimeKey(pub f64);

impl TimeKey {
    pub fn seconds(self) -> f64 {
        self.0
    }
}

impl PartialEq for TimeKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TimeKey {}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// A line picked out of a compiled lyric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LyricLineRef<'a> {
    /// Position of the line in time order
    pub index: usize,
    /// Start time in seconds
    pub time: f64,
    /// Sentence text
    pub text: &'a str,
}

/// Ordered mapping from time offset (seconds) to display sentence.
///
/// Duplicate timestamps collapse: the last insert wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledLyric {
    lines: BTreeMap<TimeKey, String>,
}

impl CompiledLyric {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a line, replacing any sentence already at `time`
    pub fn insert(&mut self, time: f64, sentence: String) -> Option<String> {
        self.lines.insert(TimeKey(time), sentence)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sentence stored at exactly `time`
    pub fn get(&self, time: f64) -> Option<&str> {
        self.lines.get(&TimeKey(time)).map(String::as_str)
    }

    /// Lines in time order
    pub fn iter(&self) -> impl Iterator<Item = LyricLineRef<'_>> {
        self.lines
            .iter()
            .enumerate()
            .map(|(index, (time, text))| LyricLineRef {
                index,
                time: time.seconds(),
                text: text.as_str(),
            })
    }

    /// All keys in time order
    pub fn times(&self) -> Vec<f64> {
        self.lines.keys().map(|k| k.seconds()).collect()
    }

    /// The line whose time is the greatest one not after `position`.
    ///
    /// Returns `None` when the lyric is empty or `position` is before the
    /// first line.
    pub fn highlighted(&self, position: f64) -> Option<LyricLineRef<'_>> {
        let (time, text) = self.lines.range(..=TimeKey(position)).next_back()?;
        // Number of keys strictly before `time`
        let index = self.lines.range(..*time).count();
        Some(LyricLineRef {
            index,
            time: time.seconds(),
            text: text.as_str(),
        })
    }
}
