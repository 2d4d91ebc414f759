//! lyricsync - play back synchronized lyrics in the terminal
//!
//! Usage: `lyricsync <track> [--dump]`
//!
//! `<track>` is an audio file (sidecar or embedded lyrics are looked up) or
//! a `.lrc`/`.krc` file directly. `--dump` prints the compiled lyrics as LRC
//! instead of playing them.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};

use lyricsync::app::{App, Message};
use lyricsync::features::Settings;
use lyricsync::features::lyrics::{Highlight, compile_raw, stringify_lrc};
use lyricsync::features::media;
use lyricsync::utils::format_position;

/// Frame interval of the simulated player
const TICK: Duration = Duration::from_millis(50);

/// Keep running this long after the last line
const TAIL: f64 = 5.0;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let mut track = None;
    let mut dump = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--dump" => dump = true,
            _ if track.is_none() => track = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument: {}", arg),
        }
    }
    let Some(track) = track else {
        bail!("usage: lyricsync <track> [--dump]");
    };

    let settings = Settings::load();

    if dump {
        let raw = media::find_lyrics(&track, settings.lyrics.prefer_krc)
            .with_context(|| format!("No lyrics found for {:?}", track))?;
        print!("{}", stringify_lrc(&compile_raw(&raw)));
        return Ok(());
    }

    play(track, settings).await
}

/// Simulate playback from 0 s and print each line as it becomes current
async fn play(track: PathBuf, settings: Settings) -> Result<()> {
    let mut app = App::new(settings);
    let queue = app.queue();
    queue.push(Message::TrackChanged(Some(track.clone())));
    queue.push(Message::PlaybackStateChanged(true));

    let started = Instant::now();
    let mut interval = tokio::time::interval(TICK);
    let mut shown = Highlight::Idle;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted");
                return Ok(());
            }
        }

        let position = started.elapsed().as_secs_f64();
        queue.push(Message::PlaybackPosition(position));
        let frame = app.frame(Instant::now());

        let lyric = app.state.lyrics.lyric();
        if frame.lyrics.highlight != shown {
            shown = frame.lyrics.highlight;
            if let Highlight::Highlighted { time, .. } = shown {
                let text = lyric.get(time).unwrap_or_default();
                println!("[{}] {}", format_position(time), text);
            }
        }

        // Wait for the loader before deciding there is nothing to play
        if app.pending_tasks() > 0 || app.state.lyrics.track_id().is_none() {
            continue;
        }
        let end = lyric.times().last().copied().unwrap_or(0.0) + TAIL;
        if lyric.is_empty() {
            bail!("No lyrics found for {:?}", track);
        }
        if position > end {
            return Ok(());
        }
    }
}
