//! Message update handlers
//!
//! One handler per message family; `App::update` matches on the message and
//! calls the right one.

use std::path::PathBuf;
use std::sync::Arc;

use super::jobs::BackgroundTask;
use super::{App, Message};
use crate::features::Settings;
use crate::features::lyrics::RawLyric;
use crate::features::media::{self, CoverArt};
use crate::utils::track_id;

impl App {
    /// Handle a message
    pub fn update(&mut self, message: Message) {
        match message {
            Message::TrackChanged(track) => self.handle_track_changed(track),
            Message::PlaybackPosition(position) => self.state.player.position = position,
            Message::PlaybackStateChanged(playing) => self.state.player.playing = playing,
            Message::LyricsLoaded { track_id, lyrics } => {
                self.handle_lyrics_loaded(track_id, lyrics)
            }
            Message::CoverLoaded { track_id, cover } => self.handle_cover_loaded(track_id, cover),
            Message::Scrolled(offset) => self.state.view.scroll_offset = offset,
            Message::ViewportResized(height) => {
                self.state.view.viewport_height = height;
                self.state.lyrics.view_mut().set_viewport_height(height);
            }
            Message::SettingsChanged(settings) => self.handle_settings_changed(settings),
        }
    }

    fn handle_track_changed(&mut self, track: Option<PathBuf>) {
        let id = track.as_deref().map(track_id);
        if id == self.state.player.track_id {
            return;
        }

        let player = &mut self.state.player;
        player.track = track.clone();
        player.track_id = id;
        player.position = 0.0;
        self.state.lyrics.clear(None);

        if let (Some(path), Some(id)) = (track, id) {
            tracing::info!("Track changed: {:?} ({:016x})", path, id);
            self.load_media_in_background(path, id);
        }
    }

    /// Look up lyrics (and the cover, unless cached) on a worker thread
    pub fn load_media_in_background(&mut self, path: PathBuf, id: u64) {
        let queue = self.jobs.clone();
        let prefer_krc = self.state.settings.lyrics.prefer_krc;
        let need_cover = !self.state.covers.contains(id);

        let spawned = BackgroundTask::spawn("media-loader", move || {
            let lyrics = media::find_lyrics(&path, prefer_krc);
            queue.push(Message::LyricsLoaded {
                track_id: id,
                lyrics,
            });

            if need_cover {
                let cover = match media::load_cover(&path) {
                    Ok(cover) => cover.map(Arc::new),
                    Err(e) => {
                        tracing::warn!("Failed to load cover for {:?}: {:#}", path, e);
                        None
                    }
                };
                queue.push(Message::CoverLoaded {
                    track_id: id,
                    cover,
                });
            }
        });

        match spawned {
            Ok(task) => self.tasks.push(task),
            Err(e) => tracing::warn!("Failed to spawn media loader: {}", e),
        }
    }

    fn handle_lyrics_loaded(&mut self, id: u64, lyrics: Option<RawLyric>) {
        if self.state.player.track_id != Some(id) {
            tracing::debug!("Dropping lyrics for stale track {:016x}", id);
            return;
        }

        let reloaded = match lyrics {
            Some(raw) => self.state.lyrics.load(id, &raw),
            // A duplicate result for a track that already has lyrics
            None if self.state.lyrics.track_id() == Some(id) => false,
            None => {
                tracing::info!("No lyrics found for track {:016x}", id);
                self.state.lyrics.clear(Some(id));
                true
            }
        };

        // The view was reset, so its scroll tracking starts from the top again
        if reloaded {
            self.state.view.scroll_offset = 0.0;
        }
    }

    fn handle_cover_loaded(&mut self, id: u64, cover: Option<Arc<CoverArt>>) {
        if let Some(cover) = cover {
            self.state.covers.insert(id, cover, self.now);
        }
    }

    fn handle_settings_changed(&mut self, settings: Settings) {
        self.apply_settings(&settings);
        if let Err(e) = settings.save() {
            tracing::warn!("Failed to save settings: {}", e);
        }
        self.state.settings = settings;
    }

    /// Push settings into the lyrics view and cover cache
    pub fn apply_settings(&mut self, settings: &Settings) {
        let config = settings
            .lyrics
            .view_config(self.state.view.viewport_height);
        self.state.lyrics.view_mut().set_config(config);
        self.state
            .covers
            .set_max_age(settings.cache.cover_max_age());
    }
}
