use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, warn};

use crate::app::{App, PlaybackState, Section};
use crate::audio::{AudioEvent, AudioGraph, LoadId, MediaElement, band_label};
use crate::config::{LibrarySettings, Settings, VisualizerSetting};
use crate::error::PlayerError;
use crate::library::{self, SkipReason, Track};
use crate::visualizer::{DisplayMode, Visualizer};

use super::intent::Intent;
use super::timer::{SleepTimer, next_sleep_choice};

/// Owns the application state and applies every `Intent` to it, driving
/// the media element, the audio graph and the visualizer as it goes.
pub struct Controller<M: MediaElement> {
    app: App,
    media: M,
    /// The load whose events are still wanted.
    load: Option<LoadId>,
    graph: AudioGraph,
    visualizer: Visualizer,
    sleep_timer: SleepTimer,
    library: LibrarySettings,
}

impl<M: MediaElement> Controller<M> {
    pub fn new(settings: &Settings, mut media: M, graph: AudioGraph) -> Self {
        let app = App::new(settings);
        media.set_volume(app.transport.volume());
        media.set_playback_rate(app.transport.rate());

        let display = match settings.ui.visualizer {
            VisualizerSetting::Full => DisplayMode::Full,
            VisualizerSetting::Hidden => DisplayMode::Hidden,
        };
        let visualizer = Visualizer::new(
            display,
            Duration::from_millis(settings.ui.frame_interval_ms.max(1)),
        );

        Self {
            app,
            media,
            load: None,
            graph,
            visualizer,
            sleep_timer: SleepTimer::default(),
            library: settings.library.clone(),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Mutable access for purely presentational state (selections, input).
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn graph(&self) -> &AudioGraph {
        &self.graph
    }

    pub fn visualizer(&self) -> &Visualizer {
        &self.visualizer
    }

    pub fn sleep_timer(&self) -> &SleepTimer {
        &self.sleep_timer
    }

    pub fn dispatch(&mut self, intent: Intent) {
        debug!(?intent, "dispatch");
        match intent {
            Intent::TogglePlayPause => self.toggle_play_pause(),
            Intent::Next => self.play_next(),
            Intent::Previous => self.play_prev(),
            Intent::PlayAt(index) => self.play_at(index),
            Intent::RemoveAt(index) => self.remove_at(index),
            Intent::AddPaths(paths) => self.add_paths(&paths),
            Intent::ToggleShuffle => {
                self.app.transport.shuffle = !self.app.transport.shuffle;
                let msg = on_off("Shuffle", self.app.transport.shuffle);
                self.app.status.push(msg);
            }
            Intent::ToggleRepeat => {
                self.app.transport.repeat = !self.app.transport.repeat;
                let msg = on_off("Repeat", self.app.transport.repeat);
                self.app.status.push(msg);
            }
            Intent::ToggleMute => self.toggle_mute(),
            Intent::SetVolume(v) => self.set_volume(v),
            Intent::AdjustVolume(delta) => {
                self.set_volume(self.app.transport.volume() + delta);
                let pct = (self.app.transport.volume() * 100.0).round();
                self.app.status.push(format!("Volume: {pct}%"));
            }
            Intent::SetPlaybackRate(r) => self.set_playback_rate(r),
            Intent::AdjustPlaybackRate(delta) => {
                self.set_playback_rate(self.app.transport.rate() + delta)
            }
            Intent::SeekTo(pos) => self.seek_to(pos),
            Intent::SeekBy(secs) => self.seek_by(secs),
            Intent::ToggleFavorite => self.toggle_favorite(),
            Intent::SetSleepTimer(minutes) => self.set_sleep_timer(minutes, Instant::now()),
            Intent::CycleSleepTimer { forward } => {
                let minutes = next_sleep_choice(self.app.sleep_minutes, forward);
                self.set_sleep_timer(minutes, Instant::now());
            }
            Intent::SetEqGain { band, gain_db } => {
                if self.graph.set_gain(band, gain_db).is_some() {
                    let msg = format!("EQ {}", self.band_summary(band));
                    self.app.status.push(msg);
                }
            }
            Intent::AdjustEqGain { band, delta_db } => {
                if let Some(gain) = self.graph.equalizer().gain(band) {
                    self.graph.set_gain(band, gain + delta_db);
                    let msg = format!("EQ {}", self.band_summary(band));
                    self.app.status.push(msg);
                }
            }
            Intent::ResetEq => {
                self.graph.reset_gains();
                self.app.status.push("Equalizer reset.");
            }
            Intent::ToggleVisualizer => {
                let playing = self.app.transport.is_playing();
                self.visualizer.toggle(Instant::now(), playing, &self.graph);
                let msg = on_off("Visualizer", self.visualizer.is_active());
                self.app.status.push(msg);
            }
            Intent::SetVisualizerDisplay(mode) => {
                let playing = self.app.transport.is_playing();
                self.visualizer
                    .set_display(mode, Instant::now(), playing, &self.graph);
                let label = match mode {
                    DisplayMode::Full => "full",
                    DisplayMode::Hidden => "hidden",
                };
                self.app
                    .status
                    .push(format!("Visualizer display: {label}"));
            }
            Intent::ShowSection(section) => self.show_section(section),
            Intent::Media(event) => self.handle_media_event(event),
        }
    }

    /// Advance timers and the visualizer loop. Returns whether anything
    /// visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if self.sleep_timer.poll(now) {
            if self.app.transport.is_playing() {
                self.pause_playback();
            }
            self.app.sleep_minutes = 0;
            self.app.status.push("Sleep timer ended. Playback paused.");
            changed = true;
        }

        let playing = self.app.transport.is_playing();
        changed |= self.visualizer.tick(now, playing, self.graph.analyser());
        changed
    }

    /// Time until the next scheduled piece of work, for the event loop's poll timeout.
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        let frame = self.visualizer.scheduler().time_until_due(now);
        let timer = self.sleep_timer.remaining(now);
        match (frame, timer) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn resize_visualizer(&mut self, width: u16, height: u16, now: Instant) {
        let playing = self.app.transport.is_playing();
        self.visualizer.resize(width, height, now, playing);
    }

    fn current_title(&self) -> String {
        self.app
            .queue
            .current_track()
            .map(|t| t.title.clone())
            .unwrap_or_default()
    }

    /// Point the cursor at `index` and hand the track to the media element.
    fn load_index(&mut self, index: usize) -> bool {
        let Some(track) = self.app.queue.track_at(index).cloned() else {
            return false;
        };
        self.app.queue.set_current(Some(index));
        self.load = Some(self.media.load(&track));
        self.app.favorite = false;
        self.app.view.render_queue(&self.app.queue);
        true
    }

    fn start_playback(&mut self, verb: &str) {
        self.media.play();
        self.app.transport.state = PlaybackState::Playing;
        self.visualizer.start(Instant::now(), &self.graph);
        let title = self.current_title();
        self.app.status.push(format!("{verb}: {title}"));
    }

    fn pause_playback(&mut self) {
        self.media.pause();
        self.app.transport.state = PlaybackState::Paused;
        self.visualizer.stop();
    }

    pub fn toggle_play_pause(&mut self) {
        if self.app.transport.is_playing() {
            self.pause_playback();
            let title = self.current_title();
            self.app.status.push(format!("Paused: {title}"));
            return;
        }

        if self.app.queue.current().is_none() && !self.load_index(0) {
            self.app
                .status
                .push("No song loaded. Add songs to the Play Queue.");
            return;
        }
        self.start_playback("Playing");
    }

    pub fn play_next(&mut self) {
        let len = self.app.queue.len();
        if len == 0 {
            return;
        }
        let current = self.app.queue.current();

        let next = if self.app.transport.repeat {
            current.unwrap_or(0)
        } else if self.app.transport.shuffle {
            shuffle_pick(current, len)
        } else {
            match self.app.queue.next_index() {
                Some(i) => i,
                None => {
                    self.load_index(0);
                    self.pause_playback();
                    self.app.status.push("Queue finished.");
                    return;
                }
            }
        };

        self.load_index(next);
        self.start_playback("Playing next");
    }

    pub fn play_prev(&mut self) {
        if self.app.queue.is_empty() {
            return;
        }

        if self.app.queue.current().is_some()
            && self.media.current_time() > self.app.restart_threshold
        {
            self.media.seek(Duration::ZERO);
            self.app.status.push("Restarting current song.");
            return;
        }

        if let Some(prev) = self.app.queue.prev_index() {
            self.load_index(prev);
            self.start_playback("Playing previous");
        }
    }

    /// Natural end of the playing track.
    pub fn track_ended(&mut self) {
        self.play_next();
    }

    pub fn play_at(&mut self, index: usize) {
        if self.load_index(index) {
            self.start_playback("Playing");
        }
    }

    pub fn remove_at(&mut self, index: usize) {
        if self.app.queue.current() == Some(index) {
            self.pause_playback();
        }

        let Some(removal) = self.app.queue.remove_at(index) else {
            return;
        };
        self.app.view.render_queue(&self.app.queue);

        if !removal.was_current {
            self.app
                .status
                .push(format!("Removed from queue: {}", removal.track.title));
            return;
        }

        self.app.status.push("Removed currently playing song.");
        match self.app.queue.current() {
            Some(i) => {
                self.load_index(i);
                self.start_playback("Playing");
            }
            None => {
                self.media.unload();
                self.load = None;
                self.app.transport.state = PlaybackState::Stopped;
                self.app.favorite = false;
                self.visualizer.stop();
                self.graph.suspend();
                self.app.status.push("Queue is empty.");
            }
        }
    }

    pub fn add_paths(&mut self, paths: &[PathBuf]) {
        let report = library::import_paths(paths, &self.library);
        for (path, reason) in &report.skipped {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let msg = match reason {
                SkipReason::NotAudio(_) => format!("Skipped non-audio file: {name}"),
                SkipReason::Missing => format!("File not found: {}", path.display()),
            };
            self.app.status.push(msg);
        }
        self.add_tracks(report.tracks);
    }

    /// Append tracks; an idle player starts on the first one.
    pub fn add_tracks(&mut self, tracks: Vec<Track>) {
        if tracks.is_empty() {
            return;
        }
        for track in tracks {
            self.app
                .status
                .push(format!("Added to queue: {}", track.title));
            self.app.queue.append(track);
        }
        self.app.view.render_queue(&self.app.queue);

        if self.app.queue.current().is_none() && self.load_index(0) {
            self.start_playback("Playing");
        }
    }

    pub fn toggle_mute(&mut self) {
        let volume = self.app.transport.toggle_mute();
        self.media.set_volume(volume);
        let msg = if self.app.transport.is_muted() {
            "Muted"
        } else {
            "Unmuted"
        };
        self.app.status.push(msg);
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = self.app.transport.set_volume(volume);
        self.media.set_volume(volume);
    }

    pub fn set_playback_rate(&mut self, rate: f32) {
        let rate = self.app.transport.set_rate(rate);
        self.media.set_playback_rate(rate);
        self.app
            .status
            .push(format!("Playback speed set to {rate}x"));
    }

    pub fn seek_to(&mut self, position: Duration) {
        if self.app.queue.current().is_none() {
            return;
        }
        let position = match self.media.duration() {
            Some(total) => position.min(total),
            None => position,
        };
        self.media.seek(position);
    }

    pub fn seek_by(&mut self, secs: i64) {
        let now = self.media.current_time();
        let delta = Duration::from_secs(secs.unsigned_abs());
        let target = if secs >= 0 {
            now + delta
        } else {
            now.saturating_sub(delta)
        };
        self.seek_to(target);
    }

    pub fn toggle_favorite(&mut self) {
        let Some(title) = self.app.queue.current_track().map(|t| t.title.clone()) else {
            self.app.status.push("No song loaded.");
            return;
        };
        self.app.favorite = !self.app.favorite;
        let msg = if self.app.favorite {
            format!("Added to favorites: {title}")
        } else {
            format!("Removed from favorites: {title}")
        };
        self.app.status.push(msg);
    }

    pub fn set_sleep_timer(&mut self, minutes: u64, now: Instant) {
        self.app.sleep_minutes = minutes;
        if minutes == 0 {
            self.sleep_timer.clear();
            self.app.status.push("Sleep timer off.");
            return;
        }
        if self.sleep_timer.set(Duration::from_secs(minutes * 60), now).is_some() {
            debug!("replaced pending sleep timer");
        }
        self.app
            .status
            .push(format!("Sleep timer set for {minutes} minutes."));
    }

    pub fn show_section(&mut self, section: Section) {
        if self.app.view.show_section(section) {
            self.app
                .status
                .push(format!("Navigated to: {}", section.label()));
        }
    }

    /// Apply a notification from the media element. Events tagged with a
    /// load other than the current one belong to a replaced source and are
    /// dropped.
    pub fn handle_media_event(&mut self, event: AudioEvent) {
        if let Some(load) = event.load() {
            if self.load != Some(load) {
                debug!(load, current = ?self.load, "dropping event from replaced source");
                return;
            }
        }

        match event {
            AudioEvent::Loaded { duration, .. } => {
                debug!(?duration, "media ready");
            }
            AudioEvent::Ended { .. } => {
                if self.app.transport.is_playing() {
                    self.track_ended();
                }
            }
            AudioEvent::Failed {
                error: PlayerError::Seek(reason),
                ..
            } => {
                warn!(%reason, "seek rejected");
                self.app.status.push(format!("Seek failed: {reason}"));
            }
            AudioEvent::Failed { error, .. } => {
                warn!(%error, "playback failure");
                if self.app.transport.is_playing() {
                    self.pause_playback();
                }
                self.app.status.push(format!("Playback error: {error}"));
            }
        }
    }

    /// Label for the equalizer band under edit, e.g. `125 Hz +3 dB`.
    pub fn band_summary(&self, band: usize) -> String {
        let gain = self.graph.equalizer().gain(band).unwrap_or(0.0);
        format!("{} Hz {:+.0} dB", band_label(band), gain)
    }
}

/// Uniformly random index other than `current` (when there is a choice).
fn shuffle_pick(current: Option<usize>, len: usize) -> usize {
    let mut rng = rand::rng();
    match current {
        Some(c) if len > 1 && c < len => {
            let i = rng.random_range(0..len - 1);
            if i >= c { i + 1 } else { i }
        }
        _ => rng.random_range(0..len),
    }
}

fn on_off(what: &str, on: bool) -> String {
    format!("{what} {}", if on { "ON" } else { "OFF" })
}
