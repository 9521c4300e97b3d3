//! Application model types: `App`, `Transport` and `PlaybackState`.

use std::time::Duration;

use crate::audio::Queue;
use crate::config::{PLAYBACK_RATE_RANGE, Settings};

use super::status::StatusLog;
use super::view::{Section, View};

/// The playback state of the application.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Which volume icon to show.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VolumeLevel {
    Muted,
    Low,
    High,
}

/// Transport controls: play state, sequencing flags, volume and speed.
#[derive(Debug, Clone)]
pub struct Transport {
    pub state: PlaybackState,
    pub shuffle: bool,
    pub repeat: bool,
    volume: f32,
    last_volume: f32,
    rate: f32,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Transport {
    pub fn new(volume: f32, rate: f32) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        Self {
            state: PlaybackState::Stopped,
            shuffle: false,
            repeat: false,
            volume,
            last_volume: if volume > 0.0 { volume } else { 1.0 },
            rate: clamp_rate(rate),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set the volume, clamped to `0.0..=1.0`. Returns the applied value.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.volume = volume.clamp(0.0, 1.0);
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.volume == 0.0
    }

    /// Mute, remembering the current volume, or restore the remembered
    /// volume. Returns the new volume.
    pub fn toggle_mute(&mut self) -> f32 {
        if self.is_muted() {
            self.volume = self.last_volume;
        } else {
            self.last_volume = self.volume;
            self.volume = 0.0;
        }
        self.volume
    }

    pub fn volume_level(&self) -> VolumeLevel {
        if self.volume == 0.0 {
            VolumeLevel::Muted
        } else if self.volume < 0.5 {
            VolumeLevel::Low
        } else {
            VolumeLevel::High
        }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Set the playback rate within the supported range. Returns the applied value.
    pub fn set_rate(&mut self, rate: f32) -> f32 {
        self.rate = clamp_rate(rate);
        self.rate
    }
}

fn clamp_rate(rate: f32) -> f32 {
    let (min, max) = PLAYBACK_RATE_RANGE;
    if rate.is_finite() {
        rate.clamp(min, max)
    } else {
        1.0
    }
}

/// The main application model.
pub struct App {
    pub queue: Queue,
    pub transport: Transport,
    pub view: View,
    pub status: StatusLog,
    /// Favorite mark on the loaded song; cleared whenever a song loads.
    pub favorite: bool,
    /// Sleep timer choice in minutes (0 = off).
    pub sleep_minutes: u64,
    pub restart_threshold: Duration,
    pub seek_step: Duration,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        let mut transport = Transport::new(settings.audio.volume, settings.audio.playback_rate);
        transport.shuffle = settings.playback.shuffle;
        transport.repeat = settings.playback.repeat;

        Self {
            queue: Queue::new(),
            transport,
            view: View::new(Section::from(settings.ui.start_section)),
            status: StatusLog::default(),
            favorite: false,
            sleep_minutes: 0,
            restart_threshold: Duration::from_secs(settings.playback.restart_threshold_secs),
            seek_step: Duration::from_secs(settings.playback.seek_step_secs),
        }
    }

    /// Text matched by the Explore search: `artist - title`.
    pub fn search_text(&self, index: usize) -> Option<String> {
        self.queue
            .track_at(index)
            .map(|t| format!("{} - {}", t.artist, t.title))
    }

    /// Queue indices whose search text fuzzy-matches the current query, in queue order.
    pub fn search_results(&self) -> Vec<usize> {
        let query = self.view.search_query.trim();
        (0..self.queue.len())
            .filter(|&i| {
                self.search_text(i)
                    .is_some_and(|text| Self::fuzzy_match_positions(&text, query).is_some())
            })
            .collect()
    }

    /// Fuzzy/subsequence match: return the character positions in `title`
    /// that match `query`, or `None` if not matched.
    pub fn fuzzy_match_positions(title: &str, query: &str) -> Option<Vec<usize>> {
        if query.is_empty() {
            return Some(Vec::new());
        }

        let mut positions: Vec<usize> = Vec::new();
        let mut title_iter = title.chars().enumerate();

        for qc in query.chars() {
            let qc_low = qc.to_ascii_lowercase();
            loop {
                match title_iter.next() {
                    Some((ti, tc)) if tc.to_ascii_lowercase() == qc_low => {
                        positions.push(ti);
                        break;
                    }
                    Some(_) => continue,
                    None => return None,
                }
            }
        }

        Some(positions)
    }
}
