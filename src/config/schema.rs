use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/timbre/config.toml` or `~/.config/timbre/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TIMBRE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
///
/// These are startup defaults only; nothing is written back.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Initial output volume in `0.0..=1.0`.
    pub volume: f32,
    /// Initial playback rate (1.0 = normal speed).
    pub playback_rate: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: 0.8,
            playback_rate: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Whether repeat-one starts enabled.
    pub repeat: bool,
    /// "Previous" restarts the current song when more than this many seconds have elapsed.
    pub restart_threshold_secs: u64,
    /// Number of seconds to seek with `,` / `.`.
    pub seek_step_secs: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            shuffle: false,
            repeat: false,
            restart_threshold_secs: 3,
            seek_step_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Event poll interval of the main loop (milliseconds).
    pub tick_ms: u64,
    /// Delay between visualizer frames (milliseconds).
    pub frame_interval_ms: u64,
    /// Section shown on startup.
    pub start_section: SectionSetting,
    /// Initial visualizer display mode.
    pub visualizer: VisualizerSetting,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            frame_interval_ms: 33,
            start_section: SectionSetting::Home,
            visualizer: VisualizerSetting::Full,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionSetting {
    Home,
    Explore,
    #[serde(alias = "your-library", alias = "your_library")]
    Library,
    #[serde(alias = "play-queue", alias = "play_queue")]
    Queue,
    Settings,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualizerSetting {
    #[serde(alias = "on")]
    Full,
    #[serde(alias = "off", alias = "none")]
    Hidden,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Whether to follow symlinks when importing directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            follow_links: true,
            include_hidden: true,
            recursive: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset (e.g. `info`, `timbre=debug`).
    pub level: String,
    /// Directory for the rolling log file. Defaults to the XDG state dir.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
