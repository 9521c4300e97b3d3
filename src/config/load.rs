use std::{env, path::PathBuf};

use super::schema::Settings;
use crate::error::PlayerError;

/// Slowest and fastest playback rates offered.
pub const PLAYBACK_RATE_RANGE: (f32, f32) = (0.5, 2.0);

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file and overlays environment
/// variables (prefix `TIMBRE__`) on top of it, falling back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("TIMBRE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), PlayerError> {
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(PlayerError::Config(
                "audio.volume must be within 0.0..=1.0".to_string(),
            ));
        }
        let (min, max) = PLAYBACK_RATE_RANGE;
        if !(min..=max).contains(&self.audio.playback_rate) {
            return Err(PlayerError::Config(format!(
                "audio.playback_rate must be within {min}..={max}"
            )));
        }
        if self.ui.tick_ms == 0 {
            return Err(PlayerError::Config("ui.tick_ms must be >= 1".to_string()));
        }
        if self.ui.frame_interval_ms == 0 {
            return Err(PlayerError::Config(
                "ui.frame_interval_ms must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve the config path from `TIMBRE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("TIMBRE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/timbre/config.toml`
/// or `~/.config/timbre/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("timbre").join("config.toml"))
}

/// Directory for log files: `$XDG_STATE_HOME/timbre` or `~/.local/state/timbre`.
pub fn default_log_dir() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("timbre"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
