use std::path::PathBuf;
use std::time::Duration;

use crate::app::Section;
use crate::audio::AudioEvent;
use crate::visualizer::DisplayMode;

/// Everything that can change application state, from keys, clicks and the
/// audio thread alike.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    TogglePlayPause,
    Next,
    Previous,
    /// Play the queue entry at this index.
    PlayAt(usize),
    RemoveAt(usize),
    /// Import files or directories into the queue.
    AddPaths(Vec<PathBuf>),
    ToggleShuffle,
    ToggleRepeat,
    ToggleMute,
    SetVolume(f32),
    AdjustVolume(f32),
    SetPlaybackRate(f32),
    AdjustPlaybackRate(f32),
    SeekTo(Duration),
    /// Relative seek in seconds.
    SeekBy(i64),
    ToggleFavorite,
    /// Minutes until playback pauses; 0 turns the timer off.
    SetSleepTimer(u64),
    CycleSleepTimer { forward: bool },
    SetEqGain { band: usize, gain_db: f32 },
    AdjustEqGain { band: usize, delta_db: f32 },
    ResetEq,
    ToggleVisualizer,
    SetVisualizerDisplay(DisplayMode),
    ShowSection(Section),
    /// Notification from the playback engine.
    Media(AudioEvent),
}
