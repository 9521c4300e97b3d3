//! Messages and shared state exchanged with the audio thread.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::PlayerError;
use crate::library::Track;

/// Identifies one `Load`. Ids increase, so events from a source that has
/// since been replaced can be told apart from current ones.
pub type LoadId = u64;

#[derive(Debug)]
pub enum AudioCmd {
    /// Open `track` and connect it to the graph, paused at the start.
    Load { id: LoadId, track: Track },
    /// Drop the current source.
    Unload,
    /// Resume or start the loaded source.
    Play,
    Pause,
    /// Jump to an absolute position in the loaded source.
    Seek(Duration),
    /// Output volume in `0.0..=1.0`; kept across loads.
    SetVolume(f32),
    /// Playback rate; kept across loads.
    SetSpeed(f32),
    /// Stop playback and end the audio thread.
    Quit,
}

/// Notifications from the audio thread, drained by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// A loaded source is ready; the duration is known when the decoder reports it.
    Loaded {
        load: LoadId,
        duration: Option<Duration>,
    },
    /// The playing source ran out naturally.
    Ended { load: LoadId },
    /// `load` is `None` for failures not tied to a source, such as a
    /// missing output device.
    Failed {
        load: Option<LoadId>,
        error: PlayerError,
    },
}

impl AudioEvent {
    /// The load this event belongs to, if any.
    pub fn load(&self) -> Option<LoadId> {
        match self {
            AudioEvent::Loaded { load, .. } | AudioEvent::Ended { load } => Some(*load),
            AudioEvent::Failed { load, .. } => *load,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Position within the loaded source.
    pub elapsed: Duration,
    /// Length of the loaded source, when known.
    pub duration: Option<Duration>,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
