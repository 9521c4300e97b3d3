//! Audio playback: the play queue, the processing graph (equalizer and
//! analyser) and the thread that owns the output device.

mod analyser;
mod eq;
mod graph;
mod player;
mod queue;
mod sink;
mod thread;
mod traits;
mod types;

pub use analyser::{Analyser, BIN_COUNT, FFT_SIZE};
pub use eq::{BAND_COUNT, Equalizer, MAX_GAIN_DB, band_label};
pub use graph::{AudioGraph, GraphState};
pub use player::AudioPlayer;
pub use queue::Queue;
pub use traits::MediaElement;
pub use types::{AudioEvent, LoadId};

#[cfg(test)]
mod tests;
