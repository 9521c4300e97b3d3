use std::time::Duration;

use crate::library::Track;

use super::types::LoadId;

/// The playback engine as seen by the controller: a single loaded source
/// with transport, position and output controls.
///
/// Completion and load results are reported asynchronously as
/// [`AudioEvent`](super::AudioEvent)s tagged with the id `load` returned.
pub trait MediaElement {
    fn load(&mut self, track: &Track) -> LoadId;
    fn unload(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position: Duration);
    fn set_volume(&mut self, volume: f32);
    fn set_playback_rate(&mut self, rate: f32);
    fn current_time(&self) -> Duration;
    fn duration(&self) -> Option<Duration>;
}
