use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::library::Track;

use super::graph::AudioGraph;
use super::thread::spawn_audio_thread;
use super::traits::MediaElement;
use super::types::{AudioCmd, AudioEvent, LoadId, PlaybackHandle, PlaybackInfo};

/// Front end of the audio thread: commands go out over a channel, progress
/// comes back through the shared `PlaybackHandle` and the event channel.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    events: Receiver<AudioEvent>,
    playback: PlaybackHandle,
    last_load: LoadId,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(graph: AudioGraph) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<AudioEvent>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(rx, event_tx, playback_info.clone(), graph);

        Self {
            tx,
            events: event_rx,
            playback: playback_info,
            last_load: 0,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    /// Next pending notification from the audio thread, if any.
    pub fn try_event(&self) -> Option<AudioEvent> {
        self.events.try_recv().ok()
    }

    /// Stop playback and wait for the audio thread to finish.
    pub fn quit(&self) {
        let _ = self.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }

    fn command(&self, cmd: AudioCmd) {
        if let Err(e) = self.send(cmd) {
            warn!(cmd = ?e.0, "audio thread is gone; command dropped");
        }
    }
}

impl MediaElement for AudioPlayer {
    fn load(&mut self, track: &Track) -> LoadId {
        if let Ok(mut info) = self.playback.lock() {
            info.elapsed = Duration::ZERO;
            info.duration = track.duration;
        }
        self.last_load += 1;
        self.command(AudioCmd::Load {
            id: self.last_load,
            track: track.clone(),
        });
        self.last_load
    }

    fn unload(&mut self) {
        self.command(AudioCmd::Unload);
    }

    fn play(&mut self) {
        self.command(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.command(AudioCmd::Pause);
    }

    fn seek(&mut self, position: Duration) {
        if let Ok(mut info) = self.playback.lock() {
            info.elapsed = position;
        }
        self.command(AudioCmd::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.command(AudioCmd::SetVolume(volume));
    }

    fn set_playback_rate(&mut self, rate: f32) {
        self.command(AudioCmd::SetSpeed(rate));
    }

    fn current_time(&self) -> Duration {
        self.playback
            .lock()
            .map(|info| info.elapsed)
            .unwrap_or_default()
    }

    fn duration(&self) -> Option<Duration> {
        self.playback.lock().ok().and_then(|info| info.duration)
    }
}
