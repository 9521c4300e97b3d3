use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, info, warn};

use crate::error::PlayerError;
use crate::library::Track;

use super::graph::AudioGraph;
use super::sink::create_sink;
use super::types::{AudioCmd, AudioEvent, LoadId, PlaybackHandle};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    playback_info: PlaybackHandle,
    graph: AudioGraph,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                error!(error = %e, "no audio output device; playback disabled");
                let _ = events.send(AudioEvent::Failed {
                    load: None,
                    error: PlayerError::Device(e.to_string()),
                });
                // Keep accepting commands so the UI never blocks on a dead channel.
                for cmd in rx {
                    if matches!(cmd, AudioCmd::Quit) {
                        break;
                    }
                }
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the TUI.
        stream.log_on_drop(false);

        let mut engine = Engine {
            stream,
            graph,
            events,
            playback_info,
            sink: None,
            load: None,
            playing: false,
            volume: 1.0,
            speed: 1.0,
        };

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(AudioCmd::Quit) => {
                    engine.unload();
                    break;
                }
                Ok(cmd) => engine.handle(cmd),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            engine.poll();
        }
        debug!("audio thread finished");
    })
}

/// State owned by the audio thread.
struct Engine {
    stream: OutputStream,
    graph: AudioGraph,
    events: Sender<AudioEvent>,
    playback_info: PlaybackHandle,
    sink: Option<Sink>,
    /// Id of the load that produced `sink`.
    load: Option<LoadId>,
    playing: bool,
    volume: f32,
    speed: f32,
}

impl Engine {
    fn handle(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::Load { id, track } => self.load(id, &track),
            AudioCmd::Unload => self.unload(),
            AudioCmd::Play => {
                if let Some(sink) = &self.sink {
                    self.graph.activate();
                    sink.play();
                    self.playing = true;
                }
            }
            AudioCmd::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                }
                self.playing = false;
            }
            AudioCmd::Seek(pos) => {
                if let Some(sink) = &self.sink {
                    if let Err(e) = sink.try_seek(pos) {
                        warn!(error = %e, ?pos, "seek failed");
                        self.emit(AudioEvent::Failed {
                            load: self.load,
                            error: PlayerError::Seek(e.to_string()),
                        });
                    }
                }
            }
            AudioCmd::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                if let Some(sink) = &self.sink {
                    sink.set_volume(self.volume);
                }
            }
            AudioCmd::SetSpeed(s) => {
                self.speed = s;
                if let Some(sink) = &self.sink {
                    sink.set_speed(s);
                }
            }
            AudioCmd::Quit => {}
        }
        self.publish();
    }

    fn load(&mut self, id: LoadId, track: &Track) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.playing = false;
        self.load = Some(id);

        match create_sink(&self.stream, &self.graph, track, self.volume, self.speed) {
            Ok((sink, duration)) => {
                info!(path = %track.source.display(), "loaded track");
                self.sink = Some(sink);
                if let Ok(mut info) = self.playback_info.lock() {
                    info.duration = duration;
                }
                self.emit(AudioEvent::Loaded { load: id, duration });
            }
            Err(e) => {
                warn!(error = %e, "could not load track");
                self.graph.disconnect();
                if let Ok(mut info) = self.playback_info.lock() {
                    info.duration = None;
                }
                self.emit(AudioEvent::Failed {
                    load: Some(id),
                    error: e,
                });
            }
        }
    }

    fn unload(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.playing = false;
        self.load = None;
        self.graph.disconnect();
        if let Ok(mut info) = self.playback_info.lock() {
            info.duration = None;
            info.elapsed = Duration::ZERO;
        }
    }

    /// Publish position and detect natural end of the playing source.
    fn poll(&mut self) {
        if self.playing && self.sink.as_ref().is_some_and(Sink::empty) {
            self.playing = false;
            if let Some(load) = self.load {
                debug!(load, "track ended");
                self.emit(AudioEvent::Ended { load });
            }
        }
        self.publish();
    }

    fn publish(&self) {
        if let Some(sink) = &self.sink {
            if let Ok(mut info) = self.playback_info.lock() {
                info.elapsed = sink.get_pos();
            }
        }
    }

    fn emit(&self, event: AudioEvent) {
        let _ = self.events.send(event);
    }
}
