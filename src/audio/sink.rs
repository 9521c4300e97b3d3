//! Utilities for creating `rodio` sinks from `Track` values.
//!
//! Opening and decoding happen here; the decoded source is routed through
//! the shared graph before it reaches the sink.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::PlayerError;
use crate::library::Track;

use super::graph::AudioGraph;

pub(super) type FileDecoder = Decoder<BufReader<File>>;

pub(super) fn open_source(track: &Track) -> Result<FileDecoder, PlayerError> {
    let file = File::open(&track.source).map_err(|e| PlayerError::open(&track.source, e))?;
    Decoder::new(BufReader::new(file)).map_err(|e| PlayerError::decode(&track.source, e))
}

/// Create a paused `Sink` playing `track` through `graph`.
///
/// Returns the sink and the best known duration of the track.
pub(super) fn create_sink(
    stream: &OutputStream,
    graph: &AudioGraph,
    track: &Track,
    volume: f32,
    speed: f32,
) -> Result<(Sink, Option<Duration>), PlayerError> {
    let source = open_source(track)?;
    let duration = source.total_duration().or(track.duration);

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.set_speed(speed);
    sink.append(graph.connect(source));
    sink.pause();
    Ok((sink, duration))
}
