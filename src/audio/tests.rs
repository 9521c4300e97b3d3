use std::f32::consts::PI;
use std::path::PathBuf;

use rodio::Source;
use rodio::buffer::SamplesBuffer;

use super::*;
use crate::library::Track;

fn t(title: &str) -> Track {
    Track {
        source: PathBuf::from(format!("/music/{title}.mp3")),
        title: title.into(),
        artist: "Artist".into(),
        cover_art: None,
        duration: None,
    }
}

fn queue_of(titles: &[&str]) -> Queue {
    let mut q = Queue::new();
    for title in titles {
        q.append(t(title));
    }
    q
}

fn current_title(q: &Queue) -> Option<&str> {
    q.current_track().map(|t| t.title.as_str())
}

fn sine(freq: f32, sample_rate: u32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|n| (2.0 * PI * freq * n as f32 / sample_rate as f32).sin())
        .collect()
}

#[test]
fn append_never_moves_cursor() {
    let mut q = queue_of(&["a"]);
    assert_eq!(q.current(), None);
    q.append(t("b"));
    assert_eq!(q.current(), None);

    q.set_current(Some(1));
    q.append(t("c"));
    assert_eq!(q.current(), Some(1));
    assert_eq!(q.len(), 3);
}

#[test]
fn set_current_rejects_out_of_range() {
    let mut q = queue_of(&["a", "b"]);
    assert!(!q.set_current(Some(2)));
    assert_eq!(q.current(), None);
    assert!(q.set_current(Some(1)));
    assert!(q.set_current(None));
}

#[test]
fn removing_current_track_lets_follower_take_the_slot() {
    let mut q = queue_of(&["a", "b", "c"]);
    q.set_current(Some(1));

    let removal = q.remove_at(1).unwrap();
    assert!(removal.was_current);
    assert_eq!(removal.track.title, "b");
    assert_eq!(q.current(), Some(1));
    assert_eq!(current_title(&q), Some("c"));
}

#[test]
fn removing_current_last_track_wraps_to_first() {
    let mut q = queue_of(&["a", "b", "c"]);
    q.set_current(Some(2));
    q.remove_at(2);
    assert_eq!(q.current(), Some(0));
    assert_eq!(current_title(&q), Some("a"));
}

#[test]
fn removing_only_track_empties_queue() {
    let mut q = queue_of(&["a"]);
    q.set_current(Some(0));
    let removal = q.remove_at(0).unwrap();
    assert!(removal.was_current);
    assert!(q.is_empty());
    assert_eq!(q.current(), None);
}

#[test]
fn removing_other_tracks_keeps_cursor_on_same_track() {
    let mut q = queue_of(&["a", "b", "c", "d"]);
    q.set_current(Some(2));

    let removal = q.remove_at(0).unwrap();
    assert!(!removal.was_current);
    assert_eq!(q.current(), Some(1));
    assert_eq!(current_title(&q), Some("c"));

    q.remove_at(2);
    assert_eq!(q.current(), Some(1));
    assert_eq!(current_title(&q), Some("c"));

    assert!(q.remove_at(10).is_none());
    assert_eq!(q.len(), 2);
}

#[test]
fn next_and_prev_indices() {
    let mut q = queue_of(&["a", "b", "c"]);
    assert_eq!(q.next_index(), Some(0));
    assert_eq!(q.prev_index(), Some(2));

    q.set_current(Some(0));
    assert_eq!(q.next_index(), Some(1));
    assert_eq!(q.prev_index(), Some(2));

    q.set_current(Some(2));
    assert_eq!(q.next_index(), None);
    assert_eq!(q.prev_index(), Some(1));

    assert_eq!(Queue::new().prev_index(), None);
}

#[test]
fn equalizer_clamps_and_resets() {
    let mut eq = Equalizer::default();
    assert!(eq.is_flat());
    assert_eq!(eq.set_gain(0, 20.0), Some(MAX_GAIN_DB));
    assert_eq!(eq.set_gain(9, -30.0), Some(-MAX_GAIN_DB));
    assert_eq!(eq.set_gain(4, 3.5), Some(3.5));
    assert_eq!(eq.set_gain(BAND_COUNT, 1.0), None);
    assert_eq!(eq.set_gain(1, f32::NAN), Some(0.0));
    assert!(!eq.is_flat());

    eq.reset();
    assert!(eq.is_flat());
}

#[test]
fn band_labels_follow_frequencies() {
    let labels: Vec<String> = (0..BAND_COUNT).map(band_label).collect();
    assert_eq!(
        labels,
        vec!["32", "64", "125", "250", "500", "1k", "2k", "4k", "8k", "16k"]
    );
}

#[test]
fn graph_builds_once_and_resumes_after_suspend() {
    let graph = AudioGraph::new();
    assert_eq!(graph.state(), GraphState::Idle);
    assert_eq!(graph.build_count(), 0);

    graph.activate();
    graph.activate();
    assert_eq!(graph.state(), GraphState::Running);
    assert_eq!(graph.build_count(), 1);

    graph.suspend();
    assert_eq!(graph.state(), GraphState::Suspended);
    graph.activate();
    assert_eq!(graph.state(), GraphState::Running);
    assert_eq!(graph.build_count(), 1);
}

#[test]
fn connecting_new_sources_does_not_rebuild_chain() {
    let graph = AudioGraph::new();
    let _first = graph.connect(SamplesBuffer::new(2, 44_100, vec![0.0f32; 64]));
    let _second = graph.connect(SamplesBuffer::new(1, 48_000, vec![0.0f32; 64]));
    assert_eq!(graph.build_count(), 1);
    assert_eq!(graph.state(), GraphState::Running);
}

#[test]
fn replaced_source_is_disconnected() {
    let graph = AudioGraph::new();
    let mut first = graph.connect(SamplesBuffer::new(1, 44_100, vec![0.5f32; 8]));
    assert!(first.next().is_some());

    let mut second = graph.connect(SamplesBuffer::new(1, 44_100, vec![0.25f32; 8]));
    assert!(first.next().is_none());
    assert!(second.next().is_some());

    graph.disconnect();
    assert!(second.next().is_none());
}

#[test]
fn suspended_graph_holds_source_and_outputs_silence() {
    let graph = AudioGraph::new();
    let mut src = graph.connect(SamplesBuffer::new(1, 44_100, vec![0.5f32; 4]));
    assert!(src.next().is_some_and(|s| (s - 0.5).abs() < 1e-3));

    graph.suspend();
    assert_eq!(src.next(), Some(0.0));
    assert_eq!(src.next(), Some(0.0));

    graph.activate();
    assert_eq!(src.count(), 3);
}

#[test]
fn flat_chain_is_transparent() {
    let graph = AudioGraph::new();
    let input = sine(440.0, 44_100, 2048);
    let output: Vec<f32> = graph
        .connect(SamplesBuffer::new(1, 44_100, input.clone()))
        .collect();

    assert_eq!(output.len(), input.len());
    for (a, b) in input.iter().zip(output.iter()) {
        assert!((a - b).abs() < 1e-3, "{a} vs {b}");
    }
}

#[test]
fn boosted_band_changes_the_signal() {
    let graph = AudioGraph::new();
    assert_eq!(graph.set_gain(2, 12.0), Some(12.0));
    assert_eq!(graph.equalizer().gain(2), Some(12.0));

    let input = sine(125.0, 44_100, 8192);
    let output: Vec<f32> = graph
        .connect(SamplesBuffer::new(1, 44_100, input.clone()))
        .collect();

    let peak_in = input[4096..].iter().fold(0.0f32, |m, s| m.max(s.abs()));
    let peak_out = output[4096..].iter().fold(0.0f32, |m, s| m.max(s.abs()));
    assert!(peak_out > peak_in * 2.0, "in {peak_in}, out {peak_out}");

    graph.reset_gains();
    assert!(graph.equalizer().is_flat());
}

#[test]
fn graph_source_preserves_format() {
    let graph = AudioGraph::new();
    let src = graph.connect(SamplesBuffer::new(2, 48_000, vec![0.0f32; 96_000]));
    assert_eq!(src.channels(), 2);
    assert_eq!(src.sample_rate(), 48_000);
    assert_eq!(src.total_duration(), Some(std::time::Duration::from_secs(1)));
}

#[test]
fn analyser_is_silent_without_signal() {
    let analyser = Analyser::new();
    let data = analyser.byte_frequency_data();
    assert_eq!(data.len(), BIN_COUNT);
    assert!(data.iter().all(|b| *b == 0));
}

#[test]
fn analyser_peaks_at_the_tone_bin() {
    let graph = AudioGraph::new();
    // Bin 8 of a 256-point FFT at 44.1 kHz.
    let freq = 8.0 * 44_100.0 / FFT_SIZE as f32;
    let source = graph.connect(SamplesBuffer::new(1, 44_100, sine(freq, 44_100, 1024)));
    source.for_each(drop);

    let data = graph.analyser().byte_frequency_data();
    let peak = data.iter().copied().max().unwrap();
    assert_eq!(data[8], peak);
    assert!(peak > 200);
    assert!(data[64] < 64);
}
