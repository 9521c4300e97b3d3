use std::path::PathBuf;
use std::time::Duration;

use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, layout::Rect};

use super::*;
use crate::app::EMPTY_QUEUE_TEXT;
use crate::audio::{AudioGraph, LoadId};
use crate::config::Settings;
use crate::library::Track;

/// Media element that accepts every command and never moves.
struct Silent;

impl MediaElement for Silent {
    fn load(&mut self, _track: &Track) -> LoadId {
        1
    }
    fn unload(&mut self) {}
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn seek(&mut self, _position: Duration) {}
    fn set_volume(&mut self, _volume: f32) {}
    fn set_playback_rate(&mut self, _rate: f32) {}
    fn current_time(&self) -> Duration {
        Duration::from_secs(65)
    }
    fn duration(&self) -> Option<Duration> {
        Some(Duration::from_secs(599))
    }
}

fn controller() -> Controller<Silent> {
    Controller::new(&Settings::default(), Silent, AudioGraph::new())
}

fn track(title: &str, artist: &str) -> Track {
    Track {
        source: PathBuf::from(format!("/music/{title}.mp3")),
        title: title.into(),
        artist: artist.into(),
        cover_art: None,
        duration: None,
    }
}

fn render(c: &Controller<Silent>, hits: &mut HitMap) -> (Buffer, Option<Rect>) {
    let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
    let mut canvas = None;
    terminal
        .draw(|f| {
            canvas = draw(f, c, hits);
        })
        .unwrap();
    (terminal.backend().buffer().clone(), canvas)
}

/// Column and row of the first occurrence of `needle`.
fn find(buf: &Buffer, needle: &str) -> Option<(u16, u16)> {
    let area = buf.area;
    for y in area.top()..area.bottom() {
        let row: Vec<&str> = (area.left()..area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect();
        let line = row.concat();
        if let Some(byte) = line.find(needle) {
            let col = line[..byte].chars().count() as u16;
            return Some((area.x + col, y));
        }
    }
    None
}

#[test]
fn empty_queue_shows_message_and_upload_prompt() {
    let mut c = controller();
    c.dispatch(Intent::ShowSection(Section::PlayQueue));
    let mut hits = HitMap::default();
    let (buf, canvas) = render(&c, &mut hits);

    assert!(find(&buf, EMPTY_QUEUE_TEXT).is_some());
    assert!(find(&buf, "[+ add songs]").is_some());
    assert!(canvas.is_none());
}

#[test]
fn upload_prompt_is_only_on_the_queue() {
    let mut c = controller();
    let mut hits = HitMap::default();
    for section in [Section::Home, Section::Explore, Section::Library, Section::Settings] {
        c.dispatch(Intent::ShowSection(section));
        let (buf, _) = render(&c, &mut hits);
        assert!(find(&buf, "[+ add songs]").is_none(), "{section:?}");
    }
}

#[test]
fn nav_labels_are_clickable() {
    let c = controller();
    let mut hits = HitMap::default();
    let (buf, _) = render(&c, &mut hits);

    let (x, y) = find(&buf, "Settings").unwrap();
    assert_eq!(
        hits.resolve(x + 1, y),
        Some(Intent::ShowSection(Section::Settings))
    );
}

#[test]
fn queue_rows_play_and_remove() {
    let mut c = controller();
    c.add_tracks(vec![track("Alpha", "X"), track("Beta", "Y")]);
    c.dispatch(Intent::ShowSection(Section::PlayQueue));

    let mut hits = HitMap::default();
    let (buf, _) = render(&c, &mut hits);

    let (x, y) = find(&buf, "Beta").unwrap();
    assert_eq!(hits.resolve(x, y), Some(Intent::PlayAt(1)));

    let (rx, ry) = find(&buf, "✕").unwrap();
    assert_eq!(hits.resolve(rx, ry), Some(Intent::RemoveAt(0)));
}

#[test]
fn player_bar_shows_progress_and_buttons() {
    let mut c = controller();
    c.add_tracks(vec![track("Alpha", "X")]);
    let mut hits = HitMap::default();
    let (buf, _) = render(&c, &mut hits);

    assert!(find(&buf, "1:05 / 9:59").is_some());
    assert!(find(&buf, "[no cover]").is_some());

    let (x, y) = find(&buf, "[pause]").unwrap();
    assert_eq!(hits.resolve(x, y), Some(Intent::TogglePlayPause));
    let (x, y) = find(&buf, "[shuffle]").unwrap();
    assert_eq!(hits.resolve(x, y), Some(Intent::ToggleShuffle));
}

#[test]
fn home_returns_canvas_only_when_visualizer_is_on() {
    let mut c = controller();
    let mut hits = HitMap::default();
    let (_, canvas) = render(&c, &mut hits);
    assert!(canvas.is_some_and(|r| r.width > 0 && r.height > 0));

    c.dispatch(Intent::ToggleVisualizer);
    let (buf, canvas) = render(&c, &mut hits);
    assert!(canvas.is_none());
    assert!(find(&buf, "Visualizer hidden").is_some());
}

#[test]
fn settings_reset_row_resets_eq() {
    let mut c = controller();
    c.dispatch(Intent::ShowSection(Section::Settings));
    let mut hits = HitMap::default();
    let (buf, _) = render(&c, &mut hits);

    assert!(find(&buf, "EQ 32 Hz").is_some());
    let (x, y) = find(&buf, "[reset]").unwrap();
    assert_eq!(hits.resolve(x, y), Some(Intent::ResetEq));
}
