use std::path::PathBuf;

use ratatui::layout::Rect;

use super::*;
use crate::audio::Queue;
use crate::config::{SectionSetting, Settings};
use crate::library::Track;
use crate::playback::Intent;

fn t(title: &str, artist: &str) -> Track {
    Track {
        source: PathBuf::from(format!("/music/{title}.mp3")),
        title: title.into(),
        artist: artist.into(),
        cover_art: None,
        duration: None,
    }
}

#[test]
fn fuzzy_match_simple() {
    let title = "Hello World";
    assert!(App::fuzzy_match_positions(title, "hw").is_some());
    assert!(App::fuzzy_match_positions(title, "ello").is_some());
    assert!(App::fuzzy_match_positions(title, "xyz").is_none());
}

#[test]
fn fuzzy_match_reports_positions() {
    assert_eq!(
        App::fuzzy_match_positions("Abba - Waterloo", "aw"),
        Some(vec![0, 7])
    );
    assert_eq!(App::fuzzy_match_positions("anything", ""), Some(vec![]));
}

#[test]
fn search_matches_artist_and_title() {
    let mut app = App::new(&Settings::default());
    app.queue.append(t("Waterloo", "ABBA"));
    app.queue.append(t("Heroes", "Bowie"));
    app.queue.append(t("Fernando", "ABBA"));

    app.view.search_query = "abba".into();
    assert_eq!(app.search_results(), vec![0, 2]);

    app.view.search_query = "hrs".into();
    assert_eq!(app.search_results(), vec![1]);

    app.view.search_query = "  ".into();
    assert_eq!(app.search_results(), vec![0, 1, 2]);
}

#[test]
fn app_takes_startup_settings() {
    let mut settings = Settings::default();
    settings.playback.shuffle = true;
    settings.ui.start_section = SectionSetting::Queue;

    let app = App::new(&settings);
    assert!(app.transport.shuffle);
    assert!(!app.transport.repeat);
    assert_eq!(app.view.section(), Section::PlayQueue);
    assert_eq!(app.transport.state, PlaybackState::Stopped);
    assert!(app.status.latest().is_none());
}

#[test]
fn mute_remembers_previous_volume() {
    let mut tr = Transport::new(0.3, 1.0);
    assert_eq!(tr.volume_level(), VolumeLevel::Low);

    assert_eq!(tr.toggle_mute(), 0.0);
    assert!(tr.is_muted());
    assert_eq!(tr.volume_level(), VolumeLevel::Muted);

    assert_eq!(tr.toggle_mute(), 0.3);
    tr.set_volume(0.5);
    assert_eq!(tr.volume_level(), VolumeLevel::High);
}

#[test]
fn unmuting_from_zero_start_restores_full_volume() {
    let mut tr = Transport::new(0.0, 1.0);
    assert!(tr.is_muted());
    assert_eq!(tr.toggle_mute(), 1.0);
}

#[test]
fn rate_is_kept_in_range() {
    let mut tr = Transport::default();
    assert_eq!(tr.set_rate(0.1), 0.5);
    assert_eq!(tr.set_rate(3.0), 2.0);
    assert_eq!(tr.set_rate(f32::NAN), 1.0);
    assert_eq!(tr.set_rate(1.25), 1.25);
    assert_eq!(tr.set_volume(1.7), 1.0);
}

#[test]
fn only_one_section_is_shown() {
    let mut view = View::new(Section::Home);
    assert!(view.is_nav_highlighted(Section::Home));
    assert!(!view.show_section(Section::Home));

    assert!(view.show_section(Section::PlayQueue));
    let highlighted: Vec<Section> = Section::ALL
        .into_iter()
        .filter(|s| view.is_nav_highlighted(*s))
        .collect();
    assert_eq!(highlighted, vec![Section::PlayQueue]);
    assert!(view.upload_visible());

    for section in [Section::Home, Section::Explore, Section::Library, Section::Settings] {
        view.show_section(section);
        assert!(!view.upload_visible());
    }
}

#[test]
fn leaving_a_section_cancels_text_input() {
    let mut view = View::new(Section::PlayQueue);
    view.input = InputMode::AddPath("/tmp".into());
    view.show_section(Section::Explore);
    assert_eq!(view.input, InputMode::Normal);
}

#[test]
fn sections_cycle_in_nav_order() {
    assert_eq!(Section::Home.next(), Section::Explore);
    assert_eq!(Section::Settings.next(), Section::Home);
    assert_eq!(Section::Home.prev(), Section::Settings);
    assert_eq!(Section::PlayQueue.label(), "Play Queue");
    assert_eq!(Section::Library.label(), "Your Library");
}

#[test]
fn render_queue_marks_only_the_current_row() {
    let mut queue = Queue::new();
    queue.append(t("a", "x"));
    queue.append(t("b", "y"));
    queue.append(t("c", "z"));
    queue.set_current(Some(1));

    let mut view = View::new(Section::PlayQueue);
    view.render_queue(&queue);

    let rows = view.queue_rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows.iter().filter(|r| r.active).map(|r| r.index).collect::<Vec<_>>(),
        vec![1]
    );
    assert_eq!(rows[2].artist, "z");
    assert_eq!(rows[0].cover, crate::library::PLACEHOLDER_COVER);
    assert_eq!(view.queue_renders(), 1);
}

#[test]
fn queue_selection_stays_on_existing_rows() {
    let mut queue = Queue::new();
    queue.append(t("a", "x"));
    queue.append(t("b", "x"));

    let mut view = View::new(Section::PlayQueue);
    view.render_queue(&queue);
    view.move_queue_selection(5);
    assert_eq!(view.queue_selected, 1);

    queue.remove_at(1);
    view.render_queue(&queue);
    assert_eq!(view.queue_selected, 0);

    view.move_queue_selection(-3);
    assert_eq!(view.queue_selected, 0);
}

#[test]
fn settings_fields_cover_every_band() {
    assert_eq!(SettingsField::at(0), SettingsField::Speed);
    assert_eq!(SettingsField::at(2), SettingsField::Visualizer);
    assert_eq!(SettingsField::at(3), SettingsField::Band(0));
    assert_eq!(SettingsField::at(12), SettingsField::Band(9));
    assert_eq!(SettingsField::at(13), SettingsField::ResetEq);

    let mut view = View::new(Section::Settings);
    view.move_settings_selection(100);
    assert_eq!(view.settings_field(), SettingsField::ResetEq);
}

#[test]
fn remove_control_wins_over_its_row() {
    let mut hits = HitMap::default();
    hits.add_row(Rect::new(0, 5, 40, 1), 2);
    hits.add_remove(Rect::new(36, 5, 3, 1), 2);

    assert_eq!(hits.resolve(37, 5), Some(Intent::RemoveAt(2)));
    assert_eq!(hits.resolve(3, 5), Some(Intent::PlayAt(2)));
    assert_eq!(hits.resolve(3, 6), None);
}

#[test]
fn nav_and_buttons_resolve_to_intents() {
    let mut hits = HitMap::default();
    hits.add_nav(Rect::new(0, 0, 10, 1), Section::Library);
    hits.add_button(Rect::new(20, 20, 3, 1), Intent::Next);

    assert_eq!(hits.resolve(4, 0), Some(Intent::ShowSection(Section::Library)));
    assert_eq!(hits.resolve(21, 20), Some(Intent::Next));

    hits.clear();
    assert_eq!(hits.resolve(4, 0), None);
}

#[test]
fn status_log_keeps_recent_history() {
    let mut log = StatusLog::default();
    for i in 0..60 {
        log.push(format!("msg {i}"));
    }
    assert_eq!(log.latest(), Some("msg 59"));
    assert_eq!(log.history().count(), 50);
    assert_eq!(log.history().next(), Some("msg 10"));
}
