use super::*;
use crate::config::LibrarySettings;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn track(title: &str, artist: &str) -> Track {
    Track {
        source: PathBuf::from(format!("/music/{title}.mp3")),
        title: title.into(),
        artist: artist.into(),
        cover_art: None,
        duration: None,
    }
}

#[test]
fn title_from_file_name_cuts_at_first_dot() {
    assert_eq!(title_from_file_name("song.mp3"), "song");
    assert_eq!(title_from_file_name("my.live.take.flac"), "my");
    assert_eq!(title_from_file_name("noext"), "noext");
    assert_eq!(title_from_file_name(".hidden.mp3"), ".hidden.mp3");
}

#[test]
fn track_from_path_uses_fallback_metadata() {
    let t = Track::from_path(Path::new("/tmp/Blue Monday.mp3"));
    assert_eq!(t.title, "Blue Monday");
    assert_eq!(t.artist, UNKNOWN_ARTIST);
    assert_eq!(t.cover_label(), PLACEHOLDER_COVER);
    assert!(t.duration.is_none());
}

#[test]
fn import_skips_non_audio_and_keeps_going() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.mp3");
    let notes = dir.path().join("notes.txt");
    let b = dir.path().join("b.ogg");
    fs::write(&a, b"not a real mp3").unwrap();
    fs::write(&notes, b"ignore me").unwrap();
    fs::write(&b, b"not a real ogg").unwrap();

    let report = import_paths(&[a, notes.clone(), b], &LibrarySettings::default());

    let titles: Vec<&str> = report.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b"]);
    assert_eq!(
        report.skipped,
        vec![(notes, SkipReason::NotAudio(Some("text/plain")))]
    );
}

#[test]
fn import_reports_missing_paths() {
    let dir = tempdir().unwrap();
    let ghost = dir.path().join("ghost.mp3");
    let report = import_paths(&[ghost.clone()], &LibrarySettings::default());
    assert!(report.tracks.is_empty());
    assert_eq!(report.skipped, vec![(ghost, SkipReason::Missing)]);
}

#[test]
fn import_walks_directories_in_name_order() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.MP3"), b"x").unwrap();
    fs::write(dir.path().join("a.flac"), b"x").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("c.wav"), b"x").unwrap();

    let report = import_paths(&[dir.path().to_path_buf()], &LibrarySettings::default());
    let titles: Vec<&str> = report.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
}

#[test]
fn import_respects_recursive_and_hidden_settings() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"x").unwrap();
    fs::write(dir.path().join(".secret.mp3"), b"x").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"x").unwrap();

    let settings = LibrarySettings {
        recursive: false,
        include_hidden: false,
        ..LibrarySettings::default()
    };
    let report = import_paths(&[dir.path().to_path_buf()], &settings);
    let titles: Vec<&str> = report.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["root"]);
}

#[test]
fn read_track_picks_up_sibling_cover() {
    let dir = tempdir().unwrap();
    let song = dir.path().join("song.mp3");
    fs::write(&song, b"x").unwrap();
    fs::write(dir.path().join("Cover.JPG"), b"img").unwrap();

    let t = read_track(&song);
    assert_eq!(t.cover_art, Some(dir.path().join("Cover.JPG")));
    assert_eq!(t.cover_label(), "Cover.JPG");
}

#[test]
fn group_by_artist_merges_case_insensitively() {
    let tracks = vec![
        track("One", "Zed"),
        track("Two", "abba"),
        track("Three", "ABBA"),
        track("Four", UNKNOWN_ARTIST),
    ];

    let groups = group_by_artist(&tracks);
    let summary: Vec<(&str, Vec<usize>)> = groups
        .iter()
        .map(|g| (g.artist.as_str(), g.indices.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![("abba", vec![1, 2]), (UNKNOWN_ARTIST, vec![3]), ("Zed", vec![0])]
    );
}
