use std::path::{Path, PathBuf};

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::mime::{is_audio, mime_type};
use super::model::Track;

const COVER_STEMS: &[&str] = &["cover", "folder", "front"];
const COVER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Not an `audio/*` file; carries the detected type when known.
    NotAudio(Option<&'static str>),
    Missing,
}

/// Outcome of importing a batch of paths.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub tracks: Vec<Track>,
    pub skipped: Vec<(PathBuf, SkipReason)>,
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Import every path in order. Directories are expanded (sorted by file
/// name); files that are not audio are recorded in `skipped` and the import
/// carries on.
pub fn import_paths(paths: &[PathBuf], settings: &LibrarySettings) -> ImportReport {
    let mut report = ImportReport::default();

    for path in paths {
        if path.is_dir() {
            import_dir(path, settings, &mut report);
        } else if path.is_file() {
            import_file(path, &mut report);
        } else {
            warn!(path = %path.display(), "import path does not exist");
            report.skipped.push((path.clone(), SkipReason::Missing));
        }
    }

    debug!(
        added = report.tracks.len(),
        skipped = report.skipped.len(),
        "import finished"
    );
    report
}

fn import_dir(dir: &Path, settings: &LibrarySettings, report: &mut ImportReport) {
    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();
    if !settings.recursive {
        walker = walker.max_depth(1);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        if entry.file_type().is_file() {
            import_file(entry.path(), report);
        }
    }
}

fn import_file(path: &Path, report: &mut ImportReport) {
    if is_audio(path) {
        report.tracks.push(read_track(path));
    } else {
        report
            .skipped
            .push((path.to_path_buf(), SkipReason::NotAudio(mime_type(path))));
    }
}

/// Build a `Track` for an audio file, preferring tag metadata over the
/// file-name fallback.
pub fn read_track(path: &Path) -> Track {
    let mut track = Track::from_path(path);
    track.cover_art = find_cover(path);

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            track.duration = Some(tagged.properties().duration());

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title().filter(|v| !v.trim().is_empty()) {
                    track.title = v.trim().to_string();
                }
                if let Some(v) = tag.artist().filter(|v| !v.trim().is_empty()) {
                    track.artist = v.trim().to_string();
                }
            }
        }
        Err(e) => debug!(path = %path.display(), error = %e, "no readable tags"),
    }

    track
}

/// Look for a conventional cover image next to the audio file.
fn find_cover(path: &Path) -> Option<PathBuf> {
    let dir = path.parent()?;
    let entries = std::fs::read_dir(dir).ok()?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            let stem = p.file_stem().and_then(|s| s.to_str()).map(str::to_ascii_lowercase);
            let ext = p.extension().and_then(|s| s.to_str()).map(str::to_ascii_lowercase);
            matches!((stem, ext), (Some(s), Some(e))
                if COVER_STEMS.contains(&s.as_str()) && COVER_EXTENSIONS.contains(&e.as_str()))
        })
        .collect();

    candidates.sort();
    candidates.into_iter().next()
}
