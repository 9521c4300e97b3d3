use std::path::{Path, PathBuf};
use std::time::Duration;

use super::display::title_from_file_name;

/// Artist shown when a file carries no artist tag.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Shown in place of cover art when a track has none.
pub const PLACEHOLDER_COVER: &str = "[no cover]";

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub source: PathBuf,
    pub title: String,
    pub artist: String,
    pub cover_art: Option<PathBuf>,
    pub duration: Option<Duration>,
}

impl Track {
    /// Build a track from nothing but its path: title from the file name,
    /// unknown artist, placeholder cover.
    pub fn from_path(path: &Path) -> Self {
        let title = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(title_from_file_name)
            .unwrap_or_else(|| "Unknown Title".to_string());

        Self {
            source: path.to_path_buf(),
            title,
            artist: UNKNOWN_ARTIST.to_string(),
            cover_art: None,
            duration: None,
        }
    }

    /// Cover art locator for display, falling back to the placeholder.
    pub fn cover_label(&self) -> String {
        match &self.cover_art {
            Some(p) => p
                .file_name()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .unwrap_or_else(|| p.display().to_string()),
            None => PLACEHOLDER_COVER.to_string(),
        }
    }
}
