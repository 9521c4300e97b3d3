use std::collections::BTreeMap;

use super::model::Track;

/// Title used when a file has no title tag: the file name up to its first `.`.
///
/// Names that start with a dot keep their full name so they never become empty.
pub fn title_from_file_name(name: &str) -> String {
    match name.split('.').next() {
        Some(head) if !head.trim().is_empty() => head.to_string(),
        _ => name.to_string(),
    }
}

/// Tracks sharing an artist, in queue order.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistGroup {
    pub artist: String,
    pub indices: Vec<usize>,
}

/// Group queue indices by artist, artists sorted case-insensitively.
pub fn group_by_artist(tracks: &[Track]) -> Vec<ArtistGroup> {
    let mut groups: BTreeMap<String, ArtistGroup> = BTreeMap::new();

    for (i, track) in tracks.iter().enumerate() {
        groups
            .entry(track.artist.to_lowercase())
            .or_insert_with(|| ArtistGroup {
                artist: track.artist.clone(),
                indices: Vec::new(),
            })
            .indices
            .push(i);
    }

    groups.into_values().collect()
}
