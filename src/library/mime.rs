//! Extension-based media type lookup.
//!
//! Only `audio/*` types are accepted into the queue; the other entries exist
//! so skipped files can be reported with a meaningful type.

use std::path::Path;

const MIME_TABLE: &[(&str, &str)] = &[
    ("mp3", "audio/mpeg"),
    ("flac", "audio/flac"),
    ("wav", "audio/wav"),
    ("wave", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("oga", "audio/ogg"),
    ("opus", "audio/opus"),
    ("m4a", "audio/mp4"),
    ("aac", "audio/aac"),
    ("aif", "audio/aiff"),
    ("aiff", "audio/aiff"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("txt", "text/plain"),
    ("pdf", "application/pdf"),
    ("mp4", "video/mp4"),
    ("mkv", "video/x-matroska"),
];

/// Look up the media type of `path` by its extension (case-insensitive).
pub fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    MIME_TABLE
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

pub fn is_audio(path: &Path) -> bool {
    mime_type(path).is_some_and(|m| m.starts_with("audio/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_types_are_recognized_case_insensitively() {
        assert!(is_audio(Path::new("/tmp/a.mp3")));
        assert!(is_audio(Path::new("/tmp/a.MP3")));
        assert!(is_audio(Path::new("/tmp/a.flac")));
        assert!(is_audio(Path::new("a.opus")));
        assert_eq!(mime_type(Path::new("a.Ogg")), Some("audio/ogg"));
    }

    #[test]
    fn non_audio_and_unknown_types_are_rejected() {
        assert!(!is_audio(Path::new("/tmp/cover.jpg")));
        assert!(!is_audio(Path::new("/tmp/clip.mp4")));
        assert!(!is_audio(Path::new("/tmp/notes")));
        assert_eq!(mime_type(Path::new("x.weird")), None);
        assert_eq!(mime_type(Path::new("cover.PNG")), Some("image/png"));
    }
}
