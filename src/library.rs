//! Track import: turns user-supplied paths into queueable `Track`s.
//!
//! Directories are walked, non-audio files are reported and skipped, and
//! title/artist come from tags when present.

mod display;
mod mime;
mod model;
mod scan;

pub use display::{group_by_artist, title_from_file_name};
pub use model::*;
pub use scan::{SkipReason, import_paths, read_track};

#[cfg(test)]
mod tests;
