use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use tracing::info;

use crate::audio::MediaElement;
use crate::playback::{Controller, Intent};

/// Positional arguments are files or directories to queue.
pub fn cli_paths(args: impl IntoIterator<Item = OsString>) -> Vec<PathBuf> {
    args.into_iter().map(PathBuf::from).collect()
}

/// Turn text typed or pasted into the add prompt into paths: one per line,
/// surrounding quotes stripped, `~/` expanded.
pub fn parse_typed_paths(text: &str) -> Vec<PathBuf> {
    text.lines()
        .map(str::trim)
        .map(|s| s.trim_matches(|c| c == '\'' || c == '"'))
        .filter(|s| !s.is_empty())
        .map(expand_home)
        .collect()
}

fn expand_home(s: &str) -> PathBuf {
    match (s.strip_prefix("~/"), env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(s),
    }
}

/// Queue everything named on the command line.
pub fn import_startup_paths<M: MediaElement>(controller: &mut Controller<M>, paths: Vec<PathBuf>) {
    if paths.is_empty() {
        return;
    }
    info!(count = paths.len(), "importing startup paths");
    controller.dispatch(Intent::AddPaths(paths));
}
