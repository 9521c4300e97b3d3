//! File logging. The terminal belongs to the UI, so every `tracing` event
//! goes to a daily rolling file instead.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_log_dir};

const LOG_FILE: &str = "timbre.log";

/// Where the log file goes: the configured directory, else the state dir.
pub fn log_dir(settings: &LoggingSettings) -> Option<PathBuf> {
    settings.directory.clone().or_else(default_log_dir)
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
///
/// The returned guard flushes pending lines on drop and must be held for
/// the life of the program. Without a guard logging stays off, which never
/// stops the player from starting; the second value then says why, for the
/// status line.
pub fn init_logging(settings: &LoggingSettings) -> (Option<WorkerGuard>, Option<String>) {
    let Some(dir) = log_dir(settings) else {
        return (None, Some("logging disabled: no log directory".to_string()));
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        return (
            None,
            Some(format!("logging disabled: cannot create {}: {e}", dir.display())),
        );
    }

    let file_appender = tracing_appender::rolling::daily(&dir, LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        return (None, Some(format!("logging disabled: {e}")));
    }

    (Some(guard), None)
}
