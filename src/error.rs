//! Error type shared by the audio, library and config layers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlayerError {
    #[error("could not open {path}: {reason}")]
    Open { path: PathBuf, reason: String },
    #[error("could not decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("audio device error: {0}")]
    Device(String),
    #[error("seek failed: {0}")]
    Seek(String),
    #[error("invalid config: {0}")]
    Config(String),
}

impl PlayerError {
    pub fn open(path: impl Into<PathBuf>, err: impl ToString) -> Self {
        Self::Open {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    pub fn decode(path: impl Into<PathBuf>, err: impl ToString) -> Self {
        Self::Decode {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}
