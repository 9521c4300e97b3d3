use std::collections::VecDeque;

use tracing::info;

const HISTORY_LEN: usize = 50;

/// User-facing messages. Every message is logged and the latest one is
/// shown on the status line.
#[derive(Debug, Default)]
pub struct StatusLog {
    history: VecDeque<String>,
}

impl StatusLog {
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!(target: "timbre::status", "{message}");
        if self.history.len() >= HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(message);
    }

    pub fn latest(&self) -> Option<&str> {
        self.history.back().map(String::as_str)
    }

    /// Messages, oldest first.
    #[cfg(test)]
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }
}
