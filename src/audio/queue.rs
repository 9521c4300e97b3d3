//! The play queue: an ordered track list plus a cursor on the current track.
//!
//! The cursor is `None` only when nothing has been loaded yet or the queue is
//! empty; otherwise it always indexes a live track.

use crate::library::Track;

#[derive(Debug, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    current: Option<usize>,
}

/// What `Queue::remove_at` took out.
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    pub track: Track,
    /// The removed track was the one under the cursor.
    pub was_current: bool,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Point the cursor at `index`. Out-of-range indices are rejected.
    pub fn set_current(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i >= self.tracks.len() => false,
            _ => {
                self.current = index;
                true
            }
        }
    }

    /// Append to the end; the cursor never moves.
    pub fn append(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Remove the track at `index`, keeping the cursor on the same logical track.
    ///
    /// When the current track itself is removed the track that followed it
    /// takes its slot, wrapping to the first track if it was the last one.
    pub fn remove_at(&mut self, index: usize) -> Option<Removal> {
        if index >= self.tracks.len() {
            return None;
        }

        let track = self.tracks.remove(index);
        let was_current = self.current == Some(index);

        self.current = match self.current {
            _ if self.tracks.is_empty() => None,
            Some(cur) if cur == index => Some(if index < self.tracks.len() { index } else { 0 }),
            Some(cur) if cur > index => Some(cur - 1),
            other => other,
        };

        Some(Removal { track, was_current })
    }

    /// The index after the cursor, or `None` when that would run off the end.
    pub fn next_index(&self) -> Option<usize> {
        let next = self.current.map_or(0, |c| c + 1);
        (next < self.tracks.len()).then_some(next)
    }

    /// The index before the cursor, wrapping to the last track.
    pub fn prev_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        Some(match self.current {
            Some(c) if c > 0 => c - 1,
            _ => len - 1,
        })
    }
}
