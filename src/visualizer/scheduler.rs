use std::time::{Duration, Instant};

/// A scheduled frame. Ids increase monotonically so a stale handle can be
/// told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle {
    pub id: u64,
    pub due: Instant,
}

/// Holds at most one pending frame; the loop re-arms itself after each
/// frame is taken, so it can never run ahead of rendering.
#[derive(Debug)]
pub struct FrameScheduler {
    interval: Duration,
    pending: Option<FrameHandle>,
    next_id: u64,
}

impl FrameScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
            next_id: 0,
        }
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Schedule the next frame one interval from `now`. A frame that is
    /// already pending is kept as is.
    pub fn request(&mut self, now: Instant) -> FrameHandle {
        self.schedule(now + self.interval)
    }

    /// Schedule a frame for `now`, pulling an already pending one forward.
    pub fn request_immediate(&mut self, now: Instant) -> FrameHandle {
        if let Some(handle) = self.pending.as_mut() {
            handle.due = handle.due.min(now);
            return *handle;
        }
        self.schedule(now)
    }

    fn schedule(&mut self, due: Instant) -> FrameHandle {
        if let Some(handle) = self.pending {
            return handle;
        }
        self.next_id += 1;
        let handle = FrameHandle {
            id: self.next_id,
            due,
        };
        self.pending = Some(handle);
        handle
    }

    /// Drop the pending frame. Safe to call any number of times; returns
    /// whether something was actually cancelled.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Take the pending frame if it is due.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameHandle> {
        match self.pending {
            Some(handle) if handle.due <= now => self.pending.take(),
            _ => None,
        }
    }

    /// Time left until the pending frame is due, zero if overdue.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|h| h.due.saturating_duration_since(now))
    }
}
