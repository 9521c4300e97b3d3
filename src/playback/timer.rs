use std::time::{Duration, Instant};

/// Minutes offered by the sleep timer selector; 0 means off.
pub const SLEEP_TIMER_CHOICES: [u64; 6] = [0, 5, 10, 15, 30, 60];

/// One-shot deadline after which playback pauses.
#[derive(Debug, Default)]
pub struct SleepTimer {
    deadline: Option<Instant>,
}

impl SleepTimer {
    /// Arm the timer, replacing any pending deadline. Returns the replaced one.
    pub fn set(&mut self, after: Duration, now: Instant) -> Option<Instant> {
        self.deadline.replace(now + after)
    }

    /// Disarm the timer. Returns whether one was pending.
    pub fn clear(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    #[cfg(test)]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// True exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Step through `SLEEP_TIMER_CHOICES` from `current`, wrapping at both ends.
pub fn next_sleep_choice(current: u64, forward: bool) -> u64 {
    let len = SLEEP_TIMER_CHOICES.len();
    let pos = SLEEP_TIMER_CHOICES
        .iter()
        .position(|m| *m == current)
        .unwrap_or(0);
    let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
    SLEEP_TIMER_CHOICES[next]
}
