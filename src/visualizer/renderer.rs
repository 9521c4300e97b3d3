use std::time::{Duration, Instant};

use tracing::debug;

use crate::audio::{Analyser, AudioGraph, BIN_COUNT};

use super::scheduler::FrameScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Full,
    Hidden,
}

/// The bins painted by the most recent frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpectrumFrame {
    pub bins: Vec<u8>,
}

impl Default for SpectrumFrame {
    fn default() -> Self {
        Self {
            bins: vec![0; BIN_COUNT],
        }
    }
}

/// Visualizer state: whether it is on, the frame loop and the last frame.
#[derive(Debug)]
pub struct Visualizer {
    active: bool,
    display: DisplayMode,
    scheduler: FrameScheduler,
    frame: SpectrumFrame,
    size: (u16, u16),
    frames_drawn: u64,
}

impl Visualizer {
    pub fn new(display: DisplayMode, frame_interval: Duration) -> Self {
        Self {
            active: display == DisplayMode::Full,
            display,
            scheduler: FrameScheduler::new(frame_interval),
            frame: SpectrumFrame::default(),
            size: (0, 0),
            frames_drawn: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn display(&self) -> DisplayMode {
        self.display
    }

    pub fn frame(&self) -> &SpectrumFrame {
        &self.frame
    }

    #[cfg(test)]
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.pending().is_some()
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Begin the frame loop. Does nothing while the visualizer is off.
    pub fn start(&mut self, now: Instant, graph: &AudioGraph) {
        if !self.active {
            return;
        }
        graph.activate();
        if !self.is_running() {
            debug!("visualizer loop started");
        }
        self.scheduler.request_immediate(now);
    }

    /// Cancel the pending frame. Idempotent.
    pub fn stop(&mut self) {
        if self.scheduler.cancel() {
            debug!(frames = self.frames_drawn, "visualizer loop stopped");
        }
    }

    pub fn set_active(&mut self, active: bool, now: Instant, playing: bool, graph: &AudioGraph) {
        self.active = active;
        if !active {
            self.stop();
            self.frame = SpectrumFrame::default();
        } else if playing {
            self.start(now, graph);
        }
    }

    pub fn toggle(&mut self, now: Instant, playing: bool, graph: &AudioGraph) {
        self.set_active(!self.active, now, playing, graph);
    }

    pub fn set_display(&mut self, mode: DisplayMode, now: Instant, playing: bool, graph: &AudioGraph) {
        self.display = mode;
        self.set_active(mode == DisplayMode::Full, now, playing, graph);
    }

    /// Run one step of the loop. Returns whether a new frame was drawn.
    ///
    /// The loop ends itself once playback stops or the visualizer is turned off.
    pub fn tick(&mut self, now: Instant, playing: bool, analyser: &Analyser) -> bool {
        if !self.active || !playing {
            self.stop();
            return false;
        }
        if self.scheduler.take_due(now).is_none() {
            return false;
        }

        self.frame.bins = analyser.byte_frequency_data();
        self.frames_drawn += 1;
        self.scheduler.request(now);
        true
    }

    /// Follow the canvas size; a visible, playing visualizer redraws at once.
    pub fn resize(&mut self, width: u16, height: u16, now: Instant, playing: bool) {
        if self.size == (width, height) {
            return;
        }
        self.size = (width, height);
        if self.active && playing {
            self.scheduler.request_immediate(now);
        }
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }
}
