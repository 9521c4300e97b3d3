//! Spectrum visualizer: a frame loop that samples the analyser and a widget
//! that paints one gradient bar per frequency bin.

mod renderer;
mod scheduler;
mod widget;

pub use renderer::{DisplayMode, Visualizer};
pub use scheduler::FrameScheduler;
pub use widget::{SpectrumWidget, bar_heights, gradient_color};
