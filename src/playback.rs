//! Playback control: the intent-driven controller, its sleep timer and the
//! sequencing rules for next/previous.

mod controller;
mod intent;
mod timer;

pub use controller::Controller;
pub use intent::Intent;
pub use timer::{SleepTimer, next_sleep_choice};
