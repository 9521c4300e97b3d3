//! Application module: the state owned by the controller and read by the UI.
//!
//! `App` in `app::model` gathers the queue, transport and session flags;
//! `app::view` holds section/navigation state and mouse hit-testing;
//! `app::status` is the user-facing message channel.

mod model;
mod status;
mod view;

pub use model::*;
pub use status::StatusLog;
pub use view::*;

#[cfg(test)]
mod tests;
