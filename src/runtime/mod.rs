use std::env;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::audio::{AudioGraph, AudioPlayer};
use crate::logging;
use crate::playback::Controller;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let paths = startup::cli_paths(env::args_os().skip(1));
    let (settings, settings_warning) = settings::load_settings();

    // Held until shutdown so buffered log lines are flushed.
    let (_log_guard, logging_warning) = logging::init_logging(&settings.logging);
    info!(version = env!("CARGO_PKG_VERSION"), "starting timbre");

    let graph = AudioGraph::new();
    let player = AudioPlayer::new(graph.clone());
    let mut controller = Controller::new(&settings, player, graph);

    for msg in [settings_warning, logging_warning].into_iter().flatten() {
        warn!("{msg}");
        controller.app_mut().status.push(msg);
    }
    startup::import_startup_paths(&mut controller, paths);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut controller);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    controller.media().quit();
    info!("shut down");

    run_result
}
