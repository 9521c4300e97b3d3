use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{HitMap, InputMode, Section, SettingsField};
use crate::audio::{AudioPlayer, MediaElement};
use crate::config;
use crate::playback::{Controller, Intent};
use crate::ui;
use crate::visualizer::DisplayMode;

use super::startup::parse_typed_paths;

const VOLUME_STEP: f32 = 0.05;
const RATE_STEP: f32 = 0.25;
const EQ_STEP_DB: f32 = 1.0;

/// What the loop should do after handling an event.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main terminal event loop: drains audio notifications, advances timers,
/// draws, then waits for input no longer than the next scheduled piece of
/// work. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut Controller<AudioPlayer>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.ui.tick_ms.max(1));
    let mut hits = HitMap::default();

    loop {
        while let Some(event) = controller.media().try_event() {
            controller.dispatch(Intent::Media(event));
        }
        controller.tick(Instant::now());

        let mut canvas = None;
        terminal.draw(|f| canvas = ui::draw(f, controller, &mut hits))?;

        // The canvas follows its container.
        if let Some(area) = canvas {
            if controller.visualizer().size() != (area.width, area.height) {
                controller.resize_visualizer(area.width, area.height, Instant::now());
            }
        }

        let timeout = controller
            .next_wakeup(Instant::now())
            .map_or(tick, |d| d.min(tick));
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(controller, key) == Flow::Quit {
                    break;
                }
            }
            Event::Mouse(mouse) => handle_mouse(controller, &hits, mouse),
            Event::Paste(text) => handle_paste(controller, &text),
            _ => {}
        }
    }

    Ok(())
}

fn handle_mouse<M: MediaElement>(controller: &mut Controller<M>, hits: &HitMap, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(intent) = hits.resolve(mouse.column, mouse.row) {
                controller.dispatch(intent);
            }
        }
        MouseEventKind::ScrollDown => move_selection(controller, 1),
        MouseEventKind::ScrollUp => move_selection(controller, -1),
        _ => {}
    }
}

/// Pasted text (including paths dropped onto the terminal) feeds the add
/// prompt when it is open and is imported directly otherwise.
pub fn handle_paste<M: MediaElement>(controller: &mut Controller<M>, text: &str) {
    let view = &mut controller.app_mut().view;
    match view.input.clone() {
        InputMode::AddPath(mut buf) => {
            buf.push_str(text.trim_end());
            view.input = InputMode::AddPath(buf);
        }
        InputMode::Search => {
            for c in text.chars().filter(|c| !c.is_control()) {
                view.push_search_char(c);
            }
        }
        InputMode::Normal => {
            let paths = parse_typed_paths(text);
            if !paths.is_empty() {
                controller.dispatch(Intent::AddPaths(paths));
            }
        }
    }
}

fn move_selection<M: MediaElement>(controller: &mut Controller<M>, delta: isize) {
    match controller.app().view.section() {
        Section::PlayQueue => controller.app_mut().view.move_queue_selection(delta),
        Section::Explore => {
            let results = controller.app().search_results().len();
            controller.app_mut().view.move_search_selection(delta, results);
        }
        Section::Settings => controller.app_mut().view.move_settings_selection(delta),
        Section::Home | Section::Library => {}
    }
}

/// Map one key press to view edits and intents.
pub fn handle_key<M: MediaElement>(controller: &mut Controller<M>, key: KeyEvent) -> Flow {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Flow::Quit;
    }

    match controller.app().view.input.clone() {
        InputMode::AddPath(_) => handle_add_prompt_key(controller, key),
        InputMode::Search => handle_search_key(controller, key),
        InputMode::Normal => return handle_normal_key(controller, key),
    }
    Flow::Continue
}

fn handle_add_prompt_key<M: MediaElement>(controller: &mut Controller<M>, key: KeyEvent) {
    let input = &mut controller.app_mut().view.input;
    match key.code {
        KeyCode::Esc => *input = InputMode::Normal,
        KeyCode::Backspace => {
            if let InputMode::AddPath(buf) = input {
                buf.pop();
            }
        }
        KeyCode::Char(c) if !c.is_control() => {
            if let InputMode::AddPath(buf) = input {
                buf.push(c);
            }
        }
        KeyCode::Enter => {
            if let InputMode::AddPath(typed) = std::mem::take(input) {
                let paths = parse_typed_paths(&typed);
                if !paths.is_empty() {
                    controller.dispatch(Intent::AddPaths(paths));
                }
            }
        }
        _ => {}
    }
}

fn handle_search_key<M: MediaElement>(controller: &mut Controller<M>, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => controller.app_mut().view.input = InputMode::Normal,
        KeyCode::Enter => {
            controller.app_mut().view.input = InputMode::Normal;
            play_search_selection(controller);
        }
        KeyCode::Backspace => controller.app_mut().view.pop_search_char(),
        KeyCode::Down => move_selection(controller, 1),
        KeyCode::Up => move_selection(controller, -1),
        KeyCode::Char('n') if ctrl => move_selection(controller, 1),
        KeyCode::Char('p') if ctrl => move_selection(controller, -1),
        KeyCode::Char(c) if !c.is_control() && !ctrl => {
            controller.app_mut().view.push_search_char(c)
        }
        _ => {}
    }
}

fn play_search_selection<M: MediaElement>(controller: &mut Controller<M>) {
    let results = controller.app().search_results();
    if let Some(&index) = results.get(controller.app().view.search_selected) {
        controller.dispatch(Intent::PlayAt(index));
    }
}

fn handle_normal_key<M: MediaElement>(controller: &mut Controller<M>, key: KeyEvent) -> Flow {
    let section = controller.app().view.section();
    if handle_section_key(controller, section, key) {
        return Flow::Continue;
    }

    let seek = controller.app().seek_step.as_secs() as i64;
    let intent = match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Char(c @ '1'..='5') => {
            let i = c as usize - '1' as usize;
            Intent::ShowSection(Section::ALL[i])
        }
        KeyCode::Tab => Intent::ShowSection(section.next()),
        KeyCode::BackTab => Intent::ShowSection(section.prev()),
        KeyCode::Char(' ') | KeyCode::Char('p') => Intent::TogglePlayPause,
        KeyCode::Char('n') => Intent::Next,
        KeyCode::Char('b') => Intent::Previous,
        KeyCode::Char('s') => Intent::ToggleShuffle,
        KeyCode::Char('r') => Intent::ToggleRepeat,
        KeyCode::Char('m') => Intent::ToggleMute,
        KeyCode::Char('+') | KeyCode::Char('=') => Intent::AdjustVolume(VOLUME_STEP),
        KeyCode::Char('-') => Intent::AdjustVolume(-VOLUME_STEP),
        KeyCode::Char(',') => Intent::SeekBy(-seek),
        KeyCode::Char('.') => Intent::SeekBy(seek),
        KeyCode::Char('f') => Intent::ToggleFavorite,
        KeyCode::Char('v') => Intent::ToggleVisualizer,
        KeyCode::Char('z') => Intent::CycleSleepTimer { forward: true },
        _ => return Flow::Continue,
    };
    controller.dispatch(intent);
    Flow::Continue
}

/// Keys that only mean something in the current section. Returns whether
/// the key was consumed.
fn handle_section_key<M: MediaElement>(
    controller: &mut Controller<M>,
    section: Section,
    key: KeyEvent,
) -> bool {
    match (section, key.code) {
        (Section::PlayQueue | Section::Explore | Section::Settings, KeyCode::Char('j') | KeyCode::Down) => {
            move_selection(controller, 1)
        }
        (Section::PlayQueue | Section::Explore | Section::Settings, KeyCode::Char('k') | KeyCode::Up) => {
            move_selection(controller, -1)
        }

        (Section::PlayQueue, KeyCode::Char('a')) => {
            controller.app_mut().view.input = InputMode::AddPath(String::new());
        }
        (Section::PlayQueue, KeyCode::Enter) => {
            let selected = controller.app().view.queue_selected;
            if selected < controller.app().queue.len() {
                controller.dispatch(Intent::PlayAt(selected));
            }
        }
        (Section::PlayQueue, KeyCode::Char('d') | KeyCode::Delete) => {
            let selected = controller.app().view.queue_selected;
            controller.dispatch(Intent::RemoveAt(selected));
        }

        (Section::Explore, KeyCode::Char('/')) => {
            controller.app_mut().view.input = InputMode::Search;
        }
        (Section::Explore, KeyCode::Enter) => play_search_selection(controller),

        (Section::Settings, KeyCode::Char('h') | KeyCode::Left) => adjust_setting(controller, false),
        (Section::Settings, KeyCode::Char('l') | KeyCode::Right) => adjust_setting(controller, true),
        (Section::Settings, KeyCode::Enter) => match controller.app().view.settings_field() {
            SettingsField::Speed => controller.dispatch(Intent::SetPlaybackRate(1.0)),
            SettingsField::Band(band) => controller.dispatch(Intent::SetEqGain { band, gain_db: 0.0 }),
            _ => adjust_setting(controller, true),
        },
        (Section::Settings, KeyCode::Char('R')) => controller.dispatch(Intent::ResetEq),

        _ => return false,
    }
    true
}

fn adjust_setting<M: MediaElement>(controller: &mut Controller<M>, up: bool) {
    let sign = if up { 1.0 } else { -1.0 };
    let intent = match controller.app().view.settings_field() {
        SettingsField::Speed => Intent::AdjustPlaybackRate(sign * RATE_STEP),
        SettingsField::SleepTimer => Intent::CycleSleepTimer { forward: up },
        SettingsField::Visualizer => Intent::SetVisualizerDisplay(match controller.visualizer().display() {
            DisplayMode::Full => DisplayMode::Hidden,
            DisplayMode::Hidden => DisplayMode::Full,
        }),
        SettingsField::Band(band) => Intent::AdjustEqGain {
            band,
            delta_db: sign * EQ_STEP_DB,
        },
        SettingsField::ResetEq => Intent::ResetEq,
    };
    debug!(?intent, "settings adjust");
    controller.dispatch(intent);
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::audio::{AudioGraph, LoadId, MAX_GAIN_DB};
    use crate::config::Settings;
    use crate::library::Track;

    struct Silent;

    impl MediaElement for Silent {
        fn load(&mut self, _track: &Track) -> LoadId {
            1
        }
        fn unload(&mut self) {}
        fn play(&mut self) {}
        fn pause(&mut self) {}
        fn seek(&mut self, _position: Duration) {}
        fn set_volume(&mut self, _volume: f32) {}
        fn set_playback_rate(&mut self, _rate: f32) {}
        fn current_time(&self) -> Duration {
            Duration::ZERO
        }
        fn duration(&self) -> Option<Duration> {
            None
        }
    }

    fn controller() -> Controller<Silent> {
        Controller::new(&Settings::default(), Silent, AudioGraph::new())
    }

    fn press(c: &mut Controller<Silent>, code: KeyCode) -> Flow {
        handle_key(c, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn track(title: &str) -> Track {
        Track {
            source: PathBuf::from(format!("/music/{title}.mp3")),
            title: title.into(),
            artist: "Artist".into(),
            cover_art: None,
            duration: None,
        }
    }

    #[test]
    fn number_keys_switch_sections_and_q_quits() {
        let mut c = controller();
        assert_eq!(press(&mut c, KeyCode::Char('4')), Flow::Continue);
        assert_eq!(c.app().view.section(), Section::PlayQueue);
        press(&mut c, KeyCode::Tab);
        assert_eq!(c.app().view.section(), Section::Settings);
        assert_eq!(press(&mut c, KeyCode::Char('q')), Flow::Quit);
    }

    #[test]
    fn add_prompt_collects_text_until_enter() {
        let mut c = controller();
        press(&mut c, KeyCode::Char('4'));
        press(&mut c, KeyCode::Char('a'));
        for ch in "/nope".chars() {
            press(&mut c, KeyCode::Char(ch));
        }
        // Letters that are shortcuts elsewhere are plain text here.
        assert_eq!(c.app().view.input, InputMode::AddPath("/nope".into()));
        assert_eq!(c.app().view.section(), Section::PlayQueue);

        press(&mut c, KeyCode::Enter);
        assert_eq!(c.app().view.input, InputMode::Normal);
        assert_eq!(c.app().status.latest(), Some("File not found: /nope"));
    }

    #[test]
    fn queue_keys_play_and_remove_selection() {
        let mut c = controller();
        c.add_tracks(vec![track("a"), track("b"), track("c")]);
        press(&mut c, KeyCode::Char('4'));

        press(&mut c, KeyCode::Char('j'));
        press(&mut c, KeyCode::Enter);
        assert_eq!(c.app().queue.current(), Some(1));

        press(&mut c, KeyCode::Char('d'));
        assert_eq!(c.app().queue.len(), 2);
        assert_eq!(
            c.app().queue.current_track().map(|t| t.title.as_str()),
            Some("c")
        );
    }

    #[test]
    fn search_typing_does_not_trigger_shortcuts() {
        let mut c = controller();
        c.add_tracks(vec![track("alpha"), track("bravo")]);
        press(&mut c, KeyCode::Char('2'));
        press(&mut c, KeyCode::Char('/'));
        for ch in "brv".chars() {
            press(&mut c, KeyCode::Char(ch));
        }
        assert_eq!(c.app().view.search_query, "brv");
        assert!(!c.app().transport.repeat);

        press(&mut c, KeyCode::Enter);
        assert_eq!(c.app().queue.current(), Some(1));
        assert_eq!(c.app().view.input, InputMode::Normal);
    }

    #[test]
    fn settings_keys_adjust_focused_field() {
        let mut c = controller();
        press(&mut c, KeyCode::Char('5'));

        press(&mut c, KeyCode::Char('l'));
        assert_eq!(c.app().transport.rate(), 1.25);

        for _ in 0..3 {
            press(&mut c, KeyCode::Char('j'));
        }
        assert_eq!(c.app().view.settings_field(), SettingsField::Band(0));
        for _ in 0..20 {
            press(&mut c, KeyCode::Char('l'));
        }
        assert_eq!(c.graph().equalizer().gain(0), Some(MAX_GAIN_DB));

        press(&mut c, KeyCode::Char('R'));
        assert!(c.graph().equalizer().is_flat());
    }

    #[test]
    fn paste_in_normal_mode_imports() {
        let mut c = controller();
        handle_paste(&mut c, "'/missing/song.mp3'\n");
        assert_eq!(
            c.app().status.latest(),
            Some("File not found: /missing/song.mp3")
        );
    }
}
