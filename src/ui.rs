//! UI rendering helpers for the terminal user interface.
//!
//! `draw` paints one frame from the controller's state using `ratatui` and
//! records every clickable region in a `HitMap`, so the event loop can turn a
//! mouse click back into an `Intent`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::{HitMap, InputMode, Section, VolumeLevel};
use crate::audio::MediaElement;
use crate::playback::{Controller, Intent};

mod format;
mod sections;

pub use format::{format_time, progress_ratio, progress_text};

const ACCENT: Color = Color::Rgb(0x00, 0xbf, 0xff);

/// Key hints for the footer. Section-specific keys come first.
fn controls_text(section: Section, input: &InputMode, seek_secs: u64) -> String {
    if *input != InputMode::Normal {
        return "[enter] confirm | [esc] cancel | [backspace] delete".to_string();
    }

    let mut parts: Vec<String> = match section {
        Section::Explore => vec!["[/] search".into(), "[j/k] move".into(), "[enter] play".into()],
        Section::PlayQueue => vec![
            "[a] add".into(),
            "[j/k] move".into(),
            "[enter] play".into(),
            "[d] remove".into(),
        ],
        Section::Settings => vec![
            "[j/k] move".into(),
            "[h/l] adjust".into(),
            "[R] reset eq".into(),
        ],
        Section::Home | Section::Library => Vec::new(),
    };
    parts.extend([
        "[space/p] play/pause".to_string(),
        "[b/n] prev/next".to_string(),
        format!("[,/.] seek -/+{seek_secs}s"),
        "[s] shuffle".to_string(),
        "[r] repeat".to_string(),
        "[m] mute".to_string(),
        "[+/-] volume".to_string(),
        "[f] favorite".to_string(),
        "[v] visualizer".to_string(),
        "[1-5/tab] sections".to_string(),
        "[q] quit".to_string(),
    ]);
    parts.join(" | ")
}

/// A clickable label in a row of buttons.
struct Button {
    label: String,
    style: Style,
    intent: Option<Intent>,
}

impl Button {
    fn new(label: impl Into<String>, style: Style, intent: Option<Intent>) -> Self {
        Self {
            label: label.into(),
            style,
            intent,
        }
    }
}

/// Lay out `buttons` left to right on the first line of `area`, one space
/// apart, and register the ones carrying an intent. Returns the rect of each
/// button that fit.
fn render_button_row(
    frame: &mut Frame,
    area: Rect,
    buttons: Vec<Button>,
    hits: &mut HitMap,
) -> Vec<Rect> {
    let mut spans: Vec<Span> = Vec::new();
    let mut rects = Vec::new();
    let mut x = area.x;

    for button in buttons {
        let width = button.label.chars().count() as u16;
        if x + width > area.right() {
            break;
        }
        let rect = Rect::new(x, area.y, width, 1);
        if let Some(intent) = button.intent {
            hits.add_button(rect, intent);
        }
        rects.push(rect);
        spans.push(Span::styled(button.label, button.style));
        spans.push(Span::raw(" "));
        x += width + 1;
    }

    let line_area = Rect::new(area.x, area.y, area.width, area.height.min(1));
    frame.render_widget(Paragraph::new(Line::from(spans)), line_area);
    rects
}

fn render_nav<M: MediaElement>(
    frame: &mut Frame,
    area: Rect,
    controller: &Controller<M>,
    hits: &mut HitMap,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" timbre ")
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let view = &controller.app().view;
    let buttons = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let style = if view.is_nav_highlighted(*s) {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default()
            };
            Button::new(format!(" {} {} ", i + 1, s.label()), style, None)
        })
        .collect();

    let rects = render_button_row(frame, inner, buttons, hits);
    for (rect, section) in rects.into_iter().zip(Section::ALL) {
        hits.add_nav(rect, section);
    }
}

fn volume_icon(level: VolumeLevel) -> &'static str {
    match level {
        VolumeLevel::Muted => "[vol x]",
        VolumeLevel::Low => "[vol -]",
        VolumeLevel::High => "[vol +]",
    }
}

fn render_player_bar<M: MediaElement>(
    frame: &mut Frame,
    area: Rect,
    controller: &Controller<M>,
    hits: &mut HitMap,
) {
    let app = controller.app();
    let block = Block::bordered()
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
        .title(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    // Track line
    let track_line = match app.queue.current_track() {
        Some(track) => {
            let heart = if app.favorite { "♥ " } else { "♡ " };
            Line::from(vec![
                Span::styled(heart, Style::default().fg(Color::Magenta)),
                Span::styled(track.title.clone(), Style::default().bold()),
                Span::raw(" • "),
                Span::raw(track.artist.clone()),
                Span::raw(" • "),
                Span::styled(track.cover_label(), Style::default().dim()),
            ])
        }
        None => Line::from("No song loaded").dim(),
    };
    frame.render_widget(Paragraph::new(track_line), rows[0]);

    // Transport buttons
    let t = &app.transport;
    let on = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    let flag = |enabled: bool| if enabled { on } else { Style::default().dim() };
    let play_label = if t.is_playing() { "[pause]" } else { "[play]" };
    let volume = format!(
        "{} {:>3}%",
        volume_icon(t.volume_level()),
        (t.volume() * 100.0).round() as u32
    );
    let buttons = vec![
        Button::new("[shuffle]", flag(t.shuffle), Some(Intent::ToggleShuffle)),
        Button::new("[prev]", Style::default(), Some(Intent::Previous)),
        Button::new(play_label, on, Some(Intent::TogglePlayPause)),
        Button::new("[next]", Style::default(), Some(Intent::Next)),
        Button::new("[repeat]", flag(t.repeat), Some(Intent::ToggleRepeat)),
        Button::new("[fav]", flag(app.favorite), Some(Intent::ToggleFavorite)),
        Button::new(volume, Style::default(), Some(Intent::ToggleMute)),
        Button::new(format!("{:.2}x", t.rate()), Style::default().dim(), None),
    ];
    render_button_row(frame, rows[1], buttons, hits);

    // Progress
    let media = controller.media();
    let elapsed = media.current_time();
    let total = media.duration();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(ACCENT))
        .ratio(progress_ratio(elapsed, total))
        .label(progress_text(elapsed, total));
    frame.render_widget(gauge, rows[2]);
}

fn render_status<M: MediaElement>(frame: &mut Frame, area: Rect, controller: &Controller<M>) {
    let app = controller.app();
    let mut parts: Vec<String> = Vec::new();
    if let Some(msg) = app.status.latest() {
        parts.push(msg.to_string());
    }
    if app.sleep_minutes > 0 {
        parts.push(format!("Sleep: {} min", app.sleep_minutes));
    }

    let status = Paragraph::new(parts.join(" • ")).block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(" status "),
    );
    frame.render_widget(status, area);
}

/// Render the entire UI into `frame` and record clickable regions in `hits`.
///
/// Returns the visualizer canvas when one was drawn, so the caller can keep
/// the visualizer's size in step with the terminal.
pub fn draw<M: MediaElement>(
    frame: &mut Frame,
    controller: &Controller<M>,
    hits: &mut HitMap,
) -> Option<Rect> {
    hits.clear();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    render_nav(frame, chunks[0], controller, hits);

    let app = controller.app();
    let canvas = match app.view.section() {
        Section::Home => sections::home(frame, chunks[1], controller),
        Section::Explore => {
            sections::explore(frame, chunks[1], controller, hits);
            None
        }
        Section::Library => {
            sections::library(frame, chunks[1], controller, hits);
            None
        }
        Section::PlayQueue => {
            sections::play_queue(frame, chunks[1], controller, hits);
            None
        }
        Section::Settings => {
            sections::settings(frame, chunks[1], controller, hits);
            None
        }
    };

    render_player_bar(frame, chunks[2], controller, hits);
    render_status(frame, chunks[3], controller);

    let footer_text = controls_text(
        app.view.section(),
        &app.view.input,
        app.seek_step.as_secs(),
    );
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    canvas
}

#[cfg(test)]
mod tests;
