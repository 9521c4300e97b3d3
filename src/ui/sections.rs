//! The five main panels. Exactly one is drawn per frame.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph},
};

use crate::app::{App, EMPTY_QUEUE_TEXT, HitMap, InputMode, SettingsField};
use crate::audio::{MAX_GAIN_DB, MediaElement, band_label};
use crate::library::group_by_artist;
use crate::playback::{Controller, Intent};
use crate::visualizer::{DisplayMode, SpectrumWidget};

use super::{ACCENT, format_time};

const SLIDER_WIDTH: usize = 25;

fn padded_block(title: String) -> Block<'static> {
    Block::bordered().title(title).padding(Padding {
        left: 1,
        right: 1,
        top: 0,
        bottom: 0,
    })
}

/// Rows `start..end` to show so that `selected` stays roughly centered.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if height == 0 {
        return (0, 0);
    }
    if total <= height {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn row_rect(inner: Rect, row: usize) -> Rect {
    Rect::new(inner.x, inner.y + row as u16, inner.width, 1)
}

fn row_style(active: bool, selected: bool) -> Style {
    let mut style = Style::default();
    if active {
        style = style.fg(ACCENT).add_modifier(Modifier::BOLD);
    }
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

/// Split `text` into spans, highlighting the characters at `positions`.
fn highlight_matches(text: &str, positions: &[usize]) -> Vec<Span<'static>> {
    let hit = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_hit = false;
    let mut next = positions.iter().peekable();

    for (ci, ch) in text.chars().enumerate() {
        let is_hit = next.peek().is_some_and(|p| **p == ci);
        if is_hit {
            next.next();
        }
        if is_hit != run_hit && !run.is_empty() {
            let style = if run_hit { hit } else { Style::default() };
            spans.push(Span::styled(std::mem::take(&mut run), style));
        }
        run_hit = is_hit;
        run.push(ch);
    }
    if !run.is_empty() {
        let style = if run_hit { hit } else { Style::default() };
        spans.push(Span::styled(run, style));
    }
    spans
}

/// Now-playing summary above the visualizer canvas. Returns the canvas area
/// when the visualizer is shown.
pub(super) fn home<M: MediaElement>(
    frame: &mut Frame,
    area: Rect,
    controller: &Controller<M>,
) -> Option<Rect> {
    let app = controller.app();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    let info: Vec<Line> = match app.queue.current_track() {
        Some(track) => vec![
            Line::from(vec![
                Span::raw("Now playing: "),
                Span::styled(track.title.clone(), Style::default().bold()),
            ]),
            Line::from(format!("by {}", track.artist)),
            Line::from(format!("Cover: {}", track.cover_label())).dim(),
        ],
        None => vec![
            Line::from("Welcome to timbre."),
            Line::from("Open the Play Queue (4) and press a to add songs.").dim(),
        ],
    };
    frame.render_widget(
        Paragraph::new(info).block(padded_block(" home ".to_string())),
        chunks[0],
    );

    let visualizer = controller.visualizer();
    let block = Block::bordered().title(" visualizer ");
    if visualizer.is_active() {
        let canvas = block.inner(chunks[1]);
        frame.render_widget(
            SpectrumWidget::new(&visualizer.frame().bins).block(block),
            chunks[1],
        );
        Some(canvas)
    } else {
        let placeholder = Paragraph::new("Visualizer hidden. Press v to show it.")
            .alignment(Alignment::Center)
            .dim()
            .block(block);
        frame.render_widget(placeholder, chunks[1]);
        None
    }
}

pub(super) fn explore<M: MediaElement>(
    frame: &mut Frame,
    area: Rect,
    controller: &Controller<M>,
    hits: &mut HitMap,
) {
    let app = controller.app();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let editing = app.view.input == InputMode::Search;
    let mut query = vec![Span::raw(app.view.search_query.clone())];
    if editing {
        query.push(Span::styled("▏", Style::default().fg(ACCENT)));
    } else if app.view.search_query.is_empty() {
        query.push(Span::raw("press / to search artists and titles").dim());
    }
    let mut search_block = padded_block(" search ".to_string());
    if editing {
        search_block = search_block.border_style(Style::default().fg(ACCENT));
    }
    frame.render_widget(
        Paragraph::new(Line::from(query)).block(search_block),
        chunks[0],
    );

    let results = app.search_results();
    let block = padded_block(format!(" results ({}) ", results.len()));
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    if results.is_empty() {
        let text = if app.queue.is_empty() {
            EMPTY_QUEUE_TEXT
        } else {
            "No matches."
        };
        frame.render_widget(Paragraph::new(text).dim(), inner);
        return;
    }

    let selected = app.view.search_selected.min(results.len() - 1);
    let (start, end) = visible_window(results.len(), inner.height as usize, selected);
    let query = app.view.search_query.trim();

    for (row, pos) in (start..end).enumerate() {
        let index = results[pos];
        let rect = row_rect(inner, row);
        let text = app.search_text(index).unwrap_or_default();
        let positions = App::fuzzy_match_positions(&text, query).unwrap_or_default();

        let marker = if pos == selected { "> " } else { "  " };
        let mut spans = vec![Span::raw(marker)];
        spans.extend(highlight_matches(&text, &positions));
        let active = app.queue.current() == Some(index);
        let line = Line::from(spans).style(row_style(active, pos == selected));

        frame.render_widget(Paragraph::new(line), rect);
        hits.add_row(rect, index);
    }
}

pub(super) fn library<M: MediaElement>(
    frame: &mut Frame,
    area: Rect,
    controller: &Controller<M>,
    hits: &mut HitMap,
) {
    let app = controller.app();
    let tracks = app.queue.tracks();
    let groups = group_by_artist(tracks);

    let block = padded_block(format!(" your library ({} artists) ", groups.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if groups.is_empty() {
        frame.render_widget(Paragraph::new(EMPTY_QUEUE_TEXT).dim(), inner);
        return;
    }

    let mut row = 0usize;
    let height = inner.height as usize;
    'groups: for group in &groups {
        if row >= height {
            break;
        }
        let count = group.indices.len();
        let noun = if count == 1 { "song" } else { "songs" };
        let header = Line::from(vec![
            Span::styled(group.artist.clone(), Style::default().bold()),
            Span::raw(format!(" ({count} {noun})")).dim(),
        ]);
        frame.render_widget(Paragraph::new(header), row_rect(inner, row));
        row += 1;

        for &index in &group.indices {
            if row >= height {
                break 'groups;
            }
            let Some(track) = tracks.get(index) else {
                continue;
            };
            let rect = row_rect(inner, row);
            let active = app.queue.current() == Some(index);
            let line = Line::from(format!("  {}", track.title)).style(row_style(active, false));
            frame.render_widget(Paragraph::new(line), rect);
            hits.add_row(rect, index);
            row += 1;
        }
    }
}

pub(super) fn play_queue<M: MediaElement>(
    frame: &mut Frame,
    area: Rect,
    controller: &Controller<M>,
    hits: &mut HitMap,
) {
    let app = controller.app();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    if app.view.upload_visible() {
        let prompt = match &app.view.input {
            InputMode::AddPath(buf) => Line::from(vec![
                Span::raw("Add path: "),
                Span::raw(buf.clone()),
                Span::styled("▏", Style::default().fg(ACCENT)),
            ]),
            _ => Line::from(vec![
                Span::styled("[+ add songs]", Style::default().fg(ACCENT).bold()),
                Span::raw(" press a, then type a file or folder path").dim(),
            ]),
        };
        frame.render_widget(
            Paragraph::new(prompt).block(padded_block(" upload ".to_string())),
            chunks[0],
        );
    }

    let rows = app.view.queue_rows();
    let block = padded_block(format!(" play queue ({}) ", rows.len()));
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new(EMPTY_QUEUE_TEXT)
                .alignment(Alignment::Center)
                .dim(),
            inner,
        );
        return;
    }

    let selected = app.view.queue_selected.min(rows.len() - 1);
    let (start, end) = visible_window(rows.len(), inner.height as usize, selected);

    for (row, entry) in rows[start..end].iter().enumerate() {
        let rect = row_rect(inner, row);
        let remove_width = rect.width.min(3);
        let remove = Rect::new(rect.right() - remove_width, rect.y, remove_width, 1);
        let content = Rect::new(rect.x, rect.y, rect.width.saturating_sub(4), 1);

        let marker = if entry.active { "▶ " } else { "  " };
        let line = Line::from(vec![
            Span::raw(marker),
            Span::raw(format!("{:>3}. ", entry.index + 1)),
            Span::styled(entry.title.clone(), Style::default().bold()),
            Span::raw(" • "),
            Span::raw(entry.artist.clone()),
            Span::raw(" • "),
            Span::raw(entry.cover.clone()).dim(),
        ])
        .style(row_style(entry.active, entry.index == selected));

        frame.render_widget(Paragraph::new(line), content);
        frame.render_widget(
            Paragraph::new("✕")
                .alignment(Alignment::Center)
                .fg(Color::Red),
            remove,
        );
        hits.add_row(rect, entry.index);
        hits.add_remove(remove, entry.index);
    }
}

/// `───●───` slider for an equalizer gain.
fn eq_slider(gain_db: f32) -> String {
    let span = (SLIDER_WIDTH - 1) as f32;
    let pos = (((gain_db + MAX_GAIN_DB) / (2.0 * MAX_GAIN_DB)) * span).round() as usize;
    (0..SLIDER_WIDTH)
        .map(|i| if i == pos.min(SLIDER_WIDTH - 1) { '●' } else { '─' })
        .collect()
}

pub(super) fn settings<M: MediaElement>(
    frame: &mut Frame,
    area: Rect,
    controller: &Controller<M>,
    hits: &mut HitMap,
) {
    let app = controller.app();
    let block = padded_block(" settings ".to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let selected = app.view.settings_selected.min(SettingsField::COUNT - 1);
    let (start, end) = visible_window(SettingsField::COUNT, inner.height as usize, selected);
    let equalizer = controller.graph().equalizer();
    let visualizer = controller.visualizer();

    for (row, i) in (start..end).enumerate() {
        let (label, value, intent) = match SettingsField::at(i) {
            SettingsField::Speed => (
                "Playback speed".to_string(),
                format!("{:.2}x", app.transport.rate()),
                None,
            ),
            SettingsField::SleepTimer => {
                let value = match controller.sleep_timer().remaining(Instant::now()) {
                    Some(left) if app.sleep_minutes > 0 => {
                        format!("{} min ({} left)", app.sleep_minutes, format_time(left))
                    }
                    _ => "off".to_string(),
                };
                (
                    "Sleep timer".to_string(),
                    value,
                    Some(Intent::CycleSleepTimer { forward: true }),
                )
            }
            SettingsField::Visualizer => {
                let (value, other) = match visualizer.display() {
                    DisplayMode::Full => ("full", DisplayMode::Hidden),
                    DisplayMode::Hidden => ("hidden", DisplayMode::Full),
                };
                let state = if visualizer.is_active() { "" } else { " (off)" };
                (
                    "Visualizer".to_string(),
                    format!("{value}{state}"),
                    Some(Intent::SetVisualizerDisplay(other)),
                )
            }
            SettingsField::Band(band) => {
                let gain = equalizer.gain(band).unwrap_or(0.0);
                (
                    format!("EQ {} Hz", band_label(band)),
                    format!("{} {:+.0} dB", eq_slider(gain), gain),
                    None,
                )
            }
            SettingsField::ResetEq => (
                "Equalizer".to_string(),
                "[reset]".to_string(),
                Some(Intent::ResetEq),
            ),
        };

        let rect = row_rect(inner, row);
        let line = Line::from(format!("{label:<16} {value}")).style(row_style(false, i == selected));
        frame.render_widget(Paragraph::new(line), rect);
        if let Some(intent) = intent {
            hits.add_button(rect, intent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_keeps_selection_visible() {
        assert_eq!(visible_window(5, 10, 3), (0, 5));
        assert_eq!(visible_window(20, 4, 0), (0, 4));
        assert_eq!(visible_window(20, 4, 10), (8, 12));
        assert_eq!(visible_window(20, 4, 19), (16, 20));
        assert_eq!(visible_window(3, 0, 1), (0, 0));
    }

    #[test]
    fn slider_marks_gain_position() {
        assert!(eq_slider(-MAX_GAIN_DB).starts_with('●'));
        assert!(eq_slider(MAX_GAIN_DB).ends_with('●'));
        assert_eq!(eq_slider(0.0).chars().position(|c| c == '●'), Some(12));
    }

    #[test]
    fn highlight_groups_runs() {
        let spans = highlight_matches("abcd", &[1, 2]);
        let texts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["a", "bc", "d"]);
    }
}
