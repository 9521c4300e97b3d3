//! Section navigation, queue rows, settings focus and mouse hit-testing.

use ratatui::layout::{Position, Rect};

use crate::audio::{BAND_COUNT, Queue};
use crate::config::SectionSetting;
use crate::playback::Intent;

/// Shown in place of the queue list when nothing is queued.
pub const EMPTY_QUEUE_TEXT: &str = "Your queue is empty. Add some songs!";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Section {
    Home,
    Explore,
    Library,
    PlayQueue,
    Settings,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Explore,
        Section::Library,
        Section::PlayQueue,
        Section::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Explore => "Explore",
            Section::Library => "Your Library",
            Section::PlayQueue => "Play Queue",
            Section::Settings => "Settings",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl From<SectionSetting> for Section {
    fn from(s: SectionSetting) -> Self {
        match s {
            SectionSetting::Home => Section::Home,
            SectionSetting::Explore => Section::Explore,
            SectionSetting::Library => Section::Library,
            SectionSetting::Queue => Section::PlayQueue,
            SectionSetting::Settings => Section::Settings,
        }
    }
}

/// Focusable rows of the Settings section.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SettingsField {
    Speed,
    SleepTimer,
    Visualizer,
    Band(usize),
    ResetEq,
}

impl SettingsField {
    pub const COUNT: usize = 4 + BAND_COUNT;

    pub fn at(index: usize) -> Self {
        match index {
            0 => SettingsField::Speed,
            1 => SettingsField::SleepTimer,
            2 => SettingsField::Visualizer,
            i if i < 3 + BAND_COUNT => SettingsField::Band(i - 3),
            _ => SettingsField::ResetEq,
        }
    }
}

/// What keystrokes currently edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a path to add to the queue.
    AddPath(String),
    /// Typing the Explore search query.
    Search,
}

/// One rendered queue entry.
#[derive(Clone, Debug, PartialEq)]
pub struct QueueRow {
    pub index: usize,
    pub title: String,
    pub artist: String,
    pub cover: String,
    pub active: bool,
}

pub struct View {
    section: Section,
    queue_rows: Vec<QueueRow>,
    #[cfg(test)]
    queue_renders: u64,
    pub queue_selected: usize,
    pub search_query: String,
    pub search_selected: usize,
    pub settings_selected: usize,
    pub input: InputMode,
}

impl View {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            queue_rows: Vec::new(),
            #[cfg(test)]
            queue_renders: 0,
            queue_selected: 0,
            search_query: String::new(),
            search_selected: 0,
            settings_selected: 0,
            input: InputMode::Normal,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Show exactly one section. Returns whether the section changed.
    pub fn show_section(&mut self, section: Section) -> bool {
        if self.section == section {
            return false;
        }
        self.section = section;
        if self.input != InputMode::Normal {
            self.input = InputMode::Normal;
        }
        true
    }

    pub fn is_nav_highlighted(&self, section: Section) -> bool {
        self.section == section
    }

    /// The add-files control only lives on the Play Queue.
    pub fn upload_visible(&self) -> bool {
        self.section == Section::PlayQueue
    }

    pub fn queue_rows(&self) -> &[QueueRow] {
        &self.queue_rows
    }

    /// How many times the queue list has been rebuilt.
    #[cfg(test)]
    pub fn queue_renders(&self) -> u64 {
        self.queue_renders
    }

    /// Rebuild every queue row from scratch.
    pub fn render_queue(&mut self, queue: &Queue) {
        let current = queue.current();
        self.queue_rows = queue
            .tracks()
            .iter()
            .enumerate()
            .map(|(index, t)| QueueRow {
                index,
                title: t.title.clone(),
                artist: t.artist.clone(),
                cover: t.cover_label(),
                active: current == Some(index),
            })
            .collect();
        #[cfg(test)]
        {
            self.queue_renders += 1;
        }
        self.queue_selected = self
            .queue_selected
            .min(self.queue_rows.len().saturating_sub(1));
    }

    pub fn move_queue_selection(&mut self, delta: isize) {
        self.queue_selected = step(self.queue_selected, delta, self.queue_rows.len());
    }

    pub fn move_search_selection(&mut self, delta: isize, results: usize) {
        self.search_selected = step(self.search_selected, delta, results);
    }

    pub fn move_settings_selection(&mut self, delta: isize) {
        self.settings_selected = step(self.settings_selected, delta, SettingsField::COUNT);
    }

    pub fn settings_field(&self) -> SettingsField {
        SettingsField::at(self.settings_selected)
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.search_selected = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.search_selected = 0;
    }
}

fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}

/// Clickable regions recorded while drawing a frame.
#[derive(Debug, Default)]
pub struct HitMap {
    nav: Vec<(Rect, Section)>,
    rows: Vec<(Rect, usize)>,
    remove: Vec<(Rect, usize)>,
    buttons: Vec<(Rect, Intent)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.nav.clear();
        self.rows.clear();
        self.remove.clear();
        self.buttons.clear();
    }

    pub fn add_nav(&mut self, area: Rect, section: Section) {
        self.nav.push((area, section));
    }

    pub fn add_row(&mut self, area: Rect, index: usize) {
        self.rows.push((area, index));
    }

    pub fn add_remove(&mut self, area: Rect, index: usize) {
        self.remove.push((area, index));
    }

    pub fn add_button(&mut self, area: Rect, intent: Intent) {
        self.buttons.push((area, intent));
    }

    /// Map a click to an intent. A row click plays the row unless it landed
    /// on that row's remove control.
    pub fn resolve(&self, x: u16, y: u16) -> Option<Intent> {
        let pos = Position { x, y };

        if let Some((_, i)) = self.remove.iter().find(|(r, _)| r.contains(pos)) {
            return Some(Intent::RemoveAt(*i));
        }
        if let Some((_, i)) = self.rows.iter().find(|(r, _)| r.contains(pos)) {
            return Some(Intent::PlayAt(*i));
        }
        if let Some((_, intent)) = self.buttons.iter().find(|(r, _)| r.contains(pos)) {
            return Some(intent.clone());
        }
        self.nav
            .iter()
            .find(|(r, _)| r.contains(pos))
            .map(|(_, s)| Intent::ShowSection(*s))
    }
}
