//! State of the interactive session that lives outside the calendar renderer:
//! input mode, the search box and render bookkeeping.

use std::time::{Duration, Instant};

use crate::data_fetcher::models::GameRecord;
use crate::ui::colors::Theme;
use crate::ui::loading_indicator::LoadingIndicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Calendar,
    Search,
}

/// What the user picked or typed in the search box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSelection {
    pub name: String,
    pub released: Option<String>,
    pub slug: Option<String>,
}

impl From<&GameRecord> for GameSelection {
    fn from(game: &GameRecord) -> Self {
        Self {
            name: game.name.clone(),
            released: game.released.clone(),
            slug: game.slug.clone(),
        }
    }
}

/// Query text, the suggestions shown for it and the highlighted suggestion
#[derive(Debug, Default)]
pub struct SearchBox {
    query: String,
    suggestions: Vec<GameRecord>,
    selected: Option<usize>,
}

impl SearchBox {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[GameRecord] {
        &self.suggestions
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
        self.selected = None;
    }

    pub fn pop(&mut self) {
        self.query.pop();
        self.selected = None;
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.suggestions.clear();
        self.selected = None;
    }

    /// Shows suggestions computed for `query` if it is still the current
    /// query. Returns whether anything changed.
    pub fn apply(&mut self, query: &str, suggestions: Vec<GameRecord>) -> bool {
        if query != self.query {
            return false;
        }
        self.suggestions = suggestions;
        self.selected = None;
        true
    }

    pub fn select_next(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.suggestions.len(),
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => self.suggestions.len() - 1,
            Some(i) => i - 1,
        });
    }

    /// Highlighted suggestion, falling back to the typed name
    pub fn submission(&self) -> Option<GameSelection> {
        if let Some(game) = self.selected.and_then(|i| self.suggestions.get(i)) {
            return Some(GameSelection::from(game));
        }
        let name = self.query.trim();
        (!name.is_empty()).then(|| GameSelection {
            name: name.to_string(),
            released: None,
            slug: None,
        })
    }
}

/// Everything the event loop tracks besides the calendar itself
#[derive(Debug)]
pub struct InteractiveState {
    pub mode: InputMode,
    pub search: SearchBox,
    pub theme: Theme,
    pub loading: Option<LoadingIndicator>,
    needs_render: bool,
    last_activity: Instant,
    resolve_generation: u64,
}

impl InteractiveState {
    pub fn new(theme: Theme) -> Self {
        Self {
            mode: InputMode::Calendar,
            search: SearchBox::default(),
            theme,
            loading: None,
            needs_render: true,
            last_activity: Instant::now(),
            resolve_generation: 0,
        }
    }

    pub fn request_render(&mut self) {
        self.needs_render = true;
    }

    /// Returns whether a render was requested and clears the request
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }

    pub fn update_activity(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn time_since_activity(&self) -> Duration {
        self.last_activity.elapsed()
    }

    /// Starts a new game resolution, superseding any resolution in flight
    pub fn next_resolve_generation(&mut self) -> u64 {
        self.resolve_generation += 1;
        self.resolve_generation
    }

    /// Drops any resolution in flight, e.g. when the user navigates manually
    pub fn abandon_resolve(&mut self) {
        self.resolve_generation += 1;
    }

    pub fn is_current_resolve(&self, generation: u64) -> bool {
        generation == self.resolve_generation
    }

    pub fn enter_search(&mut self) {
        self.mode = InputMode::Search;
        self.request_render();
    }

    pub fn leave_search(&mut self) {
        self.mode = InputMode::Calendar;
        self.search.clear();
        self.request_render();
    }
}
