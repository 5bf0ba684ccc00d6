//! Keyboard input handling for the interactive calendar.
//!
//! Keys are translated into [`UiAction`]s; the event loop performs the
//! actions that need the renderer or the network.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state_manager::{GameSelection, InputMode, InteractiveState};

/// What the event loop should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    None,
    Quit,
    /// Move this many months from the current one
    Navigate(i32),
    Today,
    ToggleDarkMode,
    /// The search text changed; suggestions need refreshing
    QueryChanged(String),
    /// Search mode was left; pending suggestions should be dropped
    SearchClosed,
    /// Jump to the release month of the chosen game
    Submit(GameSelection),
    /// Only the screen needs redrawing
    Redraw,
}

fn is_quit_combo(key_event: &KeyEvent) -> bool {
    key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
}

/// Handles one key event, updating the input state in place
pub fn handle_key_event(key_event: &KeyEvent, state: &mut InteractiveState) -> UiAction {
    if key_event.kind == KeyEventKind::Release {
        return UiAction::None;
    }
    if is_quit_combo(key_event) {
        return UiAction::Quit;
    }

    match state.mode {
        InputMode::Calendar => handle_calendar_key(key_event, state),
        InputMode::Search => handle_search_key(key_event, state),
    }
}

fn handle_calendar_key(key_event: &KeyEvent, state: &mut InteractiveState) -> UiAction {
    match key_event.code {
        KeyCode::Char('q') => UiAction::Quit,
        KeyCode::Left => UiAction::Navigate(-1),
        KeyCode::Right => UiAction::Navigate(1),
        KeyCode::Char('t') => UiAction::Today,
        KeyCode::Char('d') => UiAction::ToggleDarkMode,
        KeyCode::Char('/') => {
            state.enter_search();
            UiAction::Redraw
        }
        _ => UiAction::None,
    }
}

fn handle_search_key(key_event: &KeyEvent, state: &mut InteractiveState) -> UiAction {
    match key_event.code {
        KeyCode::Esc => {
            state.leave_search();
            UiAction::SearchClosed
        }
        KeyCode::Enter => match state.search.submission() {
            Some(selection) => {
                state.leave_search();
                UiAction::Submit(selection)
            }
            None => {
                state.leave_search();
                UiAction::SearchClosed
            }
        },
        KeyCode::Up => {
            state.search.select_previous();
            UiAction::Redraw
        }
        KeyCode::Down => {
            state.search.select_next();
            UiAction::Redraw
        }
        KeyCode::Backspace => {
            state.search.pop();
            UiAction::QueryChanged(state.search.query().to_string())
        }
        KeyCode::Char(c) => {
            state.search.push(c);
            UiAction::QueryChanged(state.search.query().to_string())
        }
        _ => UiAction::None,
    }
}
