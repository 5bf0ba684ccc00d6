//! Interactive calendar session
//!
//! This module is organized into focused submodules:
//! - `terminal_manager`: raw mode and alternate screen
//! - `event_handler`: terminal polling with activity-based intervals
//! - `input_handler`: key bindings
//! - `state_manager`: search box, theme and render bookkeeping
//! - `screen`: drawing
//!
//! Fetches and game resolutions run as spawned tasks that report back over a
//! channel, so the screen keeps animating while they are in flight.

mod event_handler;
mod input_handler;
mod screen;
mod state_manager;
mod terminal_manager;

pub use input_handler::{UiAction, handle_key_event};
pub use state_manager::{GameSelection, InputMode, InteractiveState, SearchBox};
pub use terminal_manager::{TerminalConfig, TerminalManager};

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::calendar::dates::YearMonth;
use crate::calendar::renderer::{CalendarRenderer, NavigationTicket, resolve_game_month};
use crate::data_fetcher::models::GameRecord;
use crate::data_fetcher::{SuggestionDebouncer, SuggestionUpdate};
use crate::error::AppError;
use crate::preferences::PreferenceStore;
use crate::ui::colors::Theme;
use crate::ui::loading_indicator::LoadingIndicator;
use event_handler::{EventHandler, InputEvent};

const SPINNER_FRAME: Duration = Duration::from_millis(200);

/// Month shown when the session opens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartTarget {
    Today,
    Month(YearMonth),
    /// Release month of the named game
    Game(String),
}

/// Results of background work
#[derive(Debug)]
enum UiMessage {
    Fetched(NavigationTicket, Result<Arc<Vec<GameRecord>>, AppError>),
    Resolved {
        generation: u64,
        result: Result<YearMonth, AppError>,
    },
}

struct Session {
    renderer: CalendarRenderer,
    state: InteractiveState,
    preferences: PreferenceStore,
    debouncer: SuggestionDebouncer,
    suggestions: mpsc::UnboundedReceiver<SuggestionUpdate>,
    tx: mpsc::UnboundedSender<UiMessage>,
    rx: mpsc::UnboundedReceiver<UiMessage>,
    last_spin: Instant,
}

impl Session {
    fn new(renderer: CalendarRenderer, preferences: PreferenceStore, theme: Theme) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (debouncer, suggestions) = renderer.search().debouncer();
        Self {
            renderer,
            state: InteractiveState::new(theme),
            preferences,
            debouncer,
            suggestions,
            tx,
            rx,
            last_spin: Instant::now(),
        }
    }

    fn start(&mut self, start: StartTarget) {
        match start {
            StartTarget::Today => self.start_navigation(YearMonth::from_date(self.renderer.today())),
            StartTarget::Month(month) => self.start_navigation(month),
            StartTarget::Game(name) => self.start_resolve(GameSelection {
                name,
                released: None,
                slug: None,
            }),
        }
    }

    fn start_navigation(&mut self, target: YearMonth) {
        let ticket = self.renderer.begin_navigation(target);
        self.state.loading = Some(LoadingIndicator::for_month(target));
        self.state.request_render();

        let fetcher = self.renderer.fetcher().clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch(ticket.target()).await;
            let _ = tx.send(UiMessage::Fetched(ticket, result));
        });
    }

    fn start_resolve(&mut self, selection: GameSelection) {
        let generation = self.state.next_resolve_generation();
        info!("Resolving '{}'", selection.name);

        let search = self.renderer.search().clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = resolve_game_month(
                &search,
                &selection.name,
                selection.released,
                selection.slug,
            )
            .await;
            let _ = tx.send(UiMessage::Resolved { generation, result });
        });
    }

    fn handle_message(&mut self, message: UiMessage) {
        match message {
            UiMessage::Fetched(ticket, result) => {
                if self.renderer.complete_navigation(ticket, result) {
                    self.state.loading = None;
                    self.state.request_render();
                }
            }
            UiMessage::Resolved { generation, result } => {
                if !self.state.is_current_resolve(generation) {
                    debug!("Discarding superseded game resolution #{}", generation);
                    return;
                }
                match result {
                    Ok(target) => self.start_navigation(target),
                    Err(e) => {
                        self.renderer.report_error(&e);
                        self.state.request_render();
                    }
                }
            }
        }
    }

    fn handle_suggestions(&mut self, update: SuggestionUpdate) {
        match update.result {
            Ok(games) => {
                if self.state.search.apply(&update.query, games) {
                    self.state.request_render();
                }
            }
            Err(e) if update.query == self.state.search.query() => {
                self.renderer.report_error(&e);
                self.state.request_render();
            }
            Err(e) => debug!("Ignoring error for stale query '{}': {}", update.query, e),
        }
    }

    /// Applies everything background tasks delivered since the last call
    fn drain_background(&mut self) {
        let messages: Vec<UiMessage> = std::iter::from_fn(|| self.rx.try_recv().ok()).collect();
        for message in messages {
            self.handle_message(message);
        }
        let updates: Vec<SuggestionUpdate> =
            std::iter::from_fn(|| self.suggestions.try_recv().ok()).collect();
        for update in updates {
            self.handle_suggestions(update);
        }

        if self.renderer.slideshow().take_changed() {
            self.state.request_render();
        }
        if let Some(indicator) = self.state.loading.as_mut()
            && self.last_spin.elapsed() >= SPINNER_FRAME
        {
            indicator.next_frame();
            self.last_spin = Instant::now();
            self.state.request_render();
        }
    }

    fn is_busy(&self) -> bool {
        self.state.loading.is_some() || self.debouncer.is_pending()
    }

    /// Performs `action`; returns `false` when the session should end
    async fn perform(&mut self, action: UiAction) -> bool {
        match action {
            UiAction::None => {}
            UiAction::Quit => return false,
            UiAction::Redraw => self.state.request_render(),
            UiAction::Navigate(delta) => {
                self.state.abandon_resolve();
                let target = self.renderer.navigation_base().shift(delta);
                self.start_navigation(target);
            }
            UiAction::Today => {
                self.state.abandon_resolve();
                self.start_navigation(YearMonth::from_date(self.renderer.today()));
            }
            UiAction::ToggleDarkMode => {
                self.state.theme = self.state.theme.toggled();
                self.state.request_render();
                if let Err(e) = self.preferences.save(self.state.theme.is_dark()).await {
                    warn!("Failed to save dark mode preference: {}", e);
                }
            }
            UiAction::QueryChanged(query) => {
                self.debouncer.on_input(&query);
                self.state.request_render();
            }
            UiAction::SearchClosed => {
                self.debouncer.cancel();
                self.state.request_render();
            }
            UiAction::Submit(selection) => {
                self.debouncer.cancel();
                self.start_resolve(selection);
                self.state.request_render();
            }
        }
        true
    }

    fn teardown(&mut self) {
        self.debouncer.cancel();
        self.renderer.teardown();
    }
}

async fn run_session<W: Write>(
    out: &mut W,
    session: &mut Session,
    events: &EventHandler,
) -> Result<(), AppError> {
    loop {
        session.drain_background();

        if session.state.take_render_request() {
            screen::draw(out, &session.renderer, &session.state)?;
        }

        let event = events.next_event(session.state.time_since_activity(), session.is_busy())?;
        match event {
            Some(InputEvent::Key(key_event)) => {
                session.state.update_activity();
                let action = handle_key_event(&key_event, &mut session.state);
                if !session.perform(action).await {
                    info!("Quit requested");
                    return Ok(());
                }
            }
            Some(InputEvent::Resize) => session.state.request_render(),
            None => {}
        }

        // Let spawned fetches make progress between polls
        tokio::task::yield_now().await;
    }
}

/// Runs the interactive calendar until the user quits.
///
/// The persisted dark-mode preference is applied before the first draw, and
/// every slideshow timer is cancelled on exit.
pub async fn run_interactive_ui(
    renderer: CalendarRenderer,
    preferences: PreferenceStore,
    start: StartTarget,
    debug_mode: bool,
) -> Result<(), AppError> {
    let theme = Theme::from_dark_mode(preferences.load().await);
    let mut session = Session::new(renderer, preferences, theme);
    session.start(start);

    let terminal = TerminalManager::with_config(TerminalConfig { debug_mode });
    let mut stdout = terminal.setup_terminal()?;
    let result = run_session(&mut stdout, &mut session, &EventHandler::new()).await;

    session.teardown();
    terminal.cleanup_terminal(stdout)?;
    result
}
