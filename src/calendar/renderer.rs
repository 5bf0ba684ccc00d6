//! Calendar orchestration: navigation, rendering state and error overlay.

use chrono::{Local, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::dates::{YearMonth, parse_release_date};
use super::grid::CalendarGrid;
use super::slideshow::SlideshowController;
use crate::data_fetcher::models::GameRecord;
use crate::data_fetcher::{MonthGameFetcher, SearchService};
use crate::error::AppError;

type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// What the calendar is doing right now.
///
/// `Error` is an overlay: the last rendered month and its grid stay in place
/// until the next successful navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderStatus {
    Idle,
    Loading(YearMonth),
    Rendered(YearMonth),
    Error(String),
}

/// Identifies one navigation; only the most recently issued ticket may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationTicket {
    generation: u64,
    target: YearMonth,
}

impl NavigationTicket {
    pub fn target(&self) -> YearMonth {
        self.target
    }
}

/// Session-wide calendar context.
///
/// Owns the displayed month, the current grid and the slideshow timers.
/// Navigation is split into [`CalendarRenderer::begin_navigation`] and
/// [`CalendarRenderer::complete_navigation`] so the fetch in between can run
/// elsewhere; the `navigate*`/`jump_*` methods do both in one call.
pub struct CalendarRenderer {
    fetcher: MonthGameFetcher,
    search: SearchService,
    slideshow: SlideshowController,
    display: Option<YearMonth>,
    grid: Option<CalendarGrid>,
    status: RenderStatus,
    generation: u64,
    today: Clock,
}

impl CalendarRenderer {
    pub fn new(fetcher: MonthGameFetcher, search: SearchService) -> Self {
        Self {
            fetcher,
            search,
            slideshow: SlideshowController::new(),
            display: None,
            grid: None,
            status: RenderStatus::Idle,
            generation: 0,
            today: Arc::new(|| Utc::now().with_timezone(&Local).date_naive()),
        }
    }

    /// Replaces the source of "today", used for the today marker and `jump_to_today`
    pub fn with_clock(mut self, today: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.today = Arc::new(today);
        self
    }

    pub fn with_slideshow(mut self, slideshow: SlideshowController) -> Self {
        self.slideshow = slideshow;
        self
    }

    pub fn status(&self) -> &RenderStatus {
        &self.status
    }

    /// Last successfully rendered month
    pub fn display(&self) -> Option<YearMonth> {
        self.display
    }

    pub fn grid(&self) -> Option<&CalendarGrid> {
        self.grid.as_ref()
    }

    /// Text of the visible message region, if an error is shown
    pub fn message(&self) -> Option<&str> {
        match &self.status {
            RenderStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, RenderStatus::Loading(_))
    }

    pub fn slideshow(&self) -> &SlideshowController {
        &self.slideshow
    }

    pub fn fetcher(&self) -> &MonthGameFetcher {
        &self.fetcher
    }

    pub fn search(&self) -> &SearchService {
        &self.search
    }

    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }

    /// Month a relative navigation starts from
    pub fn current_month(&self) -> YearMonth {
        self.display.unwrap_or_else(|| YearMonth::from_date(self.today()))
    }

    /// Month relative navigation moves from while a load is in flight
    pub fn navigation_base(&self) -> YearMonth {
        match self.status {
            RenderStatus::Loading(target) => target,
            _ => self.current_month(),
        }
    }

    /// Enters `Loading` for `target` and supersedes any navigation in flight.
    pub fn begin_navigation(&mut self, target: YearMonth) -> NavigationTicket {
        self.generation += 1;
        self.status = RenderStatus::Loading(target);
        debug!("Navigation #{} to {}", self.generation, target);
        NavigationTicket {
            generation: self.generation,
            target,
        }
    }

    /// Applies the fetch result of a navigation.
    ///
    /// Returns `false` when the ticket was superseded by a newer navigation,
    /// in which case nothing changes.
    pub fn complete_navigation(
        &mut self,
        ticket: NavigationTicket,
        result: Result<Arc<Vec<GameRecord>>, AppError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Discarding result for {} from superseded navigation #{}",
                ticket.target, ticket.generation
            );
            return false;
        }

        match result {
            Ok(games) => self.enter_rendered(ticket.target, &games),
            Err(e) => self.report_error(&e),
        }
        true
    }

    /// Shows an error in the message region, keeping the current grid
    pub fn report_error(&mut self, error: &AppError) {
        warn!("Calendar error: {}", error);
        self.status = RenderStatus::Error(error.user_message());
    }

    /// Stops all slideshow timers and returns to `Idle`
    pub fn teardown(&mut self) {
        self.slideshow.cancel_all();
        self.status = RenderStatus::Idle;
    }

    fn enter_rendered(&mut self, month: YearMonth, games: &[GameRecord]) {
        let grid = CalendarGrid::build(month, games, self.today());
        self.slideshow.start(&grid);
        info!(
            "Rendered {}: {} of {} games placed on the grid",
            month,
            grid.game_count(),
            games.len()
        );
        self.grid = Some(grid);
        self.display = Some(month);
        self.status = RenderStatus::Rendered(month);
    }

    /// Fetches and renders `target`
    pub async fn navigate_to(&mut self, target: YearMonth) -> bool {
        let ticket = self.begin_navigation(target);
        let result = self.fetcher.fetch(target).await;
        self.complete_navigation(ticket, result)
    }

    /// Moves `delta` months from the displayed month
    pub async fn navigate(&mut self, delta: i32) -> bool {
        let target = self.current_month().shift(delta);
        self.navigate_to(target).await
    }

    pub async fn jump_to_today(&mut self) -> bool {
        let target = YearMonth::from_date(self.today());
        self.navigate_to(target).await
    }

    /// Jumps to a year and zero-based month
    pub async fn jump_to_date(&mut self, year: i32, month0: u32) -> bool {
        match YearMonth::new(year, month0) {
            Some(target) => self.navigate_to(target).await,
            None => {
                let month = month0.saturating_add(1);
                self.report_error(&AppError::invalid_date(format!("{year}-{month}")));
                false
            }
        }
    }

    /// Resolves a game and jumps to its release month.
    ///
    /// Nothing is navigated when the game is unknown or has no usable release
    /// date; the reason is shown instead.
    pub async fn jump_to_game(
        &mut self,
        name: &str,
        released: Option<String>,
        slug: Option<String>,
    ) -> bool {
        match resolve_game_month(&self.search, name, released, slug).await {
            Ok(target) => self.navigate_to(target).await,
            Err(e) => {
                self.report_error(&e);
                false
            }
        }
    }
}

/// Release month of a game, resolved through `search`
pub async fn resolve_game_month(
    search: &SearchService,
    name: &str,
    released: Option<String>,
    slug: Option<String>,
) -> Result<YearMonth, AppError> {
    let game = search.resolve(name, released, slug).await?;
    let released = game
        .released
        .as_deref()
        .ok_or_else(|| AppError::missing_release_date(&game.name))?;
    let date = parse_release_date(released).ok_or_else(|| AppError::invalid_date(released))?;
    info!("'{}' releases on {}", game.name, date);
    Ok(YearMonth::from_date(date))
}
