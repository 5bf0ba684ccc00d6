//! Game search: debounced suggestions and name resolution

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::constants::{search, upstream};
use crate::data_fetcher::api::{GameApiClient, SearchPrecision};
use crate::data_fetcher::models::GameRecord;
use crate::error::AppError;

/// Whether a query is long enough to be sent anywhere
pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= search::MIN_QUERY_CHARS
}

/// Search operations against the proxy.
#[derive(Debug, Clone)]
pub struct SearchService {
    api: GameApiClient,
    debounce: Duration,
}

impl SearchService {
    pub fn new(api: GameApiClient) -> Self {
        Self::with_debounce(api, Duration::from_millis(search::DEBOUNCE_MS))
    }

    pub fn with_debounce(api: GameApiClient, debounce: Duration) -> Self {
        Self { api, debounce }
    }

    /// Precise-match suggestions for `query`, at most six, in upstream order.
    ///
    /// Queries shorter than three characters yield an empty list without a
    /// request. This is the undebounced primitive; interactive input goes
    /// through [`SuggestionDebouncer`].
    #[instrument(skip(self))]
    pub async fn suggest(&self, query: &str) -> Result<Vec<GameRecord>, AppError> {
        if !is_searchable(query) {
            return Ok(Vec::new());
        }
        self.api
            .search(
                query.trim(),
                SearchPrecision::Precise,
                upstream::SUGGESTION_PAGE_SIZE,
            )
            .await
    }

    /// Resolves a game for navigation.
    ///
    /// A caller that already knows the release date (a picked suggestion)
    /// gets a record built from the supplied fields with no request.
    /// Otherwise an exact-match search for one result is issued.
    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        name: &str,
        released: Option<String>,
        slug: Option<String>,
    ) -> Result<GameRecord, AppError> {
        if let Some(released) = released.filter(|date| !date.trim().is_empty()) {
            debug!("Release date supplied for '{}', skipping lookup", name);
            return Ok(GameRecord::from_selection(name, Some(released), slug));
        }

        let mut matches = self
            .api
            .search(name.trim(), SearchPrecision::Exact, upstream::RESOLVE_PAGE_SIZE)
            .await?;

        if matches.is_empty() {
            warn!("No exact match for '{}'", name);
            return Err(AppError::game_not_found(name));
        }

        let game = matches.swap_remove(0);
        info!("Resolved '{}' to '{}'", name, game.name);
        Ok(game)
    }

    /// Creates a debouncer delivering suggestion updates on the returned channel
    pub fn debouncer(&self) -> (SuggestionDebouncer, mpsc::UnboundedReceiver<SuggestionUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = SuggestionDebouncer {
            search: self.clone(),
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
            tx,
        };
        (debouncer, rx)
    }
}

/// Suggestions for one query, or the reason there are none
#[derive(Debug)]
pub struct SuggestionUpdate {
    pub query: String,
    pub result: Result<Vec<GameRecord>, AppError>,
}

/// Keystroke-driven suggestion scheduling.
///
/// Each input cancels whatever is pending and schedules a new request after
/// the quiet period. A response is only delivered if no newer input arrived
/// while it was in flight, so at most one result per burst reaches the UI.
#[derive(Debug)]
pub struct SuggestionDebouncer {
    search: SearchService,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<SuggestionUpdate>,
}

impl SuggestionDebouncer {
    /// Handles the current contents of the search box
    pub fn on_input(&mut self, query: &str) {
        self.cancel();
        let generation = self.generation.load(Ordering::SeqCst);

        if !is_searchable(query) {
            let _ = self.tx.send(SuggestionUpdate {
                query: query.to_string(),
                result: Ok(Vec::new()),
            });
            return;
        }

        let search = self.search.clone();
        let current = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        let query = query.to_string();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(search.debounce).await;
            debug!("Debounce elapsed, requesting suggestions for '{}'", query);
            let result = search.suggest(&query).await;

            if current.load(Ordering::SeqCst) != generation {
                debug!("Discarding superseded suggestions for '{}'", query);
                return;
            }
            let _ = tx.send(SuggestionUpdate { query, result });
        }));
    }

    /// Cancels the pending request, if any
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a scheduled request has not finished yet
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for SuggestionDebouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
