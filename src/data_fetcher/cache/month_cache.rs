//! Session-lifetime cache of fetched months

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::calendar::dates::YearMonth;
use crate::data_fetcher::models::GameRecord;

/// Fetched releases keyed by `YYYY-MM`.
///
/// Entries never expire and are never evicted: a month fetched once is served
/// from memory for the rest of the session. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MonthCache {
    entries: Arc<RwLock<HashMap<String, Arc<Vec<GameRecord>>>>>,
}

impl MonthCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached sequence for a month, if it was fetched before
    #[instrument(skip(self), fields(cache_key = %month.cache_key()))]
    pub async fn get(&self, month: YearMonth) -> Option<Arc<Vec<GameRecord>>> {
        let cache = self.entries.read().await;
        match cache.get(&month.cache_key()) {
            Some(games) => {
                debug!("Cache hit for month: games={}", games.len());
                Some(Arc::clone(games))
            }
            None => {
                debug!("Cache miss for month");
                None
            }
        }
    }

    /// Stores the full ordered sequence of a month, replacing any previous entry
    #[instrument(skip(self, games), fields(cache_key = %month.cache_key()))]
    pub async fn insert(&self, month: YearMonth, games: Vec<GameRecord>) -> Arc<Vec<GameRecord>> {
        let games = Arc::new(games);
        let mut cache = self.entries.write().await;
        cache.insert(month.cache_key(), Arc::clone(&games));
        info!("Cached month: games={}", games.len());
        games
    }

    pub async fn contains(&self, month: YearMonth) -> bool {
        self.entries.read().await.contains_key(&month.cache_key())
    }

    /// Number of cached months
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drops every entry; navigation itself never calls this
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
