//! Month-at-a-time release fetching backed by [`MonthCache`]

use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::calendar::dates::{YearMonth, format_api_date};
use crate::data_fetcher::api::GameApiClient;
use crate::data_fetcher::cache::MonthCache;
use crate::data_fetcher::models::GameRecord;
use crate::error::AppError;

/// Fetches a month's releases through the proxy, at most once per month.
///
/// Clones share both the HTTP client and the cache, so a clone can be moved
/// into a spawned navigation task.
#[derive(Debug, Clone)]
pub struct MonthGameFetcher {
    api: GameApiClient,
    cache: MonthCache,
}

impl MonthGameFetcher {
    pub fn new(api: GameApiClient) -> Self {
        Self::with_cache(api, MonthCache::new())
    }

    pub fn with_cache(api: GameApiClient, cache: MonthCache) -> Self {
        Self { api, cache }
    }

    pub fn cache(&self) -> &MonthCache {
        &self.cache
    }

    /// Returns the releases of `month` ordered by descending metacritic, then
    /// most recently added.
    ///
    /// A cached month is returned without network access. On failure nothing
    /// is cached, so calling again with the same month is the retry.
    #[instrument(skip(self), fields(month = %month))]
    pub async fn fetch(&self, month: YearMonth) -> Result<Arc<Vec<GameRecord>>, AppError> {
        if let Some(games) = self.cache.get(month).await {
            info!("Using cached releases for {}", month);
            return Ok(games);
        }

        let (start, end) = month.date_range();
        info!(
            "Cache miss, fetching releases between {} and {}",
            format_api_date(start),
            format_api_date(end)
        );

        match self.api.fetch_month(month).await {
            Ok(games) => Ok(self.cache.insert(month, games).await),
            Err(e) => {
                error!("Failed to fetch releases for {}: {}", month, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::http_client::create_test_http_client;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn fetcher_for(server: &MockServer) -> MonthGameFetcher {
        MonthGameFetcher::new(GameApiClient::new(create_test_http_client(), server.uri()))
    }

    fn february_body() -> serde_json::Value {
        serde_json::json!({
            "results": [
                {"name": "Final Fantasy VII Rebirth", "released": "2024-02-29", "metacritic": 92},
                {"name": "Persona 3 Reload", "released": "2024-02-02", "metacritic": 89},
                {"name": "Skull and Bones", "released": "2024-02-16", "metacritic": 59}
            ]
        })
    }

    #[tokio::test]
    async fn test_second_fetch_is_served_from_cache() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("month", "1"))
            .and(query_param("year", "2024"))
            .respond_with(ResponseTemplate::new(200).set_body_json(february_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = fetcher_for(&mock_server);
        let month = YearMonth::new(2024, 1).unwrap();

        let first = fetcher.fetch(month).await.unwrap();
        let second = fetcher.fetch(month).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 3);
        assert_eq!(second[0].name, "Final Fantasy VII Rebirth");
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(502)
                    .set_body_json(serde_json::json!({"error": "upstream unreachable"})),
            )
            .up_to_n_times(1)
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(february_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = fetcher_for(&mock_server);
        let month = YearMonth::new(2024, 1).unwrap();

        let first = fetcher.fetch(month).await;
        assert!(matches!(first, Err(AppError::Upstream { status: 502, .. })));
        assert!(!fetcher.cache().contains(month).await);

        let retry = fetcher.fetch(month).await.unwrap();
        assert_eq!(retry.len(), 3);
        assert!(fetcher.cache().contains(month).await);
    }

    #[tokio::test]
    async fn test_months_are_cached_independently() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(february_body()))
            .expect(2)
            .mount(&mock_server)
            .await;

        let fetcher = fetcher_for(&mock_server);
        fetcher.fetch(YearMonth::new(2024, 1).unwrap()).await.unwrap();
        fetcher.fetch(YearMonth::new(2024, 2).unwrap()).await.unwrap();
        fetcher.fetch(YearMonth::new(2024, 1).unwrap()).await.unwrap();

        assert_eq!(fetcher.cache().len().await, 2);
    }
}
