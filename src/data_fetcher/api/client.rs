use reqwest::Client;
use tracing::{debug, instrument};

use super::fetch_utils::fetch;
use super::http_client::create_http_client_with_timeout;
use super::urls::{SearchPrecision, build_month_url, build_search_url};
use crate::calendar::dates::YearMonth;
use crate::config::Config;
use crate::data_fetcher::models::{GameRecord, GamesResponse};
use crate::error::AppError;

/// Thin client for the API proxy.
///
/// Cheap to clone: the underlying reqwest client shares its connection pool.
#[derive(Debug, Clone)]
pub struct GameApiClient {
    client: Client,
    proxy_url: String,
}

impl GameApiClient {
    pub fn new(client: Client, proxy_url: impl Into<String>) -> Self {
        Self {
            client,
            proxy_url: proxy_url.into(),
        }
    }

    /// Creates a client with the timeout and proxy URL from `config`
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client, config.resolved_proxy_url()))
    }

    pub fn proxy_url(&self) -> &str {
        &self.proxy_url
    }

    /// Releases of one month, in upstream order
    #[instrument(skip(self), fields(month = %month))]
    pub async fn fetch_month(&self, month: YearMonth) -> Result<Vec<GameRecord>, AppError> {
        let url = build_month_url(&self.proxy_url, month)?;
        let response: GamesResponse = fetch(&self.client, url.as_str()).await?;
        debug!("Month {} returned {} games", month, response.results.len());
        Ok(response.results)
    }

    /// Search results, in upstream order
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        precision: SearchPrecision,
        page_size: u32,
    ) -> Result<Vec<GameRecord>, AppError> {
        let url = build_search_url(&self.proxy_url, query, precision, page_size)?;
        let response: GamesResponse = fetch(&self.client, url.as_str()).await?;
        debug!(
            "Search '{}' ({:?}) returned {} games",
            query,
            precision,
            response.results.len()
        );
        Ok(response.results)
    }
}
