//! URL building utilities for proxy requests
//!
//! The calendar never talks to the game-data service directly: every URL built
//! here targets the proxy, which injects the secret key.

use crate::calendar::dates::YearMonth;
use crate::constants::{params, upstream};
use crate::error::AppError;
use reqwest::Url;

/// Match strictness for a proxied search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPrecision {
    /// Fuzzy-but-ranked matching used for suggestions
    Precise,
    /// Exact title matching used to resolve a typed name
    Exact,
}

fn parse_proxy_url(proxy_url: &str) -> Result<Url, AppError> {
    Url::parse(proxy_url)
        .map_err(|e| AppError::config_error(format!("Invalid proxy URL '{proxy_url}': {e}")))
}

/// Builds the proxy URL for one month of releases in date-range mode.
///
/// # Example
/// ```
/// use release_calendar::calendar::dates::YearMonth;
/// use release_calendar::data_fetcher::api::build_month_url;
///
/// let month = YearMonth::new(2024, 1).unwrap();
/// let url = build_month_url("https://proxy.example.com/api/proxy", month).unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://proxy.example.com/api/proxy?month=1&year=2024&ordering=-metacritic%2C-added&page_size=40"
/// );
/// ```
pub fn build_month_url(proxy_url: &str, month: YearMonth) -> Result<Url, AppError> {
    let mut url = parse_proxy_url(proxy_url)?;
    url.query_pairs_mut()
        .append_pair(params::MONTH, &month.month0().to_string())
        .append_pair(params::YEAR, &month.year().to_string())
        .append_pair(params::ORDERING, upstream::DEFAULT_ORDERING)
        .append_pair(params::PAGE_SIZE, &upstream::MONTH_PAGE_SIZE.to_string());
    Ok(url)
}

/// Builds the proxy URL for a search in search mode.
///
/// # Example
/// ```
/// use release_calendar::data_fetcher::api::{build_search_url, SearchPrecision};
///
/// let url = build_search_url("https://proxy.example.com", "zelda botw", SearchPrecision::Exact, 1)
///     .unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://proxy.example.com/?searchQuery=zelda+botw&page_size=1&search_exact=true"
/// );
/// ```
pub fn build_search_url(
    proxy_url: &str,
    query: &str,
    precision: SearchPrecision,
    page_size: u32,
) -> Result<Url, AppError> {
    let mut url = parse_proxy_url(proxy_url)?;
    let flag = match precision {
        SearchPrecision::Precise => params::SEARCH_PRECISE,
        SearchPrecision::Exact => params::SEARCH_EXACT,
    };
    url.query_pairs_mut()
        .append_pair(params::SEARCH_QUERY, query)
        .append_pair(params::PAGE_SIZE, &page_size.to_string())
        .append_pair(flag, "true");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_url_uses_zero_based_month() {
        let url = build_month_url("http://localhost:9000/", YearMonth::new(2023, 11).unwrap())
            .unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("month".to_string(), "11".to_string())));
        assert!(pairs.contains(&("year".to_string(), "2023".to_string())));
        assert!(pairs.contains(&("ordering".to_string(), "-metacritic,-added".to_string())));
        assert!(pairs.contains(&("page_size".to_string(), "40".to_string())));
    }

    #[test]
    fn test_search_url_precise_flag() {
        let url = build_search_url(
            "http://localhost:9000/",
            "zelda",
            SearchPrecision::Precise,
            upstream::SUGGESTION_PAGE_SIZE,
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/?searchQuery=zelda&page_size=6&search_precise=true"
        );
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = build_search_url(
            "http://localhost:9000/",
            "Ratchet & Clank",
            SearchPrecision::Exact,
            1,
        )
        .unwrap();
        assert!(url.as_str().contains("searchQuery=Ratchet+%26+Clank"));
    }

    #[test]
    fn test_invalid_proxy_url_is_config_error() {
        let result = build_month_url("not a url", YearMonth::new(2024, 0).unwrap());
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
