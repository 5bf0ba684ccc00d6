//! Inbound request model and upstream URL construction.

use reqwest::Url;

use super::ProxyError;
use super::config::ProxyConfig;
use crate::calendar::dates::{YearMonth, format_api_date};
use crate::constants::{params, upstream};

/// What the proxy received: the request path and its query pairs in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl ProxyRequest {
    pub fn new(path: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    pub fn from_pairs<K, V>(path: &str, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            path,
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// First value of `name`, ignoring blank values
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// How an inbound request is translated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyMode {
    /// A month's releases; `month` is zero-based
    DateRange(YearMonth),
    /// Free-text search
    Search(String),
    /// Generic forwarding of a sub-path under the upstream base
    Passthrough(String),
}

impl ProxyMode {
    /// Selects the mode: `month`+`year` first, then `searchQuery`, then a
    /// forwarded sub-path.
    pub fn select(request: &ProxyRequest, config: &ProxyConfig) -> Result<Self, ProxyError> {
        let month = request.param(params::MONTH);
        let year = request.param(params::YEAR);

        if let (Some(month), Some(year)) = (month, year) {
            let month0 = month.parse::<u32>().map_err(|_| {
                ProxyError::invalid_parameter(format!("'month' must be 0-11, got '{month}'"))
            })?;
            let year = year.parse::<i32>().map_err(|_| {
                ProxyError::invalid_parameter(format!("'year' must be an integer, got '{year}'"))
            })?;
            let target = YearMonth::new(year, month0).ok_or_else(|| {
                if month0 > 11 {
                    ProxyError::invalid_parameter(format!("'month' must be 0-11, got '{month0}'"))
                } else {
                    ProxyError::invalid_parameter(format!("'year' is out of range, got '{year}'"))
                }
            })?;
            return Ok(ProxyMode::DateRange(target));
        }

        if let Some(query) = request.param(params::SEARCH_QUERY) {
            return Ok(ProxyMode::Search(query.to_string()));
        }

        let sub_path = config.sub_path(&request.path);
        if !sub_path.is_empty() {
            return Ok(ProxyMode::Passthrough(sub_path.to_string()));
        }

        Err(ProxyError::MissingParameters)
    }
}

/// Upstream request without the key; the key is only attached when sending
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    mode: ProxyMode,
    url: Url,
}

impl UpstreamRequest {
    pub fn build(request: &ProxyRequest, config: &ProxyConfig) -> Result<Self, ProxyError> {
        let mode = ProxyMode::select(request, config)?;

        let path = match &mode {
            ProxyMode::DateRange(_) | ProxyMode::Search(_) => upstream::GAMES_PATH,
            ProxyMode::Passthrough(sub_path) => sub_path.as_str(),
        };
        let mut url = Url::parse(&format!("{}/{}", config.base_url(), path))
            .map_err(|e| ProxyError::invalid_parameter(format!("bad upstream URL: {e}")))?;

        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in forwarded_params(request, &mode) {
                pairs.append_pair(name, value);
            }

            match &mode {
                ProxyMode::DateRange(month) => {
                    let (start, end) = month.date_range();
                    let dates = format!("{},{}", format_api_date(start), format_api_date(end));
                    pairs.append_pair(params::DATES, &dates);
                    if request.param(params::ORDERING).is_none() {
                        pairs.append_pair(params::ORDERING, upstream::DEFAULT_ORDERING);
                    }
                    if request.param(params::PAGE_SIZE).is_none() {
                        pairs.append_pair(
                            params::PAGE_SIZE,
                            &upstream::MONTH_PAGE_SIZE.to_string(),
                        );
                    }
                }
                ProxyMode::Search(query) => {
                    pairs.append_pair(params::SEARCH, query);
                    if request.param(params::PAGE_SIZE).is_none() {
                        pairs.append_pair(
                            params::PAGE_SIZE,
                            &upstream::SUGGESTION_PAGE_SIZE.to_string(),
                        );
                    }
                }
                ProxyMode::Passthrough(_) => {}
            }
        }

        Ok(Self { mode, url })
    }

    pub fn mode(&self) -> &ProxyMode {
        &self.mode
    }

    /// The URL that is actually sent, with `key` appended
    pub fn url_with_key(&self, api_key: &str) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut().append_pair(params::KEY, api_key);
        url
    }

    /// The URL as it may appear in logs
    pub fn redacted_url(&self) -> Url {
        self.url_with_key(upstream::REDACTED_KEY)
    }
}

/// Inbound parameters copied upstream.
///
/// Any inbound `key` is dropped so the configured one always wins, and the
/// proxy's own control parameters are consumed by the mode instead of being
/// copied. Passthrough forwards everything else untouched.
fn forwarded_params<'a>(
    request: &'a ProxyRequest,
    mode: &ProxyMode,
) -> impl Iterator<Item = (&'a str, &'a str)> {
    let strip_controls = !matches!(mode, ProxyMode::Passthrough(_));
    request
        .query
        .iter()
        .filter(move |(name, _)| {
            name != params::KEY
                && !(strip_controls
                    && matches!(
                        name.as_str(),
                        params::MONTH | params::YEAR | params::SEARCH_QUERY | params::SEARCH
                    ))
        })
        .map(|(name, value)| (name.as_str(), value.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProxyConfig {
        ProxyConfig::new(Some("secret".to_string()))
    }

    fn query_of(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn value<'a>(pairs: &'a [(String, String)], name: &str) -> Vec<&'a str> {
        pairs
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn test_date_range_for_every_month_of_leap_year() {
        let expected_last = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (month0, last) in expected_last.iter().enumerate() {
            let request = ProxyRequest::from_pairs(
                "",
                [("month", month0.to_string()), ("year", "2024".to_string())],
            );
            let upstream = UpstreamRequest::build(&request, &config()).unwrap();
            let pairs = query_of(&upstream.redacted_url());
            let m = month0 + 1;
            assert_eq!(
                value(&pairs, "dates"),
                vec![format!("2024-{m:02}-01,2024-{m:02}-{last}").as_str()]
            );
        }
    }

    #[test]
    fn test_date_range_defaults_and_overrides() {
        let request = ProxyRequest::from_pairs("", [("month", "1"), ("year", "2023")]);
        let url = UpstreamRequest::build(&request, &config())
            .unwrap()
            .redacted_url();
        assert_eq!(url.path(), "/api/games");
        let pairs = query_of(&url);
        assert_eq!(value(&pairs, "dates"), vec!["2023-02-01,2023-02-28"]);
        assert_eq!(value(&pairs, "ordering"), vec!["-metacritic,-added"]);
        assert_eq!(value(&pairs, "page_size"), vec!["40"]);
        assert!(value(&pairs, "month").is_empty());

        let request = ProxyRequest::from_pairs(
            "",
            [
                ("month", "1"),
                ("year", "2023"),
                ("ordering", "-rating"),
                ("page_size", "10"),
            ],
        );
        let pairs = query_of(
            &UpstreamRequest::build(&request, &config())
                .unwrap()
                .redacted_url(),
        );
        assert_eq!(value(&pairs, "ordering"), vec!["-rating"]);
        assert_eq!(value(&pairs, "page_size"), vec!["10"]);
    }

    #[test]
    fn test_search_mode() {
        let request = ProxyRequest::from_pairs(
            "",
            [("searchQuery", "hades"), ("search_exact", "true")],
        );
        let upstream = UpstreamRequest::build(&request, &config()).unwrap();
        assert_eq!(upstream.mode(), &ProxyMode::Search("hades".to_string()));

        let pairs = query_of(&upstream.redacted_url());
        assert_eq!(value(&pairs, "search"), vec!["hades"]);
        assert_eq!(value(&pairs, "page_size"), vec!["6"]);
        assert_eq!(value(&pairs, "search_exact"), vec!["true"]);
        assert!(value(&pairs, "searchQuery").is_empty());
    }

    #[test]
    fn test_date_range_wins_over_search() {
        let request = ProxyRequest::from_pairs(
            "",
            [("searchQuery", "hades"), ("month", "0"), ("year", "2020")],
        );
        let mode = ProxyMode::select(&request, &config()).unwrap();
        assert!(matches!(mode, ProxyMode::DateRange(m) if m.cache_key() == "2020-01"));
    }

    #[test]
    fn test_invalid_month_and_year_rejected() {
        for (month, year) in [("12", "2024"), ("-1", "2024"), ("jan", "2024"), ("1", "soon")] {
            let request = ProxyRequest::from_pairs("", [("month", month), ("year", year)]);
            let error = ProxyMode::select(&request, &config()).unwrap_err();
            assert!(matches!(error, ProxyError::InvalidParameter(_)), "{month}/{year}");
            assert_eq!(error.status(), http::StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_out_of_range_year_names_the_year() {
        let request = ProxyRequest::from_pairs("", [("month", "1"), ("year", "999999")]);
        let error = ProxyMode::select(&request, &config()).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("'year'"), "{message}");
        assert!(message.contains("999999"), "{message}");
        assert!(!message.contains("'month'"), "{message}");
    }

    #[test]
    fn test_missing_parameters() {
        for request in [
            ProxyRequest::default(),
            ProxyRequest::from_pairs("/api/proxy", [("year", "2024")]),
            ProxyRequest::from_pairs("/api/proxy/", [("searchQuery", "  ")]),
            ProxyRequest::from_pairs("/api/proxyfoo", Vec::<(String, String)>::new()),
        ] {
            let error = ProxyMode::select(&request, &config()).unwrap_err();
            assert!(matches!(error, ProxyError::MissingParameters));
        }
    }

    #[test]
    fn test_inbound_key_is_overwritten() {
        let request = ProxyRequest::from_pairs(
            "/api/proxy/genres",
            [("key", "attacker"), ("page", "3")],
        );
        let upstream = UpstreamRequest::build(&request, &config()).unwrap();
        assert_eq!(upstream.mode(), &ProxyMode::Passthrough("genres".to_string()));

        let pairs = query_of(&upstream.url_with_key("secret"));
        assert_eq!(value(&pairs, "key"), vec!["secret"]);
        assert_eq!(value(&pairs, "page"), vec!["3"]);
    }

    #[test]
    fn test_redacted_url_never_contains_key() {
        let request = ProxyRequest::from_pairs("", [("searchQuery", "secret sauce")]);
        let upstream = UpstreamRequest::build(&request, &config()).unwrap();
        let redacted = upstream.redacted_url().to_string();
        assert!(redacted.contains("key=REDACTED"));
        assert!(!redacted.contains("key=secret"));
    }
}
