//! Generic HTTP fetching with status-code aware error handling

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use crate::data_fetcher::models::ErrorBody;
use crate::error::AppError;

/// Fetches and parses a JSON document.
///
/// Failures are never retried here: a transport failure becomes a network
/// error, a non-success status becomes [`AppError::Upstream`] carrying the
/// service's `detail`/`error` message, and a body that does not parse is
/// classified as empty, malformed or unexpected.
///
/// # Arguments
/// * `client` - HTTP client for making requests
/// * `url` - URL to fetch data from
///
/// # Returns
/// * `Result<T, AppError>` - Parsed response data or error
#[instrument(skip(client))]
pub async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    info!("Fetching data from URL: {url}");

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            error!("Request failed for URL {}: {}", url, e);
            return Err(if e.is_timeout() {
                AppError::network_timeout(url)
            } else {
                AppError::network_connection(url, e.to_string())
            });
        }
    };

    let status = response.status();
    debug!("Response status: {status}");

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::network_connection(url, e.to_string()));
        }
    };

    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("Unknown error");
        let message = serde_json::from_str::<ErrorBody>(&response_text)
            .ok()
            .and_then(|body| body.message().map(str::to_string))
            .unwrap_or_else(|| reason.to_string());

        error!("HTTP {} - {} (URL: {})", status.as_u16(), message, url);
        return Err(AppError::upstream(status.as_u16(), message, url));
    }

    debug!("Response length: {} bytes", response_text.len());

    match serde_json::from_str::<T>(&response_text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            error!(
                "Response text (first 200 chars): {}",
                &response_text.chars().take(200).collect::<String>()
            );

            if response_text.trim().is_empty() {
                Err(AppError::api_malformed_json("Response body is empty", url))
            } else if !response_text.trim_start().starts_with('{')
                && !response_text.trim_start().starts_with('[')
            {
                Err(AppError::api_malformed_json(
                    "Response is not valid JSON",
                    url,
                ))
            } else {
                // Valid JSON but unexpected structure
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}
