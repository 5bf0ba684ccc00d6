//! Key-hiding proxy in front of the game-data service.
//!
//! The proxy turns an inbound query (and optional forwarded sub-path) into an
//! upstream URL carrying the secret key, issues the request and hands back
//! the upstream status and body. The key never appears in responses or logs.

pub mod config;
pub mod request;

mod response;

pub use config::ProxyConfig;
pub use request::{ProxyMode, ProxyRequest, UpstreamRequest};

use http::{Response, StatusCode};
use reqwest::Client;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::data_fetcher::api::create_http_client_with_timeout;
use response::{error_response, json_response};

/// Failures the proxy reports itself, as opposed to forwarded upstream statuses
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("API key configuration error on server.")]
    MissingApiKey,

    #[error("Missing required parameters: provide 'month' and 'year', or 'searchQuery'.")]
    MissingParameters,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to reach game data service: {0}")]
    Network(String),
}

impl ProxyError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::MissingParameters | ProxyError::InvalidParameter(_) => {
                StatusCode::BAD_REQUEST
            }
            ProxyError::Network(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// The proxy service; one instance serves every request of the process.
#[derive(Debug, Clone)]
pub struct ApiProxy {
    config: ProxyConfig,
    client: Client,
}

impl ApiProxy {
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: ProxyConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Serves one inbound request. Every outcome, including failures, is a
    /// JSON response.
    #[instrument(skip(self, request), fields(path = %request.path))]
    pub async fn handle(&self, request: ProxyRequest) -> Response<Vec<u8>> {
        match self.forward(&request).await {
            Ok(response) => response,
            Err(e) => {
                match &e {
                    ProxyError::MissingApiKey => error!("{}", e),
                    ProxyError::Network(_) => error!("{}", e),
                    _ => warn!("Rejected request: {}", e),
                }
                error_response(e.status(), &e.to_string())
            }
        }
    }

    async fn forward(&self, request: &ProxyRequest) -> Result<Response<Vec<u8>>, ProxyError> {
        let api_key = self.config.api_key().ok_or(ProxyError::MissingApiKey)?;

        let upstream = UpstreamRequest::build(request, &self.config)?;
        info!(
            "Forwarding {:?} request to {}",
            upstream.mode(),
            upstream.redacted_url()
        );

        let response = self
            .client
            .get(upstream.url_with_key(api_key))
            .send()
            .await
            .map_err(|e| ProxyError::Network(describe_transport_error(e)))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProxyError::Network(describe_transport_error(e)))?
            .to_vec();

        if (200..300).contains(&status) {
            info!("Upstream answered {} ({} bytes)", status, body.len());
            Ok(json_response(StatusCode::OK, body))
        } else {
            warn!("Upstream answered {}, forwarding unchanged", status);
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            Ok(json_response(status, body))
        }
    }
}

/// Transport error text without the request URL, which would carry the key
fn describe_transport_error(error: reqwest::Error) -> String {
    error.without_url().to_string()
}
