//! Serverless entry point of the key-hiding game-data proxy.
//!
//! Reads its settings from the environment once at cold start, then serves
//! every invocation through [`ApiProxy::handle`].

use lambda_http::{Body, Error, Request, RequestExt, Response, run, service_fn};
use release_calendar::proxy::{ApiProxy, ProxyConfig, ProxyRequest};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

async fn handler(proxy: Arc<ApiProxy>, event: Request) -> Result<Response<Body>, Error> {
    let query = event
        .query_string_parameters()
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    let request = ProxyRequest::new(event.uri().path(), query);

    let (parts, body) = proxy.handle(request).await.into_parts();
    let body = match String::from_utf8(body) {
        Ok(text) => Body::from(text),
        Err(e) => Body::from(e.into_bytes()),
    };
    Ok(Response::from_parts(parts, body))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ProxyConfig::from_env();
    if config.api_key().is_none() {
        warn!("No upstream API key configured; every request will be rejected");
    }
    info!("Starting proxy for {}", config.base_url());

    let proxy = Arc::new(ApiProxy::new(config)?);

    run(service_fn(move |event| {
        let proxy = Arc::clone(&proxy);
        async move { handler(proxy, event).await }
    }))
    .await
}
