use std::env;
use tracing::warn;

use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECONDS, env_vars, upstream};

/// Path prefix under which the proxy is mounted when `PROXY_PATH_PREFIX` is unset
pub const DEFAULT_PATH_PREFIX: &str = "/api/proxy";

/// Runtime settings of the proxy, read from its execution environment.
///
/// The key is kept optional: a proxy without a key still starts and answers
/// every request with a configuration error.
#[derive(Clone)]
pub struct ProxyConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub path_prefix: String,
    pub http_timeout_seconds: u64,
}

impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| upstream::REDACTED_KEY))
            .field("base_url", &self.base_url)
            .field("path_prefix", &self.path_prefix)
            .field("http_timeout_seconds", &self.http_timeout_seconds)
            .finish()
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ProxyConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: upstream::DEFAULT_BASE_URL.to_string(),
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            http_timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
        }
    }

    /// Reads `GAME_API_KEY`, `GAME_API_BASE_URL`, `PROXY_PATH_PREFIX` and
    /// `PROXY_HTTP_TIMEOUT`, falling back to defaults for everything but the key.
    pub fn from_env() -> Self {
        let mut config = Self::new(env::var(env_vars::GAME_API_KEY).ok());

        if let Ok(base_url) = env::var(env_vars::GAME_API_BASE_URL)
            && !base_url.trim().is_empty()
        {
            config.base_url = base_url.trim().to_string();
        }

        if let Ok(prefix) = env::var(env_vars::PROXY_PATH_PREFIX) {
            config.path_prefix = prefix.trim().to_string();
        }

        if let Ok(timeout) = env::var(env_vars::PROXY_HTTP_TIMEOUT) {
            match timeout.parse::<u64>() {
                Ok(seconds) if seconds > 0 => config.http_timeout_seconds = seconds,
                _ => warn!(
                    "Ignoring invalid {}='{}', using {}s",
                    env_vars::PROXY_HTTP_TIMEOUT,
                    timeout,
                    config.http_timeout_seconds
                ),
            }
        }

        config
    }

    /// The configured key, treating blank values as absent
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Upstream base without a trailing slash
    pub fn base_url(&self) -> &str {
        if self.base_url.is_empty() {
            upstream::DEFAULT_BASE_URL
        } else {
            self.base_url.trim_end_matches('/')
        }
    }

    /// Strips the mount prefix and surrounding slashes from an inbound path.
    ///
    /// The prefix only matches whole segments, so `/api/proxyfoo` is not a
    /// sub-path of `/api/proxy`.
    pub fn sub_path<'a>(&self, path: &'a str) -> &'a str {
        let prefix = self.path_prefix.trim_end_matches('/');
        let rest = if prefix.is_empty() {
            path
        } else {
            match path.strip_prefix(prefix) {
                Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
                Some(_) => "",
                None => path,
            }
        };
        rest.trim_matches('/')
    }
}
