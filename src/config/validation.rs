use crate::error::AppError;
use reqwest::Url;
use std::path::Path;

/// Adds `https://` to a proxy URL that was given without a scheme.
///
/// Explicit `http://` URLs are kept so a locally running proxy stays reachable.
pub fn normalize_proxy_url(proxy_url: &str) -> String {
    let trimmed = proxy_url.trim();
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Validates the configuration settings
///
/// # Validation Rules
/// - Proxy URL cannot be empty and must parse as an absolute URL
/// - Without a scheme it must at least look like a host name
/// - HTTP timeout must be positive
/// - If log file path is provided, it cannot be empty and its parent directory
///   must exist or be creatable
pub fn validate_config(
    proxy_url: &str,
    log_file_path: &Option<String>,
    http_timeout_seconds: u64,
) -> Result<(), AppError> {
    if proxy_url.trim().is_empty() {
        return Err(AppError::config_error("Proxy URL cannot be empty"));
    }

    if !proxy_url.starts_with("http://")
        && !proxy_url.starts_with("https://")
        && !proxy_url.contains('.')
        && !proxy_url.starts_with("localhost")
    {
        return Err(AppError::config_error(
            "Proxy URL must be a valid URL or domain name",
        ));
    }

    Url::parse(&normalize_proxy_url(proxy_url)).map_err(|e| {
        AppError::config_error(format!("Proxy URL '{proxy_url}' is not a valid URL: {e}"))
    })?;

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error("HTTP timeout must be at least 1 second"));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
