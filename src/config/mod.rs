use crate::constants::env_vars;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod user_prompts;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use user_prompts::prompt_for_proxy_url;
use validation::{normalize_proxy_url, validate_config};

/// Configuration of the calendar client.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// URL of the key-hiding proxy. All game data is requested through it.
    pub proxy_url: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for proxy requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

fn default_http_timeout() -> u64 {
    crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            proxy_url: String::new(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

impl Config {
    pub fn new(proxy_url: impl Into<String>) -> Self {
        Config {
            proxy_url: proxy_url.into(),
            ..Config::default()
        }
    }

    /// Loads configuration from the default config file location.
    /// If no config file exists, prompts for the proxy URL and creates one.
    ///
    /// # Environment Variables
    /// - `RELEASE_CALENDAR_PROXY_URL` - Override proxy URL
    /// - `RELEASE_CALENDAR_LOG_FILE` - Override log file path
    /// - `RELEASE_CALENDAR_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    ///
    /// Environment variables take precedence over the config file, and a
    /// proxy URL from the environment also skips the first-run prompt.
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else if let Ok(proxy_url) = std::env::var(env_vars::PROXY_URL) {
            Config::new(proxy_url)
        } else {
            let config = Config::new(normalize_proxy_url(&prompt_for_proxy_url().await?));
            config.validate()?;
            config.save().await?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Overrides file values with any of the `RELEASE_CALENDAR_*` variables
    /// that are set. An unparsable timeout is ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(proxy_url) = std::env::var(env_vars::PROXY_URL) {
            self.proxy_url = proxy_url;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.proxy_url,
            &self.log_file_path,
            self.http_timeout_seconds,
        )
    }

    /// Proxy URL with a scheme, as used for requests
    pub fn resolved_proxy_url(&self) -> String {
        normalize_proxy_url(&self.proxy_url)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("Proxy URL:");
            println!("{}", config.proxy_url);
            println!("────────────────────────────────────");
            println!("HTTP Timeout:");
            println!("{} seconds", config.http_timeout_seconds);
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{log_dir}/release_calendar.log");
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and stores the proxy
    /// URL with an explicit scheme.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(&Config {
            proxy_url: self.resolved_proxy_url(),
            log_file_path: self.log_file_path.clone(),
            http_timeout_seconds: self.http_timeout_seconds,
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without applying
    /// environment overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn clear_env() {
        unsafe {
            std::env::remove_var(env_vars::PROXY_URL);
            std::env::remove_var(env_vars::LOG_FILE);
            std::env::remove_var(env_vars::HTTP_TIMEOUT);
        }
    }

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
proxy_url = "https://calendar.example.com/api/proxy"
log_file_path = "/custom/log/path"
http_timeout_seconds = 10
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.proxy_url, "https://calendar.example.com/api/proxy");
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
        assert_eq!(config.http_timeout_seconds, 10);
    }

    #[tokio::test]
    async fn test_config_defaults_for_optional_fields() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        tokio::fs::write(&config_path, "proxy_url = \"https://calendar.example.com\"\n")
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(config.log_file_path, None);
        assert_eq!(config.http_timeout_seconds, 30);
    }

    #[tokio::test]
    async fn test_config_save_adds_https_only_without_scheme() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        Config::new("calendar.example.com/api/proxy")
            .save_to_path(&config_path_str)
            .await
            .unwrap();
        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded.proxy_url, "https://calendar.example.com/api/proxy");

        Config::new("http://localhost:3000/api/proxy")
            .save_to_path(&config_path_str)
            .await
            .unwrap();
        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded.proxy_url, "http://localhost:3000/api/proxy");
    }

    #[tokio::test]
    async fn test_config_save_creates_nested_directories() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir
            .path()
            .join("release_calendar")
            .join("nested")
            .join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let original = Config {
            proxy_url: "https://calendar.example.com".to_string(),
            log_file_path: Some("/custom/log/path".to_string()),
            http_timeout_seconds: 12,
        };
        original.save_to_path(&config_path_str).await.unwrap();

        assert!(config_path.exists());
        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded, original);
    }

    #[tokio::test]
    async fn test_config_load_invalid_toml() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "proxy_url = [unterminated")
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    async fn test_config_missing_required_field() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "http_timeout_seconds = 5\n")
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    async fn test_config_load_from_nonexistent_path() {
        let result = Config::load_from_path("/nonexistent/release_calendar/config.toml").await;
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[test]
    fn test_log_file_path_skipped_when_unset() {
        let toml_none = toml::to_string(&Config::new("https://calendar.example.com")).unwrap();
        assert!(!toml_none.contains("log_file_path"));
    }

    #[test]
    fn test_paths_use_app_directory() {
        let config_path = Config::get_config_path();
        assert!(config_path.contains("release_calendar"));
        assert!(config_path.ends_with("config.toml"));

        let log_dir = Config::get_log_dir_path();
        assert!(log_dir.contains("release_calendar"));
        assert!(log_dir.ends_with("logs"));
    }

    #[test]
    #[serial]
    fn test_environment_variable_override() {
        clear_env();
        unsafe {
            std::env::set_var(env_vars::PROXY_URL, "http://localhost:8787/api/proxy");
            std::env::set_var(env_vars::LOG_FILE, "/env/log/path.log");
            std::env::set_var(env_vars::HTTP_TIMEOUT, "7");
        }

        let mut config = Config {
            proxy_url: "https://file.example.com".to_string(),
            log_file_path: Some("/file/log/path.log".to_string()),
            http_timeout_seconds: 30,
        };
        config.apply_env_overrides();

        assert_eq!(config.proxy_url, "http://localhost:8787/api/proxy");
        assert_eq!(config.log_file_path, Some("/env/log/path.log".to_string()));
        assert_eq!(config.http_timeout_seconds, 7);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_override_ignored() {
        clear_env();
        unsafe {
            std::env::set_var(env_vars::HTTP_TIMEOUT, "soon");
        }

        let mut config = Config::new("https://calendar.example.com");
        config.apply_env_overrides();
        assert_eq!(config.http_timeout_seconds, 30);
        assert_eq!(config.proxy_url, "https://calendar.example.com");
        clear_env();
    }
}
