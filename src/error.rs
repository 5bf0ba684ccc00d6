use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from API: {0}")]
    ApiFetch(#[from] reqwest::Error),

    /// Non-success status from the game-data service, forwarded by the proxy
    #[error("Game data service error ({status}): {message} (URL: {url})")]
    Upstream {
        status: u16,
        message: String,
        url: String,
    },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Data parsing and validation errors
    #[error("API returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("API returned unexpected data structure: {message} (URL: {url})")]
    ApiUnexpectedStructure { message: String, url: String },

    // Lookup errors
    #[error("No game found matching \"{query}\"")]
    GameNotFound { query: String },

    #[error("\"{name}\" has no release date")]
    MissingReleaseDate { name: String },

    #[error("Invalid release date: {value}")]
    InvalidDate { value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an upstream error from a forwarded non-success response
    pub fn upstream(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn api_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a not-found error naming the searched game
    pub fn game_not_found(query: impl Into<String>) -> Self {
        Self::GameNotFound {
            query: query.into(),
        }
    }

    /// Create an error for a resolved game without a release date
    pub fn missing_release_date(name: impl Into<String>) -> Self {
        Self::MissingReleaseDate { name: name.into() }
    }

    /// Create an error for an unparsable release date
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    /// Check if error is a transport failure reaching the service
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            AppError::NetworkTimeout { .. } | AppError::NetworkConnection { .. }
        )
    }

    /// Check if error indicates a search that matched nothing
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::GameNotFound { .. })
    }

    /// Text for the single visible message region.
    ///
    /// Transport failures collapse into one generic message; everything else
    /// is reported with its own details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NetworkTimeout { .. }
            | AppError::NetworkConnection { .. }
            | AppError::ApiFetch(_) => {
                "Could not connect to the game data service. Please try again.".to_string()
            }
            AppError::Upstream {
                status, message, ..
            } => format!("Game data service responded with {status}: {message}"),
            AppError::GameNotFound { query } => format!("No game found for \"{query}\""),
            AppError::MissingReleaseDate { name } => {
                format!("\"{name}\" has no announced release date")
            }
            AppError::InvalidDate { value } => {
                format!("Could not read release date \"{value}\"")
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_log_setup_error_helper() {
        let error = AppError::log_setup_error("Failed to initialize logger");
        assert!(matches!(error, AppError::LogSetup(_)));
        assert_eq!(
            error.to_string(),
            "Log setup error: Failed to initialize logger"
        );
    }

    #[test]
    fn test_upstream_error_helper() {
        let error = AppError::upstream(401, "Invalid API key", "http://proxy.local/");
        assert!(matches!(error, AppError::Upstream { status: 401, .. }));
        assert_eq!(
            error.to_string(),
            "Game data service error (401): Invalid API key (URL: http://proxy.local/)"
        );
        assert_eq!(
            error.user_message(),
            "Game data service responded with 401: Invalid API key"
        );
    }

    #[test]
    fn test_network_errors_share_generic_message() {
        let timeout = AppError::network_timeout("http://proxy.local/");
        let refused = AppError::network_connection("http://proxy.local/", "Connection refused");

        assert!(timeout.is_network());
        assert!(refused.is_network());
        assert_eq!(timeout.user_message(), refused.user_message());
        assert!(timeout.user_message().contains("Could not connect"));
        assert!(!refused.user_message().contains("Connection refused"));
    }

    #[test]
    fn test_game_not_found_helper() {
        let error = AppError::game_not_found("Half-Life 3");
        assert!(error.is_not_found());
        assert!(!error.is_network());
        assert_eq!(error.to_string(), "No game found matching \"Half-Life 3\"");
        assert!(error.user_message().contains("Half-Life 3"));
    }

    #[test]
    fn test_release_date_errors() {
        let missing = AppError::missing_release_date("Hollow Knight: Silksong");
        assert!(matches!(missing, AppError::MissingReleaseDate { .. }));
        assert!(missing.user_message().contains("Hollow Knight: Silksong"));

        let invalid = AppError::invalid_date("2024-13-45");
        assert_eq!(invalid.to_string(), "Invalid release date: 2024-13-45");
        assert!(!invalid.is_not_found());
    }

    #[test]
    fn test_parse_errors_convert() {
        let toml_error = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let error: AppError = toml_error.into();
        assert!(matches!(error, AppError::TomlDeserialize(_)));
    }
}
