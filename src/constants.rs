//! Application-wide constants and configuration values
//!
//! This module centralizes the magic numbers shared by the calendar client
//! and the API proxy so both sides agree on page sizes, orderings and timings.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Upstream game-data API request shaping
pub mod upstream {
    /// Base URL used by the proxy when `GAME_API_BASE_URL` is not set
    pub const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";

    /// Path of the game listing endpoint
    pub const GAMES_PATH: &str = "games";

    /// Descending metacritic, then most recently added
    pub const DEFAULT_ORDERING: &str = "-metacritic,-added";

    /// Page size for a month's worth of releases
    pub const MONTH_PAGE_SIZE: u32 = 40;

    /// Page size for search suggestions
    pub const SUGGESTION_PAGE_SIZE: u32 = 6;

    /// Page size for exact-match resolution
    pub const RESOLVE_PAGE_SIZE: u32 = 1;

    /// Value written in place of the secret key whenever a URL is logged
    pub const REDACTED_KEY: &str = "REDACTED";
}

/// Query parameter names understood by the proxy
pub mod params {
    pub const KEY: &str = "key";
    pub const MONTH: &str = "month";
    pub const YEAR: &str = "year";
    pub const SEARCH_QUERY: &str = "searchQuery";
    pub const SEARCH: &str = "search";
    pub const SEARCH_PRECISE: &str = "search_precise";
    pub const SEARCH_EXACT: &str = "search_exact";
    pub const DATES: &str = "dates";
    pub const ORDERING: &str = "ordering";
    pub const PAGE_SIZE: &str = "page_size";
}

/// Search suggestion tuning
pub mod search {
    /// Quiet period after the last keystroke before a suggestion request fires
    pub const DEBOUNCE_MS: u64 = 400;

    /// Queries shorter than this never reach the network
    pub const MIN_QUERY_CHARS: usize = 3;
}

/// Per-cell slideshow tuning
pub mod slideshow {
    /// Period between two slides of the same cell
    pub const INTERVAL_MS: u64 = 4000;
}

/// UI polling intervals in milliseconds
pub mod polling {
    /// Polling interval for active use (< 5 seconds idle)
    pub const ACTIVE_MS: u64 = 50;

    /// Polling interval for semi-active use (5-30 seconds idle)
    pub const SEMI_ACTIVE_MS: u64 = 200;

    /// Polling interval for idle use (> 30 seconds idle)
    pub const IDLE_MS: u64 = 500;

    /// Threshold for considering user as idle (seconds)
    pub const IDLE_THRESHOLD_SECONDS: u64 = 30;

    /// Threshold for considering user as semi-active (seconds)
    pub const SEMI_ACTIVE_THRESHOLD_SECONDS: u64 = 5;
}

/// Persisted client preferences
pub mod preferences {
    /// Storage key of the dark-mode flag
    pub const DARK_MODE_KEY: &str = "darkMode";

    /// File name of the preference store inside the config directory
    pub const FILE_NAME: &str = "preferences.toml";
}

/// Environment variable names
pub mod env_vars {
    pub const PROXY_URL: &str = "RELEASE_CALENDAR_PROXY_URL";
    pub const LOG_FILE: &str = "RELEASE_CALENDAR_LOG_FILE";
    pub const HTTP_TIMEOUT: &str = "RELEASE_CALENDAR_HTTP_TIMEOUT";

    pub const GAME_API_KEY: &str = "GAME_API_KEY";
    pub const GAME_API_BASE_URL: &str = "GAME_API_BASE_URL";
    pub const PROXY_PATH_PREFIX: &str = "PROXY_PATH_PREFIX";
    pub const PROXY_HTTP_TIMEOUT: &str = "PROXY_HTTP_TIMEOUT";
}

/// Calendar layout constants
pub mod calendar {
    /// Width of one day cell in the terminal grid, borders excluded
    pub const CELL_WIDTH: usize = 14;

    /// Weekday labels, Sunday first to match the grid's leading filler count
    pub const WEEKDAY_LABELS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];
}
