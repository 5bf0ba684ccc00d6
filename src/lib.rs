//! Video Game Release Calendar Library
//!
//! A month-grid calendar of video game releases and the small HTTP proxy that
//! sits between the calendar and the game-data service, keeping the service's
//! API key on the server.
//!
//! # Examples
//!
//! ```rust,no_run
//! use release_calendar::calendar::{CalendarRenderer, YearMonth};
//! use release_calendar::data_fetcher::{GameApiClient, MonthGameFetcher, SearchService};
//! use release_calendar::error::AppError;
//! use release_calendar::ui::render_plain;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let client = reqwest::Client::new();
//!     let api = GameApiClient::new(client, "https://calendar.example.com/api/proxy");
//!     let mut renderer =
//!         CalendarRenderer::new(MonthGameFetcher::new(api.clone()), SearchService::new(api));
//!
//!     // February 2024; months are zero-based
//!     if let Some(month) = YearMonth::new(2024, 1) {
//!         renderer.navigate_to(month).await;
//!     }
//!
//!     if let Some(grid) = renderer.grid() {
//!         for line in render_plain(grid, renderer.slideshow()) {
//!             println!("{line}");
//!         }
//!     }
//!     renderer.teardown();
//!     Ok(())
//! }
//! ```

pub mod calendar;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod logging;
pub mod preferences;
pub mod proxy;
pub mod ui;

// Re-export commonly used types for convenience
pub use calendar::{CalendarRenderer, YearMonth};
pub use config::Config;
pub use data_fetcher::models::GameRecord;
pub use error::AppError;
pub use proxy::{ApiProxy, ProxyConfig};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
