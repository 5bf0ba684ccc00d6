pub mod api;
pub mod cache;
pub mod models;
pub mod month_fetcher;
pub mod search;

pub use api::GameApiClient;
pub use cache::MonthCache;
pub use models::{GameRecord, GamesResponse};
pub use month_fetcher::MonthGameFetcher;
pub use search::{SearchService, SuggestionDebouncer, SuggestionUpdate};
