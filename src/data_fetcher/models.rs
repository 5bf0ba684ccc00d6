use crate::calendar::dates::parse_release_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single game entry as returned by the game-data service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    /// ISO `YYYY-MM-DD` date, absent for unannounced games
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub metacritic: Option<i32>,
}

impl GameRecord {
    /// Builds a record from the fields a suggestion selection carries.
    pub fn from_selection(
        name: impl Into<String>,
        released: Option<String>,
        slug: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            slug,
            released,
            background_image: None,
            rating: None,
            metacritic: None,
        }
    }

    /// Parsed release date; `None` when absent or unparsable
    pub fn release_date(&self) -> Option<NaiveDate> {
        self.released.as_deref().and_then(parse_release_date)
    }
}

/// Paginated listing envelope of the `/games` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GamesResponse {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub results: Vec<GameRecord>,
}

/// Error envelope: the game-data service reports `detail`, the proxy reports `error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best human-readable message carried by an error body
    pub fn message(&self) -> Option<&str> {
        self.detail.as_deref().or(self.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_record_tolerates_nulls() {
        let json = r#"{
            "name": "Untitled Goose Sequel",
            "slug": null,
            "released": null,
            "background_image": null,
            "rating": 0,
            "metacritic": null
        }"#;
        let game: GameRecord = serde_json::from_str(json).unwrap();
        assert_eq!(game.name, "Untitled Goose Sequel");
        assert!(game.released.is_none());
        assert!(game.release_date().is_none());
        assert_eq!(game.rating, Some(0.0));
    }

    #[test]
    fn test_games_response_ignores_unknown_fields() {
        let json = r#"{
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                {"name": "Elden Ring", "slug": "elden-ring", "released": "2022-02-25",
                 "background_image": "https://img.example/elden.jpg", "rating": 4.4,
                 "metacritic": 94, "platforms": []},
                {"name": "Horizon Forbidden West", "released": "2022-02-18"}
            ]
        }"#;
        let response: GamesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].metacritic, Some(94));
        assert_eq!(
            response.results[1].release_date(),
            NaiveDate::from_ymd_opt(2022, 2, 18)
        );
    }

    #[test]
    fn test_from_selection() {
        let game = GameRecord::from_selection(
            "Celeste",
            Some("2018-01-25".to_string()),
            Some("celeste".to_string()),
        );
        assert_eq!(game.slug.as_deref(), Some("celeste"));
        assert_eq!(game.release_date(), NaiveDate::from_ymd_opt(2018, 1, 25));
        assert!(game.background_image.is_none());
    }

    #[test]
    fn test_error_body_prefers_detail() {
        let upstream: ErrorBody = serde_json::from_str(r#"{"detail": "Not found."}"#).unwrap();
        assert_eq!(upstream.message(), Some("Not found."));

        let proxy: ErrorBody =
            serde_json::from_str(r#"{"error": "API key configuration error on server."}"#)
                .unwrap();
        assert_eq!(
            proxy.message(),
            Some("API key configuration error on server.")
        );
    }
}
