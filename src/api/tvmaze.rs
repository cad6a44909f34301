//! TVMaze API client
//!
//! Two read-only endpoints:
//! - `GET {base}/shows`
//! - `GET {base}/shows/{id}/episodes`
//!
//! API docs: https://www.tvmaze.com/api

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use super::CatalogSource;
use crate::models::{Episode, Show, ShowId};

/// Public TVMaze endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Catalog request error types
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    #[error("Invalid response: {0}")]
    Format(String),
}

impl CatalogError {
    /// Whether the call failed before a usable body arrived
    pub fn is_transport(&self) -> bool {
        matches!(self, CatalogError::Transport(_) | CatalogError::HttpStatus(_))
    }

    /// Whether the body arrived but did not have the expected shape
    pub fn is_format(&self) -> bool {
        matches!(self, CatalogError::Format(_))
    }
}

/// TVMaze API client
#[derive(Debug, Clone)]
pub struct TvMazeClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for TvMazeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TvMazeClient {
    /// Create a client for the public TVMaze API
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET and parse the JSON body
    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, "catalog request");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CatalogError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| CatalogError::Format(format!("JSON parse error: {}", e)))
    }

    /// List all shows
    pub async fn shows(&self) -> Result<Vec<Show>, CatalogError> {
        let raw: Vec<ShowRaw> = self.get("/shows").await?;
        Ok(raw.into_iter().map(ShowRaw::into_show).collect())
    }

    /// List episodes for one show
    pub async fn episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, CatalogError> {
        let endpoint = format!("/shows/{}/episodes", show_id);
        let raw: Vec<EpisodeRaw> = self.get(&endpoint).await?;
        raw.into_iter().map(|e| e.into_episode(show_id)).collect()
    }
}

impl CatalogSource for TvMazeClient {
    async fn fetch_shows(&self) -> Result<Vec<Show>, CatalogError> {
        self.shows().await
    }

    async fn fetch_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, CatalogError> {
        self.episodes(show_id).await
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ShowRaw {
    id: ShowId,
    name: String,
    summary: Option<String>,
    #[serde(default)]
    genres: Vec<String>,
    status: Option<String>,
    rating: Option<RatingRaw>,
    runtime: Option<u32>,
    image: Option<ImageRaw>,
}

impl ShowRaw {
    fn into_show(self) -> Show {
        Show {
            id: self.id,
            name: self.name,
            summary: self.summary,
            genres: self.genres,
            status: self.status,
            rating: self.rating.and_then(|r| r.average),
            runtime: self.runtime,
            image: self.image.and_then(|i| i.medium),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EpisodeRaw {
    id: u64,
    name: String,
    season: u32,
    number: u32,
    summary: Option<String>,
    image: Option<ImageRaw>,
}

impl EpisodeRaw {
    fn into_episode(self, show_id: ShowId) -> Result<Episode, CatalogError> {
        if self.season == 0 || self.number == 0 {
            return Err(CatalogError::Format(format!(
                "episode {} has season {} number {}",
                self.id, self.season, self.number
            )));
        }

        Ok(Episode {
            id: self.id,
            show_id,
            name: self.name,
            season: self.season,
            number: self.number,
            summary: self.summary,
            image: self.image.and_then(|i| i.medium),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RatingRaw {
    average: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ImageRaw {
    medium: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_raw_optional_fields() {
        let raw: ShowRaw = serde_json::from_str(
            r#"{"id": 1, "name": "Under the Dome", "summary": null,
                "rating": {"average": null}, "image": null}"#,
        )
        .unwrap();
        let show = raw.into_show();
        assert_eq!(show.id, 1);
        assert!(show.genres.is_empty());
        assert!(show.rating.is_none());
        assert!(show.image.is_none());
        assert!(show.runtime.is_none());
    }

    #[test]
    fn test_episode_raw_rejects_season_zero() {
        let raw = EpisodeRaw {
            id: 9,
            name: "Special".to_string(),
            season: 0,
            number: 1,
            summary: None,
            image: None,
        };
        let err = raw.into_episode(82).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = TvMazeClient::with_base_url("http://localhost:1234/");
        assert_eq!(client.base_url(), "http://localhost:1234");
    }

    #[test]
    fn test_error_classification() {
        assert!(CatalogError::HttpStatus(500).is_transport());
        assert!(!CatalogError::HttpStatus(500).is_format());
        assert!(CatalogError::Format("bad".into()).is_format());
    }
}
