use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::clients::http::HttpTransport;
use crate::clients::rate_limit::RateLimiter;
use crate::error::{FetchError, TransportError};
use crate::models::Season;

pub const JIKAN_API: &str = "https://api.jikan.moe/v4";

/// Decodes a field, turning a type mismatch into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Keeps the genre objects that carry a string `name`, in upstream order.
fn lenient_genres<'de, D>(deserializer: D) -> Result<Vec<MalGenericInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<MalGenericInfo>(item).ok())
        .collect())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MalAnime {
    #[serde(deserialize_with = "lenient")]
    pub mal_id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub members: Option<u64>,
    #[serde(deserialize_with = "lenient_genres")]
    pub genres: Vec<MalGenericInfo>,
    #[serde(deserialize_with = "lenient")]
    pub synopsis: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub aired: Option<Aired>,
    #[serde(deserialize_with = "lenient")]
    pub score: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub episodes: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub images: Option<MalImages>,
}

impl MalAnime {
    #[must_use]
    pub fn aired_from(&self) -> Option<&str> {
        self.aired.as_ref().and_then(|a| a.from.as_deref())
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|i| i.jpg.as_ref())
            .and_then(|jpg| jpg.image_url.as_deref())
    }

    #[must_use]
    pub fn genre_names(&self) -> Vec<String> {
        self.genres.iter().map(|genre| genre.name.clone()).collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Aired {
    #[serde(deserialize_with = "lenient")]
    pub from: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MalGenericInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub mal_id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MalImages {
    #[serde(deserialize_with = "lenient")]
    pub jpg: Option<MalImageSet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MalImageSet {
    #[serde(deserialize_with = "lenient")]
    pub image_url: Option<String>,
}

/// Splits a season payload into its entries.
///
/// The payload must be a JSON object with a `data` array. Field-level type
/// mismatches decode to `None`; only entries that are not objects are
/// skipped, with a warning.
pub fn parse_season_payload(body: &str) -> Result<Vec<MalAnime>, FetchError> {
    let payload: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| FetchError::malformed(format!("invalid JSON: {e}")))?;

    let entries = payload
        .get("data")
        .ok_or_else(|| FetchError::malformed("missing 'data' key"))?
        .as_array()
        .ok_or_else(|| FetchError::malformed("'data' is not a list"))?;

    Ok(entries
        .iter()
        .enumerate()
        .filter_map(
            |(index, entry)| match MalAnime::deserialize(entry) {
                Ok(anime) => Some(anime),
                Err(e) => {
                    warn!("Skipping undecodable Jikan entry #{index}: {e}");
                    None
                }
            },
        )
        .collect())
}

#[derive(Clone)]
pub struct JikanClient {
    transport: Arc<dyn HttpTransport>,
    limiter: Arc<RateLimiter>,
    base_url: String,
}

impl JikanClient {
    pub fn new(transport: Arc<dyn HttpTransport>, limiter: Arc<RateLimiter>) -> Self {
        Self {
            transport,
            limiter,
            base_url: JIKAN_API.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn season_url(&self, season: Season, year: i32) -> String {
        format!("{}/seasons/{}/{}", self.base_url, year, season.as_str())
    }

    /// Fetches the raw entries of one season page.
    ///
    /// Waits on the shared rate limiter before the request goes out.
    pub async fn get_season(&self, season: Season, year: i32) -> Result<Vec<MalAnime>, FetchError> {
        self.limiter.wait().await;

        let url = self.season_url(season, year);
        debug!("Fetching Jikan season: {}", url);

        let response = self.transport.get(&url).await?;

        if !response.status.is_success() {
            return Err(TransportError::Status {
                status: response.status,
                body: response.body,
            }
            .into());
        }

        parse_season_payload(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_season_payload() {
        let body = r#"{
            "pagination": {"has_next_page": false},
            "data": [
                {
                    "mal_id": 52991,
                    "title": "Sousou no Frieren",
                    "members": 1200000,
                    "genres": [{"mal_id": 2, "name": "Adventure"}, {"mal_id": 8, "name": "Drama"}],
                    "aired": {"from": "2023-09-29T00:00:00+00:00", "to": null},
                    "score": 9.3,
                    "episodes": 28,
                    "status": "Finished Airing",
                    "images": {"jpg": {"image_url": "https://cdn.myanimelist.net/images/anime/1015/138006.jpg"}}
                },
                {"title": "Sparse"}
            ]
        }"#;

        let entries = parse_season_payload(body).unwrap();
        assert_eq!(entries.len(), 2);

        let frieren = &entries[0];
        assert_eq!(frieren.members, Some(1_200_000));
        assert_eq!(frieren.genre_names(), vec!["Adventure", "Drama"]);
        assert_eq!(frieren.aired_from(), Some("2023-09-29T00:00:00+00:00"));
        assert!(frieren.image_url().is_some());

        let sparse = &entries[1];
        assert_eq!(sparse.members, None);
        assert!(sparse.genre_names().is_empty());
        assert_eq!(sparse.aired_from(), None);
        assert_eq!(sparse.image_url(), None);
    }

    #[test]
    fn test_parse_season_payload_null_fields() {
        let body = r#"{"data": [{"title": "Nulls", "score": null, "episodes": null, "synopsis": null, "genres": null}]}"#;
        let entries = parse_season_payload(body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].score, None);
        assert_eq!(entries[0].episodes, None);
    }

    #[test]
    fn test_parse_season_payload_missing_data() {
        let err = parse_season_payload(r#"{"status": 500}"#).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));

        let err = parse_season_payload(r#"{"data": {"not": "a list"}}"#).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));

        let err = parse_season_payload("<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_season_payload_skips_non_object_entries() {
        let body = r#"{"data": ["oops", 42, {"title": "Good", "members": 20000}]}"#;
        let entries = parse_season_payload(body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title.as_deref(), Some("Good"));
    }

    #[test]
    fn test_mistyped_fields_decode_to_none() {
        let body = r#"{"data": [{
            "title": "Mistyped",
            "members": 50000,
            "aired": {"from": 20240107},
            "genres": [{"mal_id": 1}, {"mal_id": 2, "name": "Drama"}, "Comedy"],
            "episodes": 12.5,
            "score": "high",
            "status": ["Airing"],
            "images": {"jpg": {"image_url": false}}
        }]}"#;

        let entries = parse_season_payload(body).unwrap();
        assert_eq!(entries.len(), 1);

        let anime = &entries[0];
        assert_eq!(anime.members, Some(50_000));
        assert_eq!(anime.aired_from(), None);
        assert_eq!(anime.genre_names(), vec!["Drama"]);
        assert_eq!(anime.episodes, None);
        assert_eq!(anime.score, None);
        assert_eq!(anime.status, None);
        assert_eq!(anime.image_url(), None);
    }

    #[test]
    fn test_unreadable_members_decode_to_none() {
        let body = r#"{"data": [{"title": "Negative", "members": -5}, {"title": "Text", "members": "many"}]}"#;
        let entries = parse_season_payload(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.members.is_none()));
    }
}
