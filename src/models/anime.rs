use serde::{Deserialize, Serialize};

use crate::clients::nyaa::format_feed_url;

/// One qualifying series of a seasonal query, normalized for display and
/// export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeRecord {
    pub title: String,
    pub air_date: String,
    pub genres: Vec<String>,
    pub synopsis: String,
    pub feed_url: String,
    pub member_count: u64,
    pub score: Option<f64>,
    pub episode_count: Option<u32>,
    pub status: String,
    #[serde(default)]
    pub image_url: String,
}

impl AnimeRecord {
    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Recomputes the feed URL from the current title.
    pub fn regenerate_feed_url(&mut self) {
        self.feed_url = format_feed_url(&self.title);
    }

    #[must_use]
    pub fn genre_list(&self) -> String {
        self.genres.join(", ")
    }
}

/// A pending change to the record at `index` of a fetched list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEdit {
    pub index: usize,
    pub title: Option<String>,
    pub feed_url: Option<String>,
}

/// Applies title and feed-url edits, returning the updated list.
///
/// Edits pointing past the end of the list are ignored.
#[must_use]
pub fn apply_edits(records: &[AnimeRecord], edits: &[RecordEdit]) -> Vec<AnimeRecord> {
    let mut updated = records.to_vec();

    for edit in edits {
        let Some(record) = updated.get_mut(edit.index) else {
            continue;
        };
        if let Some(title) = &edit.title {
            record.rename(title.clone());
        }
        if let Some(feed_url) = &edit.feed_url {
            record.feed_url.clone_from(feed_url);
        }
    }

    updated
}

pub fn to_json(records: &[AnimeRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

pub fn from_json(json: &str) -> serde_json::Result<Vec<AnimeRecord>> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> AnimeRecord {
        AnimeRecord {
            title: title.to_string(),
            air_date: "Jan 07, 2024".to_string(),
            genres: vec!["Action".to_string(), "Fantasy".to_string()],
            synopsis: "A story.".to_string(),
            feed_url: format_feed_url(title),
            member_count: 50_000,
            score: Some(8.1),
            episode_count: Some(12),
            status: "Currently Airing".to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_rename_keeps_feed_url_until_regenerated() {
        let mut anime = record("Sousou no Frieren");
        let original_url = anime.feed_url.clone();

        anime.rename("Frieren");
        assert_eq!(anime.feed_url, original_url);

        anime.regenerate_feed_url();
        assert_eq!(anime.feed_url, format_feed_url("Frieren"));
    }

    #[test]
    fn test_apply_edits() {
        let records = vec![record("One"), record("Two")];
        let edits = vec![
            RecordEdit {
                index: 1,
                title: Some("Two Edited".to_string()),
                feed_url: Some("https://example.com/feed".to_string()),
            },
            RecordEdit {
                index: 9,
                title: Some("Ignored".to_string()),
                feed_url: None,
            },
        ];

        let updated = apply_edits(&records, &edits);
        assert_eq!(updated.len(), 2);
        assert_eq!(updated[0], records[0]);
        assert_eq!(updated[1].title, "Two Edited");
        assert_eq!(updated[1].feed_url, "https://example.com/feed");
        assert_eq!(updated[1].member_count, 50_000);
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let json = to_json(&[record("Frieren")]).unwrap();
        assert!(json.contains("\"airDate\""));
        assert!(json.contains("\"feedUrl\""));
        assert!(json.contains("\"memberCount\""));
        assert!(json.contains("\"episodeCount\""));
        assert!(json.contains("\"imageUrl\""));

        let parsed = from_json(&json).unwrap();
        assert_eq!(parsed[0].title, "Frieren");
    }

    #[test]
    fn test_from_json_reports_invalid_documents() {
        assert!(from_json("[{\"title\": ").is_err());
        assert!(from_json("{}").is_err());
    }
}
