//! Seasonal fetch: one rate-limited Jikan request, filtered and normalized
//! into [`AnimeRecord`]s.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::{error, info};

use crate::clients::jikan::{JikanClient, MalAnime};
use crate::clients::nyaa::format_feed_url;
use crate::constants::MIN_MEMBERS;
use crate::constants::text::{
    AIR_DATE_FORMAT, ELLIPSIS, NO_SYNOPSIS, SYNOPSIS_MAX_CHARS, UNKNOWN_DATE,
};
use crate::error::FetchError;
use crate::models::{AnimeRecord, Season};

#[derive(Clone)]
pub struct SeasonalService {
    jikan: JikanClient,
}

impl SeasonalService {
    #[must_use]
    pub const fn new(jikan: JikanClient) -> Self {
        Self { jikan }
    }

    /// Fetches the qualifying anime of a season given by name.
    ///
    /// The season name is checked before any rate-limit wait or request.
    pub async fn fetch_season(
        &self,
        season: &str,
        year: i32,
    ) -> Result<Vec<AnimeRecord>, FetchError> {
        let season: Season = season.parse()?;
        self.fetch(season, year).await
    }

    pub async fn fetch(&self, season: Season, year: i32) -> Result<Vec<AnimeRecord>, FetchError> {
        info!("Fetching anime for Season: {} | Year: {}", season, year);

        let entries = self
            .jikan
            .get_season(season, year)
            .await
            .inspect_err(|e| error!("Error fetching from Jikan API: {}", e))?;

        let total = entries.len();
        let records: Vec<AnimeRecord> = entries.into_iter().filter_map(normalize_entry).collect();

        info!(
            "Found {} anime entries ({} below {} members skipped)",
            records.len(),
            total - records.len(),
            MIN_MEMBERS
        );

        Ok(records)
    }
}

/// Builds a record from an upstream entry, or `None` below the member
/// threshold.
#[must_use]
pub fn normalize_entry(anime: MalAnime) -> Option<AnimeRecord> {
    let members = anime.members.unwrap_or(0);
    if members < MIN_MEMBERS {
        return None;
    }

    let title = anime.title.clone().unwrap_or_default();
    let feed_url = format_feed_url(&title);

    Some(AnimeRecord {
        air_date: format_air_date(anime.aired_from()),
        genres: anime.genre_names(),
        synopsis: truncate_synopsis(anime.synopsis.as_deref()),
        image_url: anime.image_url().unwrap_or_default().to_string(),
        member_count: members,
        score: anime.score,
        episode_count: anime.episodes,
        status: anime.status.unwrap_or_default(),
        title,
        feed_url,
    })
}

fn parse_air_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.date_naive());
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(date.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Formats an ISO-8601 air date as "Jan 07, 2024", or "Unknown".
#[must_use]
pub fn format_air_date(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(parse_air_date)
        .map_or_else(
            || UNKNOWN_DATE.to_string(),
            |date| date.format(AIR_DATE_FORMAT).to_string(),
        )
}

/// Caps a synopsis at [`SYNOPSIS_MAX_CHARS`] characters, ellipsis included.
///
/// Longer text is cut at the last whitespace that keeps room for the
/// ellipsis. A single unbroken word is hard-cut.
#[must_use]
pub fn truncate_synopsis(synopsis: Option<&str>) -> String {
    let Some(text) = synopsis.filter(|s| !s.is_empty()) else {
        return NO_SYNOPSIS.to_string();
    };

    if text.chars().count() <= SYNOPSIS_MAX_CHARS {
        return text.to_string();
    }

    let budget = SYNOPSIS_MAX_CHARS - ELLIPSIS.chars().count();
    let (prefix_end, next_char) = text
        .char_indices()
        .nth(budget)
        .map_or((text.len(), None), |(idx, c)| (idx, Some(c)));
    let prefix = &text[..prefix_end];

    let cut = if next_char.is_some_and(char::is_whitespace) {
        prefix
    } else {
        prefix
            .rfind(char::is_whitespace)
            .map_or(prefix, |idx| &prefix[..idx])
    };

    let cut = match cut.trim_end() {
        "" => prefix,
        trimmed => trimmed,
    };

    format!("{cut}{ELLIPSIS}")
}
