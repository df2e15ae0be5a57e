use anyhow::Context;
use std::path::PathBuf;
use tracing::warn;

use super::{print_record, resolve_target, season_heading};
use crate::models::anime::{self, AnimeRecord, RecordEdit, apply_edits};
use crate::state::SharedState;

#[derive(Debug, Default)]
pub struct FetchOptions {
    pub season: Option<String>,
    pub year: Option<i32>,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub retitles: Vec<(usize, String)>,
    pub feed_urls: Vec<(usize, String)>,
}

impl FetchOptions {
    fn edits(&self) -> Vec<RecordEdit> {
        let retitles = self.retitles.iter().map(|(index, title)| RecordEdit {
            index: *index,
            title: Some(title.clone()),
            feed_url: None,
        });
        let feed_urls = self.feed_urls.iter().map(|(index, url)| RecordEdit {
            index: *index,
            title: None,
            feed_url: Some(url.clone()),
        });
        retitles.chain(feed_urls).collect()
    }
}

/// Applies the requested edits. A retitled record gets a fresh feed URL
/// unless an explicit one was given for the same index.
fn edit_records(records: &[AnimeRecord], options: &FetchOptions) -> Vec<AnimeRecord> {
    let mut updated = apply_edits(records, &options.edits());

    for (index, _) in &options.retitles {
        let overridden = options.feed_urls.iter().any(|(i, _)| i == index);
        if let Some(record) = updated.get_mut(*index).filter(|_| !overridden) {
            record.regenerate_feed_url();
        }
    }

    updated
}

pub async fn cmd_fetch(state: &SharedState, options: FetchOptions) -> anyhow::Result<()> {
    let (season, year) = resolve_target(options.season.as_deref(), options.year);

    let records = state.seasonal.fetch_season(&season, year).await?;

    if records.is_empty() {
        warn!("No anime found for {} {}", season, year);
        println!("No anime found for the selected season.");
        return Ok(());
    }

    let records = edit_records(&records, &options);

    if let Some(path) = &options.output {
        let json = anime::to_json(&records)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✓ Saved {} anime to {}", records.len(), path.display());
    }

    if options.json {
        println!("{}", anime::to_json(&records)?);
        return Ok(());
    }

    println!("{}", season_heading(&season, year));
    println!("Found {} anime.", records.len());
    println!("{:-<70}", "");

    for (index, record) in records.iter().enumerate() {
        print_record(index, record);
    }

    Ok(())
}
