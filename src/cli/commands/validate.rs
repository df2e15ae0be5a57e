use anyhow::Context;
use std::path::Path;

use super::{resolve_target, season_heading};
use crate::models::AnimeRecord;
use crate::models::anime;
use crate::state::SharedState;

fn load_records(path: &Path) -> anyhow::Result<Vec<AnimeRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    anime::from_json(&content)
        .with_context(|| format!("Invalid JSON format in {}", path.display()))
}

pub async fn cmd_validate(
    state: &SharedState,
    season: Option<&str>,
    year: Option<i32>,
    input: Option<&Path>,
) -> anyhow::Result<()> {
    let records = if let Some(path) = input {
        let records = load_records(path)?;
        println!("Loaded {} anime from {}", records.len(), path.display());
        records
    } else {
        let (season, year) = resolve_target(season, year);
        let records = state.seasonal.fetch_season(&season, year).await?;
        println!("{}", season_heading(&season, year));
        records
    };

    if records.is_empty() {
        println!("No anime to validate.");
        return Ok(());
    }

    println!("Validating {} RSS feeds...", records.len());
    let (results, summary) = state.feeds.validate_records(&records).await;

    println!("{:-<70}", "");
    for anime in &records {
        let valid = results.get(&anime.feed_url).copied().unwrap_or(false);
        let marker = if valid { "✓ Valid  " } else { "✗ Invalid" };
        println!("{marker} {}", anime.title);
        println!("          {}", anime.feed_url);
    }
    println!("{:-<70}", "");

    println!(
        "Validation complete in {:.2} seconds",
        summary.elapsed.as_secs_f64()
    );
    println!("Valid feeds: {}/{}", summary.valid, summary.total);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_records_reports_invalid_json() {
        let path = std::env::temp_dir().join(format!(
            "seasonarr-invalid-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "[{\"title\": \"Broken\"").unwrap();

        let err = load_records(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON format"));

        let _ = std::fs::remove_file(&path);
    }
}
