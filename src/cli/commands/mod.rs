mod check;
mod feed_url;
mod fetch;
mod init;
mod validate;

pub use check::cmd_check;
pub use feed_url::cmd_feed_url;
pub use fetch::{FetchOptions, cmd_fetch};
pub use init::cmd_init;
pub use validate::cmd_validate;

use crate::models::{AnimeRecord, Season};

/// Resolves optional CLI values against the current season.
fn resolve_target(season: Option<&str>, year: Option<i32>) -> (String, i32) {
    let (current_season, current_year) = Season::current();
    (
        season.map_or_else(|| current_season.as_str().to_string(), str::to_string),
        year.unwrap_or(current_year),
    )
}

fn season_heading(season: &str, year: i32) -> String {
    let label = season
        .parse::<Season>()
        .map_or_else(|_| season.to_string(), |s| s.label().to_string());
    format!("{label} {year} Anime")
}

fn print_record(index: usize, anime: &AnimeRecord) {
    let episodes = anime
        .episode_count
        .map_or_else(|| "? eps".to_string(), |e| format!("{e} eps"));
    let score = anime
        .score
        .map_or_else(|| "-".to_string(), |s| format!("{s:.2}"));

    println!("[{index}] {} ({episodes})", anime.title);
    println!(
        "  Date: {} | Score: {score} | Members: {} | Status: {}",
        anime.air_date, anime.member_count, anime.status
    );
    println!("  Genres: {}", anime.genre_list());
    println!("  RSS: {}", anime.feed_url);
    println!("  {}", anime.synopsis);
    println!();
}
