//! CLI module - Command-line interface for Seasonarr
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::limits::{MAX_YEAR, MIN_YEAR};

/// Seasonarr - Seasonal anime lookup
/// Fetches a season from Jikan and checks the derived Nyaa RSS feeds
#[derive(Parser)]
#[command(name = "seasonarr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default search paths
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the anime of a season
    #[command(alias = "f")]
    Fetch {
        #[command(flatten)]
        target: SeasonArgs,

        /// Print the records as JSON
        #[arg(long)]
        json: bool,

        /// Write the records as JSON to a file
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Rename a record and regenerate its feed URL (INDEX=TITLE)
        #[arg(long = "retitle", value_parser = parse_edit)]
        retitles: Vec<(usize, String)>,

        /// Override the feed URL of a record (INDEX=URL)
        #[arg(long = "feed-url", value_parser = parse_edit)]
        feed_urls: Vec<(usize, String)>,
    },

    /// Validate the RSS feeds of a season, or of an edited JSON file
    #[command(alias = "v")]
    Validate {
        #[command(flatten)]
        target: SeasonArgs,

        /// Read records from a JSON file instead of fetching
        #[arg(long, short, conflicts_with_all = ["season", "year"])]
        input: Option<PathBuf>,
    },

    /// Print the RSS feed URL derived from a title
    FeedUrl {
        #[arg(required = true)]
        title: Vec<String>,
    },

    /// Validate a single RSS feed URL
    Check { url: String },

    /// Create default config file
    Init,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SeasonArgs {
    /// winter, spring, summer or fall (default: current season)
    #[arg(long, short)]
    pub season: Option<String>,

    /// Year (default: current year)
    #[arg(
        long,
        short,
        value_parser = clap::value_parser!(i32).range(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR))
    )]
    pub year: Option<i32>,
}

fn parse_edit(raw: &str) -> Result<(usize, String), String> {
    let (index, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=VALUE, got '{raw}'"))?;
    let index = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid record index '{index}'"))?;
    Ok((index, value.to_string()))
}

pub use commands::*;
