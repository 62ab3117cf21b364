use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::parser::SortOrder;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// SIHF statistics API host
    pub sihf_base_url: String,

    /// Language passed to the provider (affects phase names and texts)
    pub language: String,

    /// Interval in seconds for polling the gameday summaries
    pub summary_poll_interval: u64,

    /// Interval in seconds for polling the followed game's details
    pub detail_poll_interval: u64,

    /// Direction in which game events are ordered
    pub event_sort_order: SortOrder,

    /// Optional JSON file overriding the built-in league table
    pub league_table_path: PathBuf,

    /// Game whose details are polled from startup
    pub follow_game_id: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            sihf_base_url: env::var("SIHF_BASE_URL")
                .unwrap_or_else(|_| "http://data.sihf.ch".to_string()),

            language: env::var("SIHF_LANGUAGE").unwrap_or_else(|_| "de".to_string()),

            summary_poll_interval: parse_interval(
                &env::var("SUMMARY_POLL_INTERVAL").unwrap_or_else(|_| "60".to_string()),
            )
            .context("SUMMARY_POLL_INTERVAL must be a positive number of seconds")?,

            detail_poll_interval: parse_interval(
                &env::var("DETAIL_POLL_INTERVAL").unwrap_or_else(|_| "30".to_string()),
            )
            .context("DETAIL_POLL_INTERVAL must be a positive number of seconds")?,

            event_sort_order: env::var("EVENT_SORT_ORDER")
                .unwrap_or_else(|_| "ascending".to_string())
                .parse()
                .context("EVENT_SORT_ORDER must be 'ascending' or 'descending'")?,

            league_table_path: env::var("LEAGUE_TABLE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/leagues.json")),

            follow_game_id: match env::var("FOLLOW_GAME_ID") {
                Ok(id) if !id.trim().is_empty() => Some(
                    id.trim()
                        .parse()
                        .context("FOLLOW_GAME_ID must be a numeric game id")?,
                ),
                _ => None,
            },
        })
    }
}

/// Poll intervals feed `tokio::time::interval`, which rejects zero
fn parse_interval(raw: &str) -> Result<u64> {
    let seconds: u64 = raw.trim().parse()?;
    if seconds == 0 {
        bail!("interval must not be zero");
    }
    Ok(seconds)
}
