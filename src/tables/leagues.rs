use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// League id used for provider league names missing from the table
pub const UNKNOWN_LEAGUE_ID: &str = "-1";

/// Maps provider league names ("NL A", "CHL", ...) to league ids
#[derive(Debug, Clone)]
pub struct LeagueTable {
    /// Map of provider name -> league id
    ids: HashMap<String, String>,
}

/// League table file contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueTableFile {
    pub leagues: Vec<LeagueEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueEntry {
    /// League name exactly as the provider spells it
    pub name: String,
    /// Id used throughout the model
    pub id: String,
}

impl LeagueTable {
    /// Create the built-in table
    pub fn new() -> Self {
        let ids = [
            ("NL A", "1"),
            ("NL B", "2"),
            ("Länderspiel A", "8"),
            ("Cup", "89"),
            ("CHL", "90"),
        ]
        .into_iter()
        .map(|(name, id)| (name.to_string(), id.to_string()))
        .collect();

        Self { ids }
    }

    /// Load the table from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read league table file")?;

        let file: LeagueTableFile =
            serde_json::from_str(&content).context("Failed to parse league table JSON")?;

        let ids: HashMap<String, String> = file
            .leagues
            .into_iter()
            .map(|entry| (entry.name, entry.id))
            .collect();

        info!("Loaded {} league mappings", ids.len());

        Ok(Self { ids })
    }

    /// Load from `path` if it exists, otherwise fall back to the built-in table
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            info!("No league table file found, using built-in leagues");
            Ok(Self::new())
        }
    }

    /// Resolve a provider league name. Matching is exact.
    pub fn league_id(&self, name: &str) -> &str {
        self.ids
            .get(name)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LEAGUE_ID)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for LeagueTable {
    fn default() -> Self {
        Self::new()
    }
}
