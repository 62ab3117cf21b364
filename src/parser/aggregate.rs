use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::models::GameEvent;

/// Direction of the event list.
///
/// Live tickers often show the newest event first while final recaps read
/// top-down; which one a consumer wants is configured, not assumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Earliest event first
    #[default]
    Ascending,
    /// Latest event first
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ascending" | "asc" => Ok(SortOrder::Ascending),
            "descending" | "desc" => Ok(SortOrder::Descending),
            other => bail!("Unknown sort order: {}", other),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed events of one period
#[derive(Debug, Clone, Default)]
pub struct PeriodEvents {
    pub goals: Vec<GameEvent>,
    pub penalties: Vec<GameEvent>,
    pub goalkeepers: Vec<GameEvent>,
}

/// Sort by game clock. The sort is stable: events on the same clock keep
/// their relative order in both directions.
pub fn sort_events(events: &mut [GameEvent], order: SortOrder) {
    match order {
        SortOrder::Ascending => events.sort_by(|a, b| a.time.cmp(&b.time)),
        SortOrder::Descending => events.sort_by(|a, b| b.time.cmp(&a.time)),
    }
}

/// Flatten all periods (goals, penalties, goalkeepers per period) and the
/// shootout into one sorted list
pub fn aggregate(
    periods: Vec<PeriodEvents>,
    shootout: Vec<GameEvent>,
    order: SortOrder,
) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = periods
        .into_iter()
        .flat_map(|period| {
            period
                .goals
                .into_iter()
                .chain(period.penalties)
                .chain(period.goalkeepers)
        })
        .chain(shootout)
        .collect();

    sort_events(&mut events, order);
    events
}
