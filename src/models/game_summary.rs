use serde::{Deserialize, Serialize};

use crate::tables::GameStatus;

/// Total score shown before the provider reports one
pub const NO_SCORE: &str = "-:-";

/// One scheduled, live or finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Provider game id, stable for the lifetime of the game
    pub game_id: u64,

    /// League id from the league table ("-1" when unknown)
    pub league: String,

    pub hometeam: Team,

    pub awayteam: Team,

    /// Start time as displayed by the provider (e.g. "19:45")
    pub start_time: String,

    pub score: Score,

    pub status: GameStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

/// Score as "H:A" pairs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub first: String,
    pub second: String,
    pub third: String,
    pub overtime: Option<String>,
    pub total: String,
}

impl Default for Score {
    fn default() -> Self {
        Self {
            first: NO_SCORE.to_string(),
            second: NO_SCORE.to_string(),
            third: NO_SCORE.to_string(),
            overtime: None,
            total: NO_SCORE.to_string(),
        }
    }
}

impl Score {
    /// Per-period scores joined for display, e.g. "1:0, 0:2, 1:1, 0:1"
    pub fn periods_text(&self) -> String {
        let mut text = format!("{}, {}, {}", self.first, self.second, self.third);
        if let Some(overtime) = &self.overtime {
            text.push_str(", ");
            text.push_str(overtime);
        }
        text
    }

    /// Whether the provider has reported a total yet
    pub fn has_total(&self) -> bool {
        self.total != NO_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_text() {
        let mut score = Score {
            first: "1:0".to_string(),
            second: "0:2".to_string(),
            third: "1:1".to_string(),
            overtime: None,
            total: "2:3".to_string(),
        };
        assert_eq!(score.periods_text(), "1:0, 0:2, 1:1");

        score.overtime = Some("0:1".to_string());
        assert_eq!(score.periods_text(), "1:0, 0:2, 1:1, 0:1");
    }

    #[test]
    fn test_default_score_has_no_total() {
        let score = Score::default();
        assert!(!score.has_total());
        assert_eq!(score.periods_text(), "-:-, -:-, -:-");
    }
}
