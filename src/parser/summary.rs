use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::IngestError;
use crate::models::{GameSummary, Score, Team};
use crate::parser::value;
use crate::tables::{GameStatus, LeagueTable};

/// Fields of a per-game record in the summary table
const RECORD_ARITY: usize = 9;

/// Arity of the placeholder record sent when a league has no games today
const NO_GAMES_ARITY: usize = 1;

/// Turns rows of the provider's summary table into [`GameSummary`] values.
///
/// A row is a positional array:
/// `[league, time, hometeam, awayteam, totalScore, periodsScore, otIndicator, meta, details]`.
#[derive(Debug, Clone)]
pub struct SummaryNormalizer {
    leagues: Arc<LeagueTable>,
}

impl SummaryNormalizer {
    pub fn new(leagues: Arc<LeagueTable>) -> Self {
        Self { leagues }
    }

    /// Normalize every row of a decoded summary response.
    ///
    /// Malformed rows are logged and skipped; the rest of the batch is kept.
    pub fn normalize_batch(&self, root: &Value) -> Vec<GameSummary> {
        let Some(rows) = root.get("data").and_then(Value::as_array) else {
            error!("No 'data' field in the summary response");
            return Vec::new();
        };

        let mut summaries = Vec::with_capacity(rows.len());

        for row in rows {
            match self.normalize(row) {
                Ok(Some(summary)) => summaries.push(summary),
                Ok(None) => debug!("League row without games, skipping"),
                Err(e) => warn!("Skipping game record: {}", e),
            }
        }

        debug!("Normalized {} of {} summary rows", summaries.len(), rows.len());
        summaries
    }

    /// Normalize one row. `Ok(None)` means "no games scheduled".
    pub fn normalize(&self, row: &Value) -> Result<Option<GameSummary>, IngestError> {
        let fields = match row.as_array() {
            Some(fields) => fields.as_slice(),
            None => return Err(IngestError::MalformedRecord { arity: 0 }),
        };

        match fields.len() {
            RECORD_ARITY => self.parse_record(fields).map(Some),
            NO_GAMES_ARITY => Ok(None),
            arity => Err(IngestError::MalformedRecord { arity }),
        }
    }

    fn parse_record(&self, fields: &[Value]) -> Result<GameSummary, IngestError> {
        let league = value::text(fields.first());
        let start_time = value::text(fields.get(1));
        let hometeam = fields.get(2);
        let awayteam = fields.get(3);
        let total_score = fields.get(4);
        let periods_score = fields.get(5);
        let ot_indicator = value::text(fields.get(6));
        let meta = fields.get(7);
        let details = fields.get(8);

        let game_id = value::uint(details.and_then(|d| d.get("gameId")))
            .ok_or(IngestError::MissingGameId)?;

        let progress = value::float(meta.and_then(|m| m.get("percent"))).unwrap_or(0.0);
        let phase = value::text(meta.and_then(|m| m.get("name")));
        let status = discretize_status(progress, &phase, &ot_indicator);

        debug!(
            "Game {} status {} (progress {}, phase '{}', indicator '{}')",
            game_id,
            status.code(),
            progress,
            phase,
            ot_indicator
        );

        Ok(GameSummary {
            game_id,
            league: self.leagues.league_id(&league).to_string(),
            hometeam: parse_team(hometeam),
            awayteam: parse_team(awayteam),
            start_time,
            score: parse_score(total_score, periods_score),
            status,
        })
    }
}

/// Derive the status code from the provider's progress percentage.
///
/// Regular play maps linearly onto 0..=6 (progress 17 is the first period,
/// 33 the first break and so on). 88 is overtime. At 100 the phase name
/// decides: "Shootout" is 8, "Ende" is 12 regardless of how the game ended,
/// "Ende*" is an unofficial final qualified by the OT/SO indicator, and
/// anything else is reported by the provider at the end of the third.
pub fn discretize_status(progress: f64, phase: &str, ot_indicator: &str) -> GameStatus {
    if progress == 100.0 {
        match phase {
            "Shootout" => GameStatus::SHOOTOUT,
            "Ende" => GameStatus::FINAL,
            "Ende*" => match ot_indicator {
                "OT" => GameStatus::UNOFFICIAL_FINAL_OVERTIME,
                "SO" => GameStatus::UNOFFICIAL_FINAL_SHOOTOUT,
                _ => GameStatus::UNOFFICIAL_FINAL,
            },
            _ => GameStatus::END_OF_THIRD,
        }
    } else if progress == 88.0 {
        GameStatus::OVERTIME
    } else {
        let code = (progress / 100.0 * 6.0).round().clamp(0.0, 6.0);
        GameStatus(code as u8)
    }
}

fn parse_team(team: Option<&Value>) -> Team {
    Team {
        id: value::int(team.and_then(|t| t.get("id"))).unwrap_or(0),
        name: value::text(team.and_then(|t| t.get("name"))),
    }
}

fn parse_score(total: Option<&Value>, periods: Option<&Value>) -> Score {
    let home = value::list(periods.and_then(|p| p.get("homeTeam")));
    let away = value::list(periods.and_then(|p| p.get("awayTeam")));

    let pair = |index: usize| {
        format!(
            "{}:{}",
            value::text_or_dash(home.get(index)),
            value::text_or_dash(away.get(index))
        )
    };

    Score {
        first: pair(0),
        second: pair(1),
        third: pair(2),
        overtime: (home.len() > 3 && away.len() > 3).then(|| pair(3)),
        total: format!(
            "{}:{}",
            value::text_or_dash(total.and_then(|t| t.get("homeTeam"))),
            value::text_or_dash(total.and_then(|t| t.get("awayTeam")))
        ),
    }
}
