use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use crate::models::{EventDetail, EventTime, GameEvent, PlayerRole};
use crate::parser::text::TextExtractor;
use crate::parser::value;

/// Clock position of the shootout; attempts are ordered by their number
const SHOOTOUT_MINUTE: u32 = 65;

/// Converts the provider's per-category event records into [`GameEvent`]s.
///
/// Missing fields never fail a record: team and players become absent, the
/// time becomes 00:00 and texts become empty.
#[derive(Debug, Clone)]
pub struct EventParser {
    extractor: TextExtractor,
}

impl EventParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            extractor: TextExtractor::new()?,
        })
    }

    /// Goals; score and play type come from the "PP1 / 2:1 - Names" text
    pub fn parse_goals(&self, records: &[Value]) -> Vec<GameEvent> {
        records
            .iter()
            .map(|goal| {
                let text = value::text(goal.get("text"));
                let detail = EventDetail::Goal {
                    score: self.extractor.score(&text),
                    play_type: self.extractor.play_type(&text),
                };

                GameEvent::new(detail, event_time(goal.get("time")), team(goal))
                    .with_player(PlayerRole::Scorer, value::uint(goal.get("scorerLicenceNr")))
                    .with_player(
                        PlayerRole::FirstAssist,
                        value::uint(goal.get("assist1LicenceNr")),
                    )
                    .with_player(
                        PlayerRole::SecondAssist,
                        value::uint(goal.get("assist2LicenceNr")),
                    )
            })
            .collect()
    }

    pub fn parse_penalties(&self, records: &[Value]) -> Vec<GameEvent> {
        records
            .iter()
            .map(|foul| {
                let minutes = value::text(foul.get("minutes"));
                let detail = EventDetail::Penalty {
                    code: value::int(foul.get("id")).unwrap_or(0),
                    duration: if minutes.is_empty() {
                        String::new()
                    } else {
                        format!("{}'", minutes)
                    },
                };

                GameEvent::new(detail, event_time(foul.get("time")), team(foul))
                    .with_player(PlayerRole::Penalized, value::uint(foul.get("playerLicenceNr")))
            })
            .collect()
    }

    /// Goalkeeper changes; in/out is guessed from the "(IN)" marker in the text
    pub fn parse_goalkeepers(&self, records: &[Value]) -> Vec<GameEvent> {
        records
            .iter()
            .map(|change| {
                let text = value::text(change.get("text"));
                let detail = if self.extractor.goalkeeper_in(&text) {
                    EventDetail::GoalkeeperIn
                } else {
                    EventDetail::GoalkeeperOut
                };

                GameEvent::new(detail, event_time(change.get("time")), team(change))
                    .with_player(PlayerRole::Goalkeeper, value::uint(change.get("playerLicenceNr")))
            })
            .collect()
    }

    /// Shootout attempts. The feed carries no team for these.
    pub fn parse_shootout(&self, records: &[Value]) -> Vec<GameEvent> {
        debug!("Parsing shootout, {} shots", records.len());

        records
            .iter()
            .map(|shot| {
                let time = EventTime {
                    seconds: SHOOTOUT_MINUTE * 60,
                    sequence: value::uint(shot.get("number"))
                        .and_then(|n| u32::try_from(n).ok())
                        .unwrap_or(0),
                };
                let detail = EventDetail::PenaltyShot {
                    scored: value::boolean(shot.get("scored")).unwrap_or(false),
                };
                // The provider misspells the goalkeeper field on some responses
                let goalkeeper = value::uint(shot.get("goalkeeperLicenceNr"))
                    .or_else(|| value::uint(shot.get("goalkeeperLiceneNr")));

                GameEvent::new(detail, time, None)
                    .with_player(PlayerRole::Scorer, value::uint(shot.get("scorerLicenceNr")))
                    .with_player(PlayerRole::Goalkeeper, goalkeeper)
            })
            .collect()
    }
}

fn team(record: &Value) -> Option<i64> {
    value::int(record.get("teamId"))
}

/// "mm:ss" strings or plain seconds; anything else is 00:00
fn event_time(time: Option<&Value>) -> EventTime {
    match time {
        Some(Value::String(clock)) => EventTime::from_clock(clock).unwrap_or_default(),
        Some(Value::Number(seconds)) => seconds
            .as_u64()
            .and_then(|s| u32::try_from(s).ok())
            .map(EventTime::from_seconds)
            .unwrap_or_default(),
        _ => EventTime::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventKind;
    use serde_json::json;

    fn parser() -> EventParser {
        EventParser::new().unwrap()
    }

    #[test]
    fn test_parse_goal() {
        let records = json!([{
            "time": "23:41",
            "teamId": 101,
            "text": "PP1 / 2:1 - J. Doe, A. Smith",
            "scorerLicenceNr": 1001,
            "assist1LicenceNr": "1002",
            "assist2LicenceNr": 0
        }]);
        let events = parser().parse_goals(records.as_array().unwrap());

        assert_eq!(events.len(), 1);
        let goal = &events[0];
        assert_eq!(goal.kind(), EventKind::Goal);
        assert_eq!(goal.time, EventTime::from_seconds(23 * 60 + 41));
        assert_eq!(goal.team, Some(101));
        assert_eq!(
            goal.detail,
            EventDetail::Goal {
                score: "2:1".to_string(),
                play_type: "PP1".to_string()
            }
        );
        assert_eq!(goal.player(PlayerRole::Scorer), Some(1001));
        assert_eq!(goal.player(PlayerRole::FirstAssist), Some(1002));
        assert_eq!(goal.player(PlayerRole::SecondAssist), None);
    }

    #[test]
    fn test_parse_penalty() {
        let records = json!([{
            "time": "05:00",
            "teamId": "102",
            "playerLicenceNr": 2001,
            "id": 501,
            "minutes": 2
        }]);
        let events = parser().parse_penalties(records.as_array().unwrap());

        assert_eq!(events[0].team, Some(102));
        assert_eq!(events[0].main_player(), Some(2001));
        assert_eq!(
            events[0].detail,
            EventDetail::Penalty {
                code: 501,
                duration: "2'".to_string()
            }
        );
    }

    #[test]
    fn test_parse_goalkeepers() {
        let records = json!([
            {"time": "00:00", "teamId": 101, "text": "J. Doe (IN)", "playerLicenceNr": 3001},
            {"time": "58:12", "teamId": 101, "text": "J. Doe", "playerLicenceNr": 3001}
        ]);
        let events = parser().parse_goalkeepers(records.as_array().unwrap());

        assert_eq!(events[0].kind(), EventKind::GoalkeeperIn);
        assert_eq!(events[1].kind(), EventKind::GoalkeeperOut);
        assert_eq!(events[1].player(PlayerRole::Goalkeeper), Some(3001));
    }

    #[test]
    fn test_parse_shootout() {
        let records = json!([
            {"number": 1, "scored": true, "scorerLicenceNr": 4001, "goalkeeperLiceneNr": 5001},
            {"number": 2, "scored": false, "scorerLicenceNr": 4002, "goalkeeperLicenceNr": 5002}
        ]);
        let events = parser().parse_shootout(records.as_array().unwrap());

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].team, None);
        assert_eq!(events[0].time.to_string(), "65:00");
        assert!(events[0].time < events[1].time);
        assert_eq!(events[0].detail, EventDetail::PenaltyShot { scored: true });
        assert_eq!(events[0].player(PlayerRole::Goalkeeper), Some(5001));
        assert_eq!(events[1].player(PlayerRole::Goalkeeper), Some(5002));
        assert_eq!(events[1].detail, EventDetail::PenaltyShot { scored: false });
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let records = json!([{}, "not an object"]);
        let parser = parser();

        let goals = parser.parse_goals(records.as_array().unwrap());
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].time, EventTime::default());
        assert_eq!(goals[0].team, None);
        assert!(goals[0].players.is_empty());
        assert_eq!(
            goals[0].detail,
            EventDetail::Goal {
                score: String::new(),
                play_type: String::new()
            }
        );

        let penalties = parser.parse_penalties(records.as_array().unwrap());
        assert_eq!(
            penalties[1].detail,
            EventDetail::Penalty {
                code: 0,
                duration: String::new()
            }
        );
    }

    #[test]
    fn test_numeric_time_is_seconds() {
        assert_eq!(event_time(Some(&json!(754))), EventTime::from_seconds(754));
        assert_eq!(event_time(Some(&json!("garbage"))), EventTime::default());
        assert_eq!(event_time(Some(&json!(-3))), EventTime::default());
    }
}
