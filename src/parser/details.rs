use serde_json::Value;
use tracing::{debug, error};

use crate::models::{GameEvent, Roster};
use crate::parser::aggregate::{aggregate, PeriodEvents, SortOrder};
use crate::parser::events::EventParser;
use crate::parser::value;

/// Events and roster of one game
#[derive(Debug, Clone, Default)]
pub struct GameDetails {
    pub events: Vec<GameEvent>,
    pub roster: Roster,
}

impl EventParser {
    /// Parse a decoded game-overview response
    pub fn parse_details(&self, root: &Value, order: SortOrder) -> GameDetails {
        let events = match root.get("summary") {
            Some(summary) => {
                let periods: Vec<PeriodEvents> = value::list(summary.get("periods"))
                    .iter()
                    .map(|period| PeriodEvents {
                        goals: self.parse_goals(value::list(period.get("goals"))),
                        penalties: self.parse_penalties(value::list(period.get("fouls"))),
                        goalkeepers: self
                            .parse_goalkeepers(value::list(period.get("goalkeepers"))),
                    })
                    .collect();

                let shootout = self.parse_shootout(value::list(
                    summary.get("shootout").and_then(|s| s.get("shoots")),
                ));

                let events = aggregate(periods, shootout, order);
                debug!("Number of parsed events: {}", events.len());
                events
            }
            None => {
                error!("No game events found in the detail response");
                Vec::new()
            }
        };

        let roster = match root.get("players") {
            Some(players) => parse_roster(value::list(Some(players))),
            None => {
                error!("No player data found in the detail response");
                Roster::new()
            }
        };

        GameDetails { events, roster }
    }
}

/// Build a roster from player records; records without an id are skipped
pub fn parse_roster(players: &[Value]) -> Roster {
    players
        .iter()
        .filter_map(|player| {
            let id = value::uint(player.get("licenceNr"))
                .or_else(|| value::uint(player.get("id")))
                .filter(|id| *id != 0)?;

            let name = match value::text(player.get("name")) {
                name if !name.is_empty() => name,
                _ => {
                    let first = value::text(player.get("firstName"));
                    let last = value::text(player.get("lastName"));
                    format!("{} {}", first, last).trim().to_string()
                }
            };

            Some((id, name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventKind, EventTime};
    use serde_json::json;

    fn detail_response() -> Value {
        json!({
            "summary": {
                "periods": [
                    {
                        "goals": [{"time": "12:00", "teamId": 1, "text": "EQ / 1:0 - A", "scorerLicenceNr": 11}],
                        "fouls": [{"time": "03:10", "teamId": 2, "playerLicenceNr": 21, "id": 7, "minutes": 2}],
                        "goalkeepers": [{"time": "00:00", "teamId": 1, "text": "G. Keeper (IN)", "playerLicenceNr": 31}]
                    },
                    {
                        "goals": [],
                        "fouls": [{"time": "25:00", "teamId": 1, "playerLicenceNr": 12, "id": 3, "minutes": 10}]
                    }
                ],
                "shootout": {
                    "shoots": [{"number": 1, "scored": true, "scorerLicenceNr": 22, "goalkeeperLiceneNr": 31}]
                }
            },
            "players": [
                {"licenceNr": 11, "name": "A. Ambühl"},
                {"licenceNr": "21", "firstName": "Beat", "lastName": "Forster"},
                {"name": "No Licence"}
            ]
        })
    }

    #[test]
    fn test_parse_details() {
        let parser = EventParser::new().unwrap();
        let details = parser.parse_details(&detail_response(), SortOrder::Ascending);

        let kinds: Vec<EventKind> = details.events.iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::GoalkeeperIn,
                EventKind::Penalty,
                EventKind::Goal,
                EventKind::Penalty,
                EventKind::PenaltyShot,
            ]
        );

        assert_eq!(details.roster.len(), 2);
        assert_eq!(details.roster.name(11), "A. Ambühl");
        assert_eq!(details.roster.name(21), "Beat Forster");
    }

    #[test]
    fn test_parse_details_descending() {
        let parser = EventParser::new().unwrap();
        let details = parser.parse_details(&detail_response(), SortOrder::Descending);

        assert_eq!(details.events[0].kind(), EventKind::PenaltyShot);
        assert_eq!(details.events[4].kind(), EventKind::GoalkeeperIn);
    }

    #[test]
    fn test_oversized_clock_falls_back_to_zero() {
        let parser = EventParser::new().unwrap();
        let response = json!({
            "summary": {
                "periods": [{
                    "goals": [{"time": "71582789:00", "teamId": 1, "text": "EQ / 1:0 - A", "scorerLicenceNr": 11}]
                }]
            }
        });
        let details = parser.parse_details(&response, SortOrder::Ascending);

        assert_eq!(details.events.len(), 1);
        assert_eq!(details.events[0].time, EventTime::default());
        assert_eq!(details.events[0].kind(), EventKind::Goal);
    }

    #[test]
    fn test_empty_response() {
        let parser = EventParser::new().unwrap();
        let details = parser.parse_details(&json!({}), SortOrder::Ascending);

        assert!(details.events.is_empty());
        assert!(details.roster.is_empty());
    }
}
