use chrono::NaiveDate;

use crate::models::{EventsReplaced, GameSummary, GamedayChange};
use crate::parser::GameDetails;

/// Update sent from the pollers to the model worker
#[derive(Debug, Clone)]
pub enum ModelUpdate {
    /// Normalized summary table, tagged with the day it was fetched for
    Summaries {
        date: NaiveDate,
        summaries: Vec<GameSummary>,
    },

    /// Fresh events and roster of one game
    Details { game_id: u64, details: GameDetails },
}

/// Notification sent from the model worker to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelNotification {
    Gameday(GamedayChange),
    Events(EventsReplaced),
}
