use serde::Serialize;
use tracing::debug;

use crate::models::{EventDetail, GameEvent, GameSummary, PlayerRole, Roster};
use crate::parser::{sort_events, SortOrder};

/// One game: its latest summary, its events and the roster used to name
/// the players in those events
#[derive(Debug, Clone)]
pub struct Game {
    summary: GameSummary,
    events: Vec<GameEvent>,
    roster: Roster,
    score_changed: bool,
    status_changed: bool,
}

/// What changed in the last summary update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryChange {
    pub score_changed: bool,
    pub status_changed: bool,
}

impl SummaryChange {
    pub fn any(&self) -> bool {
        self.score_changed || self.status_changed
    }
}

/// Display-ready view of a single event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRow {
    pub team: Option<i64>,
    pub time: String,
    pub player: String,
    pub info: String,
    pub text: String,
    pub subtext: String,
}

impl Game {
    pub fn new(summary: GameSummary) -> Self {
        Self {
            summary,
            events: Vec::new(),
            roster: Roster::new(),
            score_changed: false,
            status_changed: false,
        }
    }

    pub fn game_id(&self) -> u64 {
        self.summary.game_id
    }

    pub fn summary(&self) -> &GameSummary {
        &self.summary
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Flags from the most recent [`Game::update_summary`]
    pub fn last_change(&self) -> SummaryChange {
        SummaryChange {
            score_changed: self.score_changed,
            status_changed: self.status_changed,
        }
    }

    /// Replace the stored summary, keeping the original game id.
    ///
    /// The first move away from the "-:-" placeholder is not a score change;
    /// any status difference is.
    pub fn update_summary(&mut self, summary: GameSummary) -> SummaryChange {
        let had_total = self.summary.score.has_total();
        let old_total = std::mem::take(&mut self.summary.score.total);
        let old_status = self.summary.status;
        let game_id = self.summary.game_id;

        self.score_changed = had_total && summary.score.total != old_total;
        self.status_changed = summary.status != old_status;

        self.summary = GameSummary { game_id, ..summary };

        if self.score_changed || self.status_changed {
            debug!(
                "Game {} changed: score {} -> {}, status {} -> {}",
                game_id,
                old_total,
                self.summary.score.total,
                old_status.code(),
                self.summary.status.code()
            );
        }

        self.last_change()
    }

    /// Replace the whole event list and re-sort it
    pub fn replace_events(&mut self, events: Vec<GameEvent>, order: SortOrder) -> usize {
        self.events.clear();
        self.events.extend(events);
        sort_events(&mut self.events, order);
        self.events.len()
    }

    pub fn replace_roster(&mut self, roster: Roster) {
        self.roster = roster;
    }

    pub fn total_score(&self) -> &str {
        &self.summary.score.total
    }

    pub fn periods_score(&self) -> String {
        self.summary.score.periods_text()
    }

    /// Status text; games that have not started show their start time
    pub fn status_text(&self) -> String {
        if self.summary.status.is_started() {
            self.summary.status.text().to_string()
        } else {
            format!("Starts {}", self.summary.start_time)
        }
    }

    /// Render the events, resolving player names through the roster
    pub fn event_rows(&self) -> Vec<EventRow> {
        self.events.iter().map(|event| self.event_row(event)).collect()
    }

    fn event_row(&self, event: &GameEvent) -> EventRow {
        let roster = &self.roster;

        let (info, text, subtext) = match &event.detail {
            EventDetail::Goal { score, play_type } => {
                let assists: Vec<&str> = [PlayerRole::FirstAssist, PlayerRole::SecondAssist]
                    .into_iter()
                    .map(|role| roster.name_of(event.player(role)))
                    .filter(|name| !name.is_empty())
                    .collect();
                (
                    assists.join(", "),
                    "Goal".to_string(),
                    format!("{} / {}", play_type, score),
                )
            }
            EventDetail::Penalty { duration, .. } => {
                (duration.clone(), "Penalty".to_string(), duration.clone())
            }
            EventDetail::GoalkeeperIn => (
                "Goalkeeper in".to_string(),
                "Goalkeeper".to_string(),
                String::new(),
            ),
            EventDetail::GoalkeeperOut => (
                "Goalkeeper out".to_string(),
                "Goalkeeper".to_string(),
                String::new(),
            ),
            EventDetail::PenaltyShot { scored } => (
                format!(
                    "Goalkeeper: {}",
                    roster.name_of(event.player(PlayerRole::Goalkeeper))
                ),
                "Penalty shot".to_string(),
                if *scored { "Scored" } else { "Missed" }.to_string(),
            ),
        };

        EventRow {
            team: event.team,
            time: event.time.to_string(),
            player: roster.name_of(event.main_player()).to_string(),
            info,
            text,
            subtext,
        }
    }
}
