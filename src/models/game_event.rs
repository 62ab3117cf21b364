use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of an event on the game clock.
///
/// `sequence` only orders events sharing the same second; shootout attempts
/// all sit at 65:00 and are ordered by their attempt number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventTime {
    pub seconds: u32,
    pub sequence: u32,
}

impl EventTime {
    pub fn from_seconds(seconds: u32) -> Self {
        Self {
            seconds,
            sequence: 0,
        }
    }

    /// Parse a provider clock value: "mm:ss", optionally followed by ".n"
    pub fn from_clock(clock: &str) -> Option<Self> {
        let (clock, sequence) = match clock.trim().split_once('.') {
            Some((clock, sequence)) => (clock, sequence.parse().ok()?),
            None => (clock.trim(), 0),
        };

        let (minutes, seconds) = clock.split_once(':')?;
        let minutes: u32 = minutes.trim().parse().ok()?;
        let seconds: u32 = seconds.trim().parse().ok()?;

        Some(Self {
            seconds: minutes.checked_mul(60)?.checked_add(seconds)?,
            sequence,
        })
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.seconds / 60, self.seconds % 60)
    }
}

/// Event category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Goal,
    Penalty,
    GoalkeeperIn,
    GoalkeeperOut,
    PenaltyShot,
}

/// Role a player had in an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Scorer,
    FirstAssist,
    SecondAssist,
    Penalized,
    Goalkeeper,
}

/// Kind-specific event data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventDetail {
    Goal {
        /// Score after the goal, "H:A" (empty when the text had none)
        score: String,
        /// Situation tag such as "EQ", "PP1" or "GWG"
        play_type: String,
    },
    Penalty {
        code: i64,
        /// Minutes with an apostrophe, e.g. "2'"
        duration: String,
    },
    GoalkeeperIn,
    GoalkeeperOut,
    PenaltyShot {
        scored: bool,
    },
}

/// One play within a game. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub time: EventTime,

    /// Team id; the provider does not supply one for shootout attempts
    pub team: Option<i64>,

    /// Player license numbers by role; absent roles are omitted
    pub players: BTreeMap<PlayerRole, u64>,

    pub detail: EventDetail,
}

impl GameEvent {
    pub fn new(detail: EventDetail, time: EventTime, team: Option<i64>) -> Self {
        Self {
            time,
            team,
            players: BTreeMap::new(),
            detail,
        }
    }

    /// Builder-style player assignment. Id 0 means "nobody" and is dropped.
    pub fn with_player(mut self, role: PlayerRole, id: Option<u64>) -> Self {
        if let Some(id) = id.filter(|id| *id != 0) {
            self.players.insert(role, id);
        }
        self
    }

    pub fn kind(&self) -> EventKind {
        match self.detail {
            EventDetail::Goal { .. } => EventKind::Goal,
            EventDetail::Penalty { .. } => EventKind::Penalty,
            EventDetail::GoalkeeperIn => EventKind::GoalkeeperIn,
            EventDetail::GoalkeeperOut => EventKind::GoalkeeperOut,
            EventDetail::PenaltyShot { .. } => EventKind::PenaltyShot,
        }
    }

    pub fn player(&self, role: PlayerRole) -> Option<u64> {
        self.players.get(&role).copied()
    }

    /// The player an event is primarily about
    pub fn main_player(&self) -> Option<u64> {
        let role = match self.kind() {
            EventKind::Goal | EventKind::PenaltyShot => PlayerRole::Scorer,
            EventKind::Penalty => PlayerRole::Penalized,
            EventKind::GoalkeeperIn | EventKind::GoalkeeperOut => PlayerRole::Goalkeeper,
        };
        self.player(role)
    }
}
