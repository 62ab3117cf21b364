use serde::{Deserialize, Serialize};

/// Display texts indexed by status code
pub const STATUS_TEXTS: [&str; 13] = [
    "Not Started",
    "First Period",
    "End of First",
    "Second Period",
    "End of Second",
    "Third Period",
    "End of Third",
    "Overtime",
    "Shootout",
    "Final (unofficial)",
    "Final (unofficial, overtime)",
    "Final (unofficial, shootout)",
    "Final",
];

const UNKNOWN_STATUS_TEXT: &str = "Unknown status";

/// Coarse game phase derived from the provider's progress percentage.
///
/// Codes 0..=6 are regulation (not started, periods and breaks), 7 is
/// overtime, 8 shootout, 9..=11 the unofficial finals and 12 the final.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameStatus(pub u8);

impl GameStatus {
    pub const NOT_STARTED: GameStatus = GameStatus(0);
    pub const END_OF_THIRD: GameStatus = GameStatus(6);
    pub const OVERTIME: GameStatus = GameStatus(7);
    pub const SHOOTOUT: GameStatus = GameStatus(8);
    pub const UNOFFICIAL_FINAL: GameStatus = GameStatus(9);
    pub const UNOFFICIAL_FINAL_OVERTIME: GameStatus = GameStatus(10);
    pub const UNOFFICIAL_FINAL_SHOOTOUT: GameStatus = GameStatus(11);
    pub const FINAL: GameStatus = GameStatus(12);

    pub fn code(&self) -> u8 {
        self.0
    }

    /// Generic status text. Code 0 is shown as a start time by
    /// [`crate::models::Game::status_text`] instead.
    pub fn text(&self) -> &'static str {
        STATUS_TEXTS
            .get(self.0 as usize)
            .copied()
            .unwrap_or(UNKNOWN_STATUS_TEXT)
    }

    pub fn is_started(&self) -> bool {
        self.0 != 0
    }
}
