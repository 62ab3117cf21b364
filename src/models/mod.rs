pub mod game;
pub mod game_event;
pub mod game_summary;
pub mod gameday;
pub mod roster;
pub mod update;

pub use game::{EventRow, Game, SummaryChange};
pub use game_event::{EventDetail, EventKind, EventTime, GameEvent, PlayerRole};
pub use game_summary::{GameSummary, Score, Team, NO_SCORE};
pub use gameday::{EventsReplaced, Gameday, GamedayChange};
pub use roster::Roster;
pub use update::{ModelNotification, ModelUpdate};
