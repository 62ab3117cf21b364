pub mod leagues;
pub mod status;

pub use leagues::{LeagueTable, UNKNOWN_LEAGUE_ID};
pub use status::{GameStatus, STATUS_TEXTS};
