use chrono::{Local, NaiveDate};
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::models::{Game, GameEvent, GameSummary, Roster};
use crate::parser::SortOrder;

/// Change notification for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamedayChange {
    /// Everything was cleared (date rollover)
    Reset,
    /// A new game was appended at `position`
    Inserted { position: usize, game_id: u64 },
    /// Score or status of the game at `position` changed
    Updated { position: usize, game_id: u64 },
}

/// A game's event list was replaced; covers the game's whole sub-list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventsReplaced {
    pub game_id: u64,
    pub position: usize,
    pub len: usize,
}

/// All games of one calendar day, in the order they were first seen.
///
/// Positions are assigned on insertion and never re-sorted. Games that
/// disappear from later batches are kept until the date rolls over, so the
/// day's history stays available.
#[derive(Debug, Clone)]
pub struct Gameday {
    date: NaiveDate,
    games: IndexMap<u64, Game>,
}

impl Gameday {
    /// Empty gameday for `date`
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            games: IndexMap::new(),
        }
    }

    /// Empty gameday for the local calendar day
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Merge a batch of summaries tagged with `date`.
    ///
    /// A different date clears the collection first, even when the batch is
    /// empty. Known games are updated in place and only reported when their
    /// score or status changed.
    pub fn merge(&mut self, date: NaiveDate, summaries: Vec<GameSummary>) -> Vec<GamedayChange> {
        let mut changes = Vec::new();

        if date != self.date {
            info!(
                "Gameday rollover {} -> {}, dropping {} games",
                self.date,
                date,
                self.games.len()
            );
            self.date = date;
            self.games.clear();
            changes.push(GamedayChange::Reset);
        }

        for summary in summaries {
            let game_id = summary.game_id;

            match self.games.get_full_mut(&game_id) {
                Some((position, _, game)) => {
                    if game.update_summary(summary).any() {
                        changes.push(GamedayChange::Updated { position, game_id });
                    }
                }
                None => {
                    let (position, _) = self.games.insert_full(game_id, Game::new(summary));
                    debug!("Inserted game {} at position {}", game_id, position);
                    changes.push(GamedayChange::Inserted { position, game_id });
                }
            }
        }

        changes
    }

    /// Replace a game's events and roster. Unknown games are ignored.
    pub fn replace_details(
        &mut self,
        game_id: u64,
        events: Vec<GameEvent>,
        roster: Roster,
        order: SortOrder,
    ) -> Option<EventsReplaced> {
        let (position, _, game) = self.games.get_full_mut(&game_id)?;

        let len = game.replace_events(events, order);
        game.replace_roster(roster);

        Some(EventsReplaced {
            game_id,
            position,
            len,
        })
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Game at a display position
    pub fn get(&self, position: usize) -> Option<&Game> {
        self.games.get_index(position).map(|(_, game)| game)
    }

    pub fn get_by_id(&self, game_id: u64) -> Option<&Game> {
        self.games.get(&game_id)
    }

    pub fn position_of(&self, game_id: u64) -> Option<usize> {
        self.games.get_index_of(&game_id)
    }

    /// Games in display order
    pub fn iter(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }
}

impl Default for Gameday {
    fn default() -> Self {
        Self::today()
    }
}
