use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Player license number -> display name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    players: HashMap<u64, String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: u64, name: impl Into<String>) {
        self.players.insert(id, name.into());
    }

    /// Player name, or "" for ids the roster does not know
    pub fn name(&self, id: u64) -> &str {
        self.players.get(&id).map(String::as_str).unwrap_or("")
    }

    /// Like [`Roster::name`] for an optional id
    pub fn name_of(&self, id: Option<u64>) -> &str {
        id.map(|id| self.name(id)).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl FromIterator<(u64, String)> for Roster {
    fn from_iter<I: IntoIterator<Item = (u64, String)>>(iter: I) -> Self {
        Self {
            players: iter.into_iter().collect(),
        }
    }
}
