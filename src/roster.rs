//! Player roster management
//!
//! The roster is the ordered list of player names sharing the device. Order
//! matters: it decides the reveal order and what the round's imposter and
//! first-speaker indices point at. Names are not required to be unique.

use serde::{Deserialize, Serialize};

use crate::{constants::roster::MIN_PLAYER_COUNT, error::Error};

/// Ordered list of player names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<String>,
}

impl Default for Roster {
    /// The starting roster of a fresh session
    fn default() -> Self {
        Self::new(crate::constants::roster::DEFAULT_PLAYERS)
    }
}

impl Roster {
    /// Creates a roster from names, trimming each and skipping blank ones
    pub fn new<I: IntoIterator<Item = S>, S: AsRef<str>>(names: I) -> Self {
        let mut roster = Self {
            players: Vec::new(),
        };
        for name in names {
            roster.add(name.as_ref());
        }
        roster
    }

    /// Appends a player
    ///
    /// The name is trimmed of surrounding whitespace. A name that is empty
    /// after trimming is ignored.
    ///
    /// # Returns
    ///
    /// The trimmed name that was appended, or `None` if the name was blank
    pub fn add(&mut self, name: &str) -> Option<&str> {
        let name = rustrict::trim_whitespace(name);
        if name.is_empty() {
            return None;
        }
        self.players.push(name.to_owned());
        self.players.last().map(String::as_str)
    }

    /// Removes the player at `index`
    ///
    /// Removal that would take the roster below the minimum player count is
    /// ignored.
    ///
    /// # Returns
    ///
    /// The removed name, or `None` if the roster was already at its minimum
    ///
    /// # Errors
    ///
    /// * `Error::InvalidIndex` - `index` is outside the roster
    pub fn remove(&mut self, index: usize) -> Result<Option<String>, Error> {
        if index >= self.players.len() {
            return Err(Error::InvalidIndex);
        }
        if self.players.len() <= MIN_PLAYER_COUNT {
            return Ok(None);
        }
        Ok(Some(self.players.remove(index)))
    }

    /// Number of players
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the roster has no players
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Whether there are enough players to start a round
    pub fn is_playable(&self) -> bool {
        self.players.len() >= MIN_PLAYER_COUNT
    }

    /// Name at `index`, if any
    pub fn get(&self, index: usize) -> Option<&str> {
        self.players.get(index).map(String::as_str)
    }

    /// Player names in roster order
    pub fn names(&self) -> &[String] {
        &self.players
    }

    /// Iterates over player names in roster order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(String::as_str)
    }
}
