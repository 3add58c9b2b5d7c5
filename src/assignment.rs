//! Sequential role assignment
//!
//! The device is passed from player to player. Each player reveals their
//! role, then hides it again before handing the device on. The traversal
//! visits every roster position exactly once, in ascending order.

use serde::{Deserialize, Serialize};

use crate::{error::Error, round::RoundData};

/// Position of the assignment traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assignment {
    /// Player `index` holds the device with their role hidden
    Hidden(usize),
    /// Player `index` is looking at their role
    Revealed(usize),
    /// Every player has seen their role
    Complete,
}

impl Default for Assignment {
    fn default() -> Self {
        Self::Hidden(0)
    }
}

/// What a player is shown when they reveal their role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Role {
    /// The imposter only learns the category
    Imposter {
        /// Category label of the round
        category: String,
    },
    /// Crew members learn the secret word and nothing about the imposter
    Crew {
        /// The secret word
        word: String,
    },
}

impl Role {
    /// Derives the role of the player at `index` for a round
    pub fn of(round: &RoundData, index: usize) -> Self {
        if round.is_imposter(index) {
            Self::Imposter {
                category: round.category().to_owned(),
            }
        } else {
            Self::Crew {
                word: round.word().to_owned(),
            }
        }
    }
}

impl Assignment {
    /// Roster index of the player currently holding the device
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Hidden(i) | Self::Revealed(i) => Some(*i),
            Self::Complete => None,
        }
    }

    /// Whether the current player's role is on screen
    pub fn is_revealed(&self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    /// Whether every player has seen their role
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Shows the current player's role
    ///
    /// # Errors
    ///
    /// * `Error::InvalidTransition` - the role is already shown or the
    ///   traversal is complete
    pub fn reveal(&mut self) -> Result<(), Error> {
        match *self {
            Self::Hidden(i) => {
                *self = Self::Revealed(i);
                Ok(())
            }
            _ => Err(Error::InvalidTransition),
        }
    }

    /// Hides the current role and passes the device to the next player
    ///
    /// # Arguments
    ///
    /// * `player_count` - Size of the roster the round was drawn for
    ///
    /// # Errors
    ///
    /// * `Error::InvalidTransition` - the current role has not been revealed
    pub fn advance(&mut self, player_count: usize) -> Result<(), Error> {
        match *self {
            Self::Revealed(i) if i + 1 < player_count => {
                *self = Self::Hidden(i + 1);
                Ok(())
            }
            Self::Revealed(_) => {
                *self = Self::Complete;
                Ok(())
            }
            _ => Err(Error::InvalidTransition),
        }
    }

    /// The role on screen, if any
    pub fn role(&self, round: &RoundData) -> Option<Role> {
        match self {
            Self::Revealed(i) => Some(Role::of(round, *i)),
            _ => None,
        }
    }
}
