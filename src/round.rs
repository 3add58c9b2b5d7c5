//! Round generation
//!
//! A round is fixed the moment it starts: the category, the secret word, who
//! the imposter is and who speaks first. None of it changes until the round
//! is discarded.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, CategoryChoice},
    error::Error,
    random::RandomSource,
    roster::Roster,
};

/// The immutable facts of one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundData {
    category: String,
    word: String,
    imposter_index: usize,
    first_player_index: usize,
}

impl RoundData {
    /// Draws a new round for the given roster
    ///
    /// Values are drawn in a fixed order: the category (only when the choice
    /// is random), the word, the imposter, and finally the first speaker. The
    /// first speaker is drawn independently and may be the imposter.
    ///
    /// # Errors
    ///
    /// * `Error::InsufficientPlayers` - the roster is below the minimum size
    /// * `Error::UnknownCategory` - the named category is not in the catalog
    pub fn generate<R: RandomSource>(
        roster: &Roster,
        choice: &CategoryChoice,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Result<Self, Error> {
        if !roster.is_playable() {
            return Err(Error::InsufficientPlayers);
        }

        let category = catalog.resolve(choice, rng)?;
        let word = category
            .pick_word(rng)
            .ok_or(Error::UnknownCategory)?
            .to_owned();
        let imposter_index = rng.index(roster.len());
        let first_player_index = rng.index(roster.len());

        Ok(Self {
            category: category.name().to_owned(),
            word,
            imposter_index,
            first_player_index,
        })
    }

    /// Label of the round's category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The secret word
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Roster index of the imposter
    pub fn imposter_index(&self) -> usize {
        self.imposter_index
    }

    /// Roster index of the player who opens the discussion
    pub fn first_player_index(&self) -> usize {
        self.first_player_index
    }

    /// Whether the player at `index` is the imposter
    pub fn is_imposter(&self, index: usize) -> bool {
        index == self.imposter_index
    }

    /// Name of the imposter within the roster the round was drawn for
    pub fn imposter_name<'a>(&self, roster: &'a Roster) -> Option<&'a str> {
        roster.get(self.imposter_index)
    }

    /// Name of the first speaker within the roster the round was drawn for
    pub fn first_player_name<'a>(&self, roster: &'a Roster) -> Option<&'a str> {
        roster.get(self.first_player_index)
    }
}
