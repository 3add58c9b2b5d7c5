//! Score ledger
//!
//! This module keeps the running tally of crew and imposter wins for every
//! player name seen by the session. Entries are keyed by name, so players
//! sharing a name also share a tally. The ledger is saved through a
//! [`ScoreStore`] after every change; a failed save is logged and otherwise
//! ignored.

use std::{cmp::Reverse, collections::HashMap};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    TruncatedVec, constants::leaderboard::DISPLAY_LIMIT, round::RoundData, roster::Roster,
    store::ScoreStore,
};

/// Stored mapping from player name to tally
pub type Scores = HashMap<String, ScoreEntry>;

/// Wins recorded for one player name
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Rounds won while on the crew
    pub crew_wins: u64,
    /// Rounds won while being the imposter
    pub imposter_wins: u64,
}

impl ScoreEntry {
    /// Total wins, used for ranking
    pub fn total(&self) -> u64 {
        self.crew_wins + self.imposter_wins
    }
}

/// Persistent tally of wins per player name
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    scores: Scores,
}

impl Leaderboard {
    /// Loads the ledger from a store
    ///
    /// Missing or unreadable data yields an empty ledger.
    pub fn load<S: ScoreStore>(store: &S) -> Self {
        match store.load() {
            Ok(scores) => {
                debug!(players = scores.len(), "loaded score ledger");
                Self { scores }
            }
            Err(err) => {
                warn!(error = %err, "failed to load score ledger; starting empty");
                Self::default()
            }
        }
    }

    /// Writes the ledger to a store, logging instead of failing
    fn persist<S: ScoreStore>(&self, store: &S) {
        if let Err(err) = store.save(&self.scores) {
            warn!(error = %err, "failed to save score ledger");
        }
    }

    /// Makes sure a tally exists for `name`
    ///
    /// # Returns
    ///
    /// `true` if a new, empty tally was created (and saved)
    pub fn ensure<S: ScoreStore>(&mut self, name: &str, store: &S) -> bool {
        if self.scores.contains_key(name) {
            return false;
        }
        self.scores.insert(name.to_owned(), ScoreEntry::default());
        self.persist(store);
        true
    }

    /// Credits the winning side of a finished round
    ///
    /// The imposter gains an imposter win only if the crew lost; every other
    /// player gains a crew win only if the crew won. The losing side is left
    /// untouched.
    ///
    /// # Arguments
    ///
    /// * `roster` - The roster the round was drawn for
    /// * `round` - The finished round
    /// * `crew_won` - Whether the crew identified the imposter
    /// * `store` - Where the updated ledger is saved
    pub fn resolve_round<S: ScoreStore>(
        &mut self,
        roster: &Roster,
        round: &RoundData,
        crew_won: bool,
        store: &S,
    ) {
        for (index, name) in roster.iter().enumerate() {
            let entry = self.scores.entry(name.to_owned()).or_default();
            if round.is_imposter(index) {
                if !crew_won {
                    entry.imposter_wins += 1;
                }
            } else if crew_won {
                entry.crew_wins += 1;
            }
        }
        debug!(crew_won, players = roster.len(), "resolved round");
        self.persist(store);
    }

    /// Forgets every tally and saves the empty ledger
    pub fn clear_all<S: ScoreStore>(&mut self, store: &S) {
        self.scores.clear();
        self.persist(store);
    }

    /// Tally for `name`, if one exists
    pub fn score(&self, name: &str) -> Option<ScoreEntry> {
        self.scores.get(name).copied()
    }

    /// Total wins for `name`, zero if unknown
    pub fn total_score(&self, name: &str) -> u64 {
        self.score(name).map_or(0, |entry| entry.total())
    }

    /// Number of stored tallies
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no tallies are stored
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Roster players ranked by total wins
    ///
    /// Players with equal totals keep their roster order.
    pub fn ranked(&self, roster: &Roster) -> TruncatedVec<(String, ScoreEntry)> {
        let ranked = roster
            .iter()
            .map(|name| (name.to_owned(), self.score(name).unwrap_or_default()))
            .sorted_by_key(|(_, entry)| Reverse(entry.total()))
            .collect_vec();

        TruncatedVec::new(ranked.into_iter(), DISPLAY_LIMIT, roster.len())
    }
}
