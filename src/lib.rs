//! # Imposter Game Library
//!
//! This library provides the core game logic for a pass-the-device social
//! deduction word game. One hidden player, the imposter, is told only the
//! category while everyone else sees the secret word. After a timed
//! discussion the group votes and the imposter is revealed.
//!
//! The crate covers the round lifecycle only: roster management, role
//! assignment, the discussion countdown, and the win ledger. Rendering,
//! audio, and storage are supplied by the host through small traits.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use derive_where::derive_where;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub mod assignment;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod feedback;
pub mod game;
pub mod leaderboard;
pub mod random;
pub mod round;
pub mod roster;
pub mod store;
pub mod timer;

pub use error::Error;
pub use game::Game;

/// Alarm messages the game asks the host to deliver later
///
/// The host schedules each alarm with the duration it was given and hands it
/// back through [`Game::receive_alarm`] once that time has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Advance the discussion countdown by one second
    Tick {
        /// Countdown run the alarm belongs to
        generation: u64,
    },
}

/// A truncated vector that maintains the exact count while limiting displayed items
///
/// This structure is useful for displaying a limited number of items while
/// still showing the total count. For example, showing "12 players" but only
/// listing the first 5 tallies.
#[derive(Debug, Clone, Serialize)]
#[derive_where(Default)]
pub struct TruncatedVec<T> {
    /// The exact total count of items
    exact_count: usize,
    /// The truncated list of items (up to the limit)
    items: Vec<T>,
}

impl<T: Clone> TruncatedVec<T> {
    /// Creates a new truncated vector from an iterator
    ///
    /// # Arguments
    ///
    /// * `list` - An iterator over items to include
    /// * `limit` - Maximum number of items to include in the truncated vector
    /// * `exact_count` - The exact total count of items (may be larger than limit)
    pub fn new<I: Iterator<Item = T>>(list: I, limit: usize, exact_count: usize) -> Self {
        let items = list.take(limit).collect_vec();
        Self { exact_count, items }
    }

    /// Returns the exact count of items
    pub fn exact_count(&self) -> usize {
        self.exact_count
    }

    /// Returns the truncated items
    pub fn items(&self) -> &[T] {
        &self.items
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_vec_limits_items() {
        let truncated = TruncatedVec::new(["a", "b", "c", "d"].into_iter(), 2, 4);

        assert_eq!(truncated.exact_count(), 4);
        assert_eq!(truncated.items(), &["a", "b"]);
    }

    #[test]
    fn test_truncated_vec_default_is_empty() {
        let truncated: TruncatedVec<String> = TruncatedVec::default();
        assert_eq!(truncated.exact_count(), 0);
        assert!(truncated.items().is_empty());
    }

    #[test]
    fn test_alarm_message_serialization() {
        let json = serde_json::to_string(&AlarmMessage::Tick { generation: 3 }).unwrap();
        assert_eq!(json, r#"{"Tick":{"generation":3}}"#);
        let back: AlarmMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AlarmMessage::Tick { generation: 3 });
    }
}
