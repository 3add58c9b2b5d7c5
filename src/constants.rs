//! Configuration constants for the imposter game
//!
//! This module contains the limits and defaults used throughout the game
//! to keep rosters, rounds, and timers within consistent boundaries.

/// Roster configuration constants
pub mod roster {
    /// Minimum number of players needed to start (and keep) a round
    pub const MIN_PLAYER_COUNT: usize = 3;
    /// Names of the players a fresh session starts with
    pub const DEFAULT_PLAYERS: [&str; 3] = ["Player 1", "Player 2", "Player 3"];
}

/// Countdown timer configuration constants
pub mod timer {
    /// Default discussion allowance per player, in seconds
    pub const DEFAULT_SECONDS_PER_PLAYER: u64 = 60;
    /// Minimum per-player allowance accepted by the options
    pub const MIN_SECONDS_PER_PLAYER: u64 = 10;
    /// Maximum per-player allowance accepted by the options
    pub const MAX_SECONDS_PER_PLAYER: u64 = 1200;
    /// Minimum flat round duration accepted by the options
    pub const MIN_FIXED_SECONDS: u64 = 30;
    /// Maximum flat round duration accepted by the options
    pub const MAX_FIXED_SECONDS: u64 = 3600;
    /// Remaining seconds at or below which every tick emits a warning
    pub const WARNING_THRESHOLD: u64 = 10;
    /// Largest warning threshold accepted by the options
    pub const MAX_WARNING_THRESHOLD: u64 = 60;
    /// Cadence of the countdown tick, in seconds
    pub const TICK_INTERVAL_SECONDS: u64 = 1;
}

/// Score ledger configuration constants
pub mod leaderboard {
    /// Maximum number of rows returned by the ranked score view
    pub const DISPLAY_LIMIT: usize = 50;
}
