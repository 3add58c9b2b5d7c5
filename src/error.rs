//! Errors raised by the game state machine
//!
//! Every variant is a local, recoverable fault. Operations that the game
//! treats permissively (adding a blank name, removing below the minimum
//! roster size) are silent no-ops and never produce one of these.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while driving a game session
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A round was started with fewer than the minimum number of players
    #[error("not enough players to start a round")]
    InsufficientPlayers,
    /// A roster position outside the current roster was referenced
    #[error("player index is out of range")]
    InvalidIndex,
    /// An explicitly chosen category is missing from the catalog
    #[error("category is not in the catalog")]
    UnknownCategory,
    /// An operation was called in a phase that does not accept it
    #[error("operation is not allowed in the current phase")]
    InvalidTransition,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::InsufficientPlayers.to_string(),
            "not enough players to start a round"
        );
        assert_eq!(Error::InvalidIndex.to_string(), "player index is out of range");
        assert_eq!(
            Error::UnknownCategory.to_string(),
            "category is not in the catalog"
        );
        assert_eq!(
            Error::InvalidTransition.to_string(),
            "operation is not allowed in the current phase"
        );
    }

    #[test]
    fn test_error_serializes_as_variant_name() {
        let json = serde_json::to_string(&Error::InvalidTransition).unwrap();
        assert_eq!(json, "\"InvalidTransition\"");
    }
}
