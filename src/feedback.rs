//! Feedback notifications
//!
//! This module defines the hook the game calls when something worth a sound
//! or a vibration happens. The game never waits on the sink and never
//! inspects what it did, so a sink may equally play audio, buzz the device,
//! or do nothing at all.

use serde::Serialize;

/// Events the game reports to its feedback sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Notification {
    /// A player revealed their role
    Reveal,
    /// The countdown ticked with plenty of time left
    Tick {
        /// Seconds left after the tick
        remaining: u64,
    },
    /// The countdown ticked within the low-time range
    WarningTick {
        /// Seconds left after the tick
        remaining: u64,
    },
    /// The countdown reached zero
    Expired,
    /// The vote was recorded
    RoundResolved {
        /// Whether the crew caught the imposter
        crew_won: bool,
    },
}

/// Trait for receiving fire-and-forget feedback notifications
///
/// Implementations might play a sound, trigger haptics, or log. They must not
/// panic; failures are theirs to absorb.
pub trait FeedbackSink {
    /// Handles a notification
    ///
    /// # Arguments
    ///
    /// * `notification` - The event that just happened
    fn notify(&self, notification: &Notification);
}

/// The unit sink discards every notification
impl FeedbackSink for () {
    fn notify(&self, _notification: &Notification) {}
}

impl<F: Fn(&Notification)> FeedbackSink for F {
    fn notify(&self, notification: &Notification) {
        self(notification);
    }
}
