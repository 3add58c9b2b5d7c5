//! Discussion countdown
//!
//! The countdown is advanced by an external tick once per second. It never
//! ends the round on its own: reaching zero only produces an advisory event.

use serde::{Deserialize, Serialize};

use crate::constants::timer::WARNING_THRESHOLD;

/// Advisory events produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimerEvent {
    /// A second passed with plenty of time left
    Tick {
        /// Seconds left after this tick
        remaining: u64,
    },
    /// Time is running low
    Warning {
        /// Seconds left after this tick
        remaining: u64,
    },
    /// The countdown just reached zero
    Expired,
}

/// Pausable whole-second countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u64,
    running: bool,
    warning_threshold: u64,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(WARNING_THRESHOLD)
    }
}

impl Countdown {
    /// Creates a stopped countdown at zero
    ///
    /// # Arguments
    ///
    /// * `warning_threshold` - Remaining seconds at or below which each tick warns
    pub fn new(warning_threshold: u64) -> Self {
        Self {
            remaining: 0,
            running: false,
            warning_threshold,
        }
    }

    /// Seconds left
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Whether the countdown is currently counting
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances the countdown by one elapsed second
    ///
    /// Does nothing while paused or at zero.
    ///
    /// # Returns
    ///
    /// The event for this tick: `Expired` at zero, `Warning` within the
    /// warning range, `Tick` above it. `None` if the countdown did not move.
    pub fn on_second_elapsed(&mut self) -> Option<TimerEvent> {
        if !self.running || self.remaining == 0 {
            self.running = false;
            return None;
        }

        self.remaining -= 1;

        if self.remaining == 0 {
            self.running = false;
            Some(TimerEvent::Expired)
        } else if self.remaining <= self.warning_threshold {
            Some(TimerEvent::Warning {
                remaining: self.remaining,
            })
        } else {
            Some(TimerEvent::Tick {
                remaining: self.remaining,
            })
        }
    }

    /// Pauses a running countdown or resumes a paused one
    ///
    /// Has no effect once the countdown has reached zero.
    pub fn toggle(&mut self) {
        if self.remaining > 0 {
            self.running = !self.running;
        }
    }

    /// Stops the countdown without changing the remaining time
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Sets a new duration
    ///
    /// A zero duration always leaves the countdown stopped.
    pub fn reset(&mut self, duration: u64, running: bool) {
        self.remaining = duration;
        self.running = running && duration > 0;
    }

    /// Remaining time formatted as `m:ss`
    pub fn clock(&self) -> String {
        format_clock(self.remaining)
    }
}

/// Formats whole seconds as `m:ss`
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
