//! Core game logic and state management
//!
//! This module contains the session object that drives one device's worth
//! of play: roster editing, role assignment, the discussion countdown, and
//! the vote that ends a round. Every change to the session goes through one
//! of the methods on [`Game`].
//!
//! The countdown is never driven by the game itself. Whenever it starts
//! running, the game asks the host to deliver an [`AlarmMessage`] one second
//! later; each delivered alarm ticks the countdown and requests the next.
//! Pausing, voting, or resetting bumps a generation counter so alarms that
//! are still in flight are ignored when they arrive.

use std::fmt::Debug;

use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::debug;

use crate::{
    AlarmMessage, TruncatedVec,
    assignment::{Assignment, Role},
    catalog::{Catalog, CategoryChoice},
    constants,
    error::Error,
    feedback::{FeedbackSink, Notification},
    leaderboard::{Leaderboard, ScoreEntry},
    random::RandomSource,
    round::RoundData,
    roster::Roster,
    store::ScoreStore,
    timer::{Countdown, TimerEvent},
};

/// Represents the current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    /// Editing the roster and picking a category
    Setup,
    /// Passing the device around so each player sees their role
    Assign,
    /// Discussion with the countdown on screen
    Playing,
    /// The vote is in and the imposter is revealed
    Result {
        /// Whether the crew caught the imposter
        crew_won: bool,
    },
}

/// How long the discussion countdown lasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub enum RoundDuration {
    /// A fixed allowance for every player in the round
    PerPlayer(
        #[garde(range(
            min = constants::timer::MIN_SECONDS_PER_PLAYER,
            max = constants::timer::MAX_SECONDS_PER_PLAYER
        ))]
        u64,
    ),
    /// The same duration regardless of player count
    Fixed(
        #[garde(range(
            min = constants::timer::MIN_FIXED_SECONDS,
            max = constants::timer::MAX_FIXED_SECONDS
        ))]
        u64,
    ),
}

impl Default for RoundDuration {
    fn default() -> Self {
        Self::PerPlayer(constants::timer::DEFAULT_SECONDS_PER_PLAYER)
    }
}

impl RoundDuration {
    /// Countdown length in seconds for a round with `player_count` players
    pub fn seconds(&self, player_count: usize) -> u64 {
        match self {
            Self::PerPlayer(seconds) => seconds.saturating_mul(player_count as u64),
            Self::Fixed(seconds) => *seconds,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct Options {
    /// Countdown length policy
    #[garde(dive)]
    duration: RoundDuration,
    /// Remaining seconds at or below which each tick sends a warning
    #[garde(range(min = 1, max = constants::timer::MAX_WARNING_THRESHOLD))]
    warning_threshold: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            duration: RoundDuration::default(),
            warning_threshold: constants::timer::WARNING_THRESHOLD,
        }
    }
}

impl Options {
    /// Creates options from their parts
    pub fn new(duration: RoundDuration, warning_threshold: u64) -> Self {
        Self {
            duration,
            warning_threshold,
        }
    }

    /// Countdown length policy
    pub fn duration(&self) -> RoundDuration {
        self.duration
    }

    /// Warning range upper bound, in seconds
    pub fn warning_threshold(&self) -> u64 {
        self.warning_threshold
    }
}

/// Messages sent to the presentation layer to render the current phase
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub enum SyncMessage {
    /// Roster editing screen
    Setup {
        /// Players in roster order
        players: Vec<String>,
        /// Currently selected category
        category: CategoryChoice,
        /// Every category in the catalog
        categories: Vec<String>,
        /// Whether the roster is large enough to start
        can_start: bool,
        /// Ranked tallies of the current roster
        scores: TruncatedVec<(String, ScoreEntry)>,
    },
    /// Role assignment screen
    Assign {
        /// Position of the player holding the device
        index: usize,
        /// Number of players in the round
        count: usize,
        /// Name of the player holding the device
        player: String,
        /// The player's role, present only while revealed
        role: Option<Role>,
    },
    /// Discussion screen
    Playing {
        /// Seconds left
        remaining: u64,
        /// Seconds left formatted as `m:ss`
        clock: String,
        /// Whether the countdown is running
        running: bool,
        /// Name of the player who opens the discussion
        first_player: String,
    },
    /// Result screen
    Result {
        /// Whether the crew caught the imposter
        crew_won: bool,
        /// Name of the imposter
        imposter: String,
        /// Category of the round
        category: String,
        /// The secret word
        word: String,
        /// Ranked tallies of the current roster
        scores: TruncatedVec<(String, ScoreEntry)>,
    },
}

impl SyncMessage {
    /// Converts the sync message to a JSON string for the presentation layer
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// One device's game session
///
/// The roster is frozen from the moment a round starts until the session
/// returns to [`State::Setup`].
#[derive(Serialize, Deserialize)]
pub struct Game {
    /// Session configuration
    options: Options,
    /// Categories and words to draw from
    catalog: Catalog,
    /// Players in turn order
    roster: Roster,
    /// Category used by the next round
    category: CategoryChoice,
    /// Win tallies across rounds
    leaderboard: Leaderboard,
    /// Current phase
    state: State,
    /// The round in progress, if any
    round: Option<RoundData>,
    /// Progress of the role reveal
    assignment: Assignment,
    /// Discussion countdown
    countdown: Countdown,
    /// Identifies the live chain of countdown alarms
    generation: u64,
}

impl Debug for Game {
    /// Custom debug implementation that leaves out the catalog and ledger
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("roster", &self.roster)
            .field("round", &self.round)
            .finish_non_exhaustive()
    }
}

// Convenience methods
impl Game {
    /// Fails unless the game is in `expected`
    fn require(&self, expected: State) -> Result<(), Error> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::InvalidTransition)
        }
    }

    /// Sets the current phase
    fn set_state(&mut self, state: State) {
        debug!(from = ?self.state, to = ?state, "game phase changed");
        self.state = state;
    }

    /// Invalidates any alarm that is still in flight
    fn cancel_alarms(&mut self) {
        self.generation += 1;
    }

    /// Asks the host to tick the countdown one interval from now
    fn schedule_tick<S: FnMut(AlarmMessage, web_time::Duration)>(
        &self,
        schedule_message: &mut S,
    ) {
        schedule_message(
            AlarmMessage::Tick {
                generation: self.generation,
            },
            web_time::Duration::from_secs(constants::timer::TICK_INTERVAL_SECONDS),
        );
    }
}

impl Game {
    /// Creates a new session in the setup phase with the default roster
    ///
    /// # Arguments
    ///
    /// * `options` - Session configuration
    /// * `catalog` - Categories and words to draw from
    /// * `leaderboard` - Previously stored tallies, usually from [`Leaderboard::load`]
    ///
    /// # Examples
    ///
    /// ```rust
    /// use imposter::{catalog::Catalog, game::{Game, Options, State}, leaderboard::Leaderboard};
    ///
    /// let game = Game::new(Options::default(), Catalog::default(), Leaderboard::default());
    /// assert_eq!(game.state(), State::Setup);
    /// assert_eq!(game.roster().len(), 3);
    /// ```
    pub fn new(options: Options, catalog: Catalog, leaderboard: Leaderboard) -> Self {
        Self {
            options,
            countdown: Countdown::new(options.warning_threshold),
            catalog,
            roster: Roster::default(),
            category: CategoryChoice::default(),
            leaderboard,
            state: State::Setup,
            round: None,
            assignment: Assignment::default(),
            generation: 0,
        }
    }

    /// Current phase
    pub fn state(&self) -> State {
        self.state
    }

    /// Win tallies across rounds
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Session configuration
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The catalog rounds draw from
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current roster
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Category used by the next round
    pub fn category(&self) -> &CategoryChoice {
        &self.category
    }

    /// The round in progress, if any
    pub fn round(&self) -> Option<&RoundData> {
        self.round.as_ref()
    }

    /// Progress of the role reveal
    pub fn assignment(&self) -> Assignment {
        self.assignment
    }

    /// Discussion countdown
    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    /// Adds a player to the roster
    ///
    /// Blank names are ignored. A tally is created for new names.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidTransition` - the game is not in setup
    pub fn add_player<S: ScoreStore>(&mut self, name: &str, store: &S) -> Result<(), Error> {
        self.require(State::Setup)?;
        if let Some(name) = self.roster.add(name).map(str::to_owned) {
            debug!(name = %name, players = self.roster.len(), "player added");
            self.leaderboard.ensure(&name, store);
        }
        Ok(())
    }

    /// Removes the player at `index`
    ///
    /// Ignored when the roster is already at its minimum size.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidTransition` - the game is not in setup
    /// * `Error::InvalidIndex` - `index` is outside the roster
    pub fn remove_player(&mut self, index: usize) -> Result<(), Error> {
        self.require(State::Setup)?;
        if let Some(name) = self.roster.remove(index)? {
            debug!(name = %name, players = self.roster.len(), "player removed");
        }
        Ok(())
    }

    /// Chooses the category for the next round
    ///
    /// # Errors
    ///
    /// * `Error::InvalidTransition` - the game is not in setup
    /// * `Error::UnknownCategory` - the category is not in the catalog
    pub fn select_category(&mut self, choice: CategoryChoice) -> Result<(), Error> {
        self.require(State::Setup)?;
        if !self.catalog.accepts(&choice) {
            return Err(Error::UnknownCategory);
        }
        self.category = choice;
        Ok(())
    }

    /// Draws a new round and starts the role reveal
    ///
    /// Allowed from setup and from the result screen.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidTransition` - a round is already in progress
    /// * `Error::InsufficientPlayers` - fewer than the minimum players
    /// * `Error::UnknownCategory` - the selected category is not in the catalog
    pub fn start_round<R: RandomSource>(&mut self, rng: &mut R) -> Result<(), Error> {
        if !matches!(self.state, State::Setup | State::Result { .. }) {
            return Err(Error::InvalidTransition);
        }

        let round = RoundData::generate(&self.roster, &self.category, &self.catalog, rng)?;
        debug!(
            category = round.category(),
            players = self.roster.len(),
            "round started"
        );

        self.cancel_alarms();
        self.countdown.reset(0, false);
        self.round = Some(round);
        self.assignment = Assignment::default();
        self.set_state(State::Assign);
        Ok(())
    }

    /// Starts another round with the same roster from the result screen
    ///
    /// # Errors
    ///
    /// * `Error::InvalidTransition` - the game is not showing a result
    /// * `Error::UnknownCategory` - the selected category is not in the catalog
    pub fn play_again<R: RandomSource>(&mut self, rng: &mut R) -> Result<(), Error> {
        if !matches!(self.state, State::Result { .. }) {
            return Err(Error::InvalidTransition);
        }
        self.start_round(rng)
    }

    /// Shows the current player's role
    ///
    /// # Errors
    ///
    /// * `Error::InvalidTransition` - not assigning roles, or the role is
    ///   already shown
    pub fn reveal<B: FeedbackSink>(&mut self, feedback: &B) -> Result<(), Error> {
        self.require(State::Assign)?;
        self.assignment.reveal()?;
        feedback.notify(&Notification::Reveal);
        Ok(())
    }

    /// Hides the current role and passes the device on
    ///
    /// After the last player the discussion begins and the countdown starts.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidTransition` - not assigning roles, or the current
    ///   role has not been revealed
    pub fn advance<S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        mut schedule_message: S,
    ) -> Result<(), Error> {
        self.require(State::Assign)?;
        self.assignment.advance(self.roster.len())?;

        if self.assignment.is_complete() {
            let duration = self.options.duration.seconds(self.roster.len());
            self.cancel_alarms();
            self.countdown.reset(duration, true);
            self.set_state(State::Playing);
            if self.countdown.is_running() {
                self.schedule_tick(&mut schedule_message);
            }
        }
        Ok(())
    }

    /// Pauses or resumes the countdown
    ///
    /// # Errors
    ///
    /// * `Error::InvalidTransition` - the discussion is not in progress
    pub fn toggle_timer<S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        mut schedule_message: S,
    ) -> Result<(), Error> {
        self.require(State::Playing)?;
        self.countdown.toggle();
        self.cancel_alarms();
        if self.countdown.is_running() {
            self.schedule_tick(&mut schedule_message);
        }
        Ok(())
    }

    /// Advances the countdown by one second
    ///
    /// Does nothing outside the discussion or while paused.
    ///
    /// # Returns
    ///
    /// The advisory event produced by the tick, if any
    pub fn tick<B: FeedbackSink>(&mut self, feedback: &B) -> Option<TimerEvent> {
        if self.state != State::Playing {
            return None;
        }

        let event = self.countdown.on_second_elapsed()?;
        match event {
            TimerEvent::Tick { remaining } => {
                feedback.notify(&Notification::Tick { remaining });
            }
            TimerEvent::Warning { remaining } => {
                feedback.notify(&Notification::WarningTick { remaining });
            }
            TimerEvent::Expired => {
                debug!("countdown expired");
                feedback.notify(&Notification::Expired);
            }
        }
        Some(event)
    }

    /// Handles an alarm previously requested through `schedule_message`
    ///
    /// Alarms from a countdown that has since been paused, resolved, or reset
    /// are ignored.
    pub fn receive_alarm<S: FnMut(AlarmMessage, web_time::Duration), B: FeedbackSink>(
        &mut self,
        message: AlarmMessage,
        mut schedule_message: S,
        feedback: &B,
    ) {
        match message {
            AlarmMessage::Tick { generation } => {
                if generation != self.generation
                    || self.state != State::Playing
                    || !self.countdown.is_running()
                {
                    return;
                }
                self.tick(feedback);
                if self.countdown.is_running() {
                    self.schedule_tick(&mut schedule_message);
                }
            }
        }
    }

    /// Records the vote and reveals the imposter
    ///
    /// # Arguments
    ///
    /// * `crew_won` - Whether the crew caught the imposter
    /// * `store` - Where the updated tallies are saved
    /// * `feedback` - Receives the resolution notification
    ///
    /// # Errors
    ///
    /// * `Error::InvalidTransition` - the discussion is not in progress
    pub fn vote<S: ScoreStore, B: FeedbackSink>(
        &mut self,
        crew_won: bool,
        store: &S,
        feedback: &B,
    ) -> Result<(), Error> {
        self.require(State::Playing)?;
        let round = self.round.as_ref().ok_or(Error::InvalidTransition)?;
        self.leaderboard
            .resolve_round(&self.roster, round, crew_won, store);

        self.cancel_alarms();
        self.countdown.stop();
        self.set_state(State::Result { crew_won });
        feedback.notify(&Notification::RoundResolved { crew_won });
        Ok(())
    }

    /// Abandons whatever is in progress and returns to setup
    ///
    /// The roster, category choice, and tallies are kept.
    pub fn reset(&mut self) {
        self.cancel_alarms();
        self.countdown.reset(0, false);
        self.round = None;
        self.assignment = Assignment::default();
        self.set_state(State::Setup);
    }

    /// Forgets every tally and saves the empty ledger
    pub fn clear_scores<S: ScoreStore>(&mut self, store: &S) {
        self.leaderboard.clear_all(store);
    }

    /// Roster players ranked by total wins
    pub fn ranked_scores(&self) -> TruncatedVec<(String, ScoreEntry)> {
        self.leaderboard.ranked(&self.roster)
    }

    /// Returns the message needed to render the current phase
    pub fn state_message(&self) -> SyncMessage {
        let round = self.round.as_ref();
        match (self.state, round) {
            (State::Assign, Some(round)) => {
                let index = self.assignment.index().unwrap_or(self.roster.len());
                SyncMessage::Assign {
                    index,
                    count: self.roster.len(),
                    player: self.roster.get(index).unwrap_or_default().to_owned(),
                    role: self.assignment.role(round),
                }
            }
            (State::Playing, Some(round)) => SyncMessage::Playing {
                remaining: self.countdown.remaining(),
                clock: self.countdown.clock(),
                running: self.countdown.is_running(),
                first_player: round
                    .first_player_name(&self.roster)
                    .unwrap_or_default()
                    .to_owned(),
            },
            (State::Result { crew_won }, Some(round)) => SyncMessage::Result {
                crew_won,
                imposter: round
                    .imposter_name(&self.roster)
                    .unwrap_or_default()
                    .to_owned(),
                category: round.category().to_owned(),
                word: round.word().to_owned(),
                scores: self.ranked_scores(),
            },
            _ => SyncMessage::Setup {
                players: self.roster.names().to_vec(),
                category: self.category.clone(),
                categories: self
                    .catalog
                    .names()
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
                can_start: self.roster.is_playable(),
                scores: self.ranked_scores(),
            },
        }
    }
}
