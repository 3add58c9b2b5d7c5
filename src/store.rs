//! Score persistence
//!
//! The ledger is stored as a single JSON document mapping each player name
//! to their tally. Loading is forgiving: callers treat any failure as an
//! empty ledger.

use std::{
    cell::{Cell, RefCell},
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::leaderboard::Scores;

/// Errors that can occur while reading or writing scores
#[derive(Error, Debug)]
pub enum Error {
    /// The backing storage could not be read or written
    #[error("score storage is unavailable: {0}")]
    Io(#[from] std::io::Error),
    /// The stored document is not a valid score mapping
    #[error("score data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Load/save boundary for the score ledger
pub trait ScoreStore {
    /// Reads the stored scores
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read or holds invalid data.
    fn load(&self) -> Result<Scores, Error>;

    /// Replaces the stored scores
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn save(&self, scores: &Scores) -> Result<(), Error>;
}

/// Scores kept in a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file a save is written to before it replaces the real one
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<Scores, Error> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Scores::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, scores: &Scores) -> Result<(), Error> {
        let contents = serde_json::to_string_pretty(scores)?;
        let staging = self.staging_path();
        fs::write(&staging, contents)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

/// Scores kept in memory as a serialized document
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RefCell<Option<String>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    /// Creates a store holding the given raw document
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: RefCell::new(Some(document.into())),
            saves: Cell::new(0),
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Scores, Error> {
        match self.document.borrow().as_deref() {
            Some(document) => Ok(serde_json::from_str(document)?),
            None => Ok(Scores::default()),
        }
    }

    fn save(&self, scores: &Scores) -> Result<(), Error> {
        *self.document.borrow_mut() = Some(serde_json::to_string(scores)?);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
