//! Hall of Fame: best score per difficulty level.
//!
//! The table is persisted through a [`ScoreStore`]. Every [`Leaderboard`]
//! operation loads the table, mutates it and commits it before returning, so
//! a read-modify-write never spans two calls.

use crate::difficulty::Difficulty;
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Winner shown for a level nobody has won yet.
pub const NO_WINNER: &str = "-";

pub const SCORES_FILE_NAME: &str = "hangman_scores.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub level: Difficulty,
    pub winner: String,
    pub remaining_lives: u32,
}

impl LeaderboardEntry {
    #[must_use]
    pub fn empty(level: Difficulty) -> Self {
        Self {
            level,
            winner: NO_WINNER.to_string(),
            remaining_lives: 0,
        }
    }
}

/// The persisted table. One row per level, keyed by `level`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallOfFame {
    #[serde(rename = "HallOfFame")]
    rows: Vec<LeaderboardEntry>,
}

impl HallOfFame {
    #[must_use]
    pub fn rows(&self) -> &[LeaderboardEntry] {
        &self.rows
    }

    fn find(&self, level: Difficulty) -> Option<&LeaderboardEntry> {
        self.rows.iter().find(|row| row.level == level)
    }

    fn find_mut(&mut self, level: Difficulty) -> Option<&mut LeaderboardEntry> {
        self.rows.iter_mut().find(|row| row.level == level)
    }

    /// Insert the default row for `level` unless one exists. Returns true on insert.
    fn insert_default(&mut self, level: Difficulty) -> bool {
        if self.find(level).is_some() {
            return false;
        }
        self.rows.push(LeaderboardEntry::empty(level));
        true
    }

    fn check_primary_key(&self) -> Result<(), StoreError> {
        for (i, row) in self.rows.iter().enumerate() {
            if self.rows[..i].iter().any(|earlier| earlier.level == row.level) {
                return Err(StoreError::DuplicateLevel(row.level));
            }
        }
        Ok(())
    }
}

/// Durable home of the [`HallOfFame`] table.
pub trait ScoreStore {
    /// Read the whole table. A store that has never been written reads as empty.
    fn load(&mut self) -> Result<HallOfFame, StoreError>;

    /// Replace the stored table with `table`.
    fn commit(&mut self, table: &HallOfFame) -> Result<(), StoreError>;
}

/// JSON file store. The file is opened and closed inside each call.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<HallOfFame, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HallOfFame::default()),
            Err(e) => return Err(e.into()),
        };
        let table: HallOfFame = serde_json::from_reader(BufReader::new(file))?;
        table.check_primary_key()?;
        Ok(table)
    }

    fn commit(&mut self, table: &HallOfFame) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let temp_path = self.temp_path();
        {
            let mut writer = BufWriter::new(File::create(&temp_path)?);
            serde_json::to_writer_pretty(&mut writer, table)?;
            writer.flush()?;
        }
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    table: HallOfFame,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&mut self) -> Result<HallOfFame, StoreError> {
        Ok(self.table.clone())
    }

    fn commit(&mut self, table: &HallOfFame) -> Result<(), StoreError> {
        table.check_primary_key()?;
        self.table = table.clone();
        Ok(())
    }
}

/// Outcome of [`Leaderboard::record_result`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub updated: bool,
    /// The entry as it was before this call.
    pub previous: LeaderboardEntry,
}

pub struct Leaderboard<S: ScoreStore> {
    store: S,
}

impl<S: ScoreStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the table, let `f` mutate it, and commit if `f` reports a change.
    fn transaction<T>(
        &mut self,
        f: impl FnOnce(&mut HallOfFame) -> (T, bool),
    ) -> Result<T, StoreError> {
        let mut table = self.store.load()?;
        let (value, dirty) = f(&mut table);
        if dirty {
            self.store.commit(&table)?;
        }
        Ok(value)
    }

    /// Create the default row for every level in `levels` that has none.
    pub fn ensure_initialized(&mut self, levels: &[Difficulty]) -> Result<(), StoreError> {
        let inserted = self.transaction(|table| {
            let inserted = levels
                .iter()
                .filter(|level| table.insert_default(**level))
                .count();
            (inserted, inserted > 0)
        })?;
        log::debug!("Hall of Fame initialized, {inserted} new rows");
        Ok(())
    }

    /// Current entry for `level`; a level without a row reads as its default.
    pub fn get(&mut self, level: Difficulty) -> Result<LeaderboardEntry, StoreError> {
        self.transaction(|table| {
            let entry = table
                .find(level)
                .cloned()
                .unwrap_or_else(|| LeaderboardEntry::empty(level));
            (entry, false)
        })
    }

    /// All entries in level order.
    pub fn entries(&mut self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        self.transaction(|table| {
            let mut rows = table.rows().to_vec();
            rows.sort_by_key(|row| row.level);
            (rows, false)
        })
    }

    /// Store `winner` with `score` for `level` if `score` beats the stored
    /// remaining lives. Ties keep the existing winner.
    pub fn record_result(
        &mut self,
        level: Difficulty,
        winner: &str,
        score: u32,
    ) -> Result<RecordOutcome, StoreError> {
        let outcome = self.transaction(|table| {
            let inserted = table.insert_default(level);
            let Some(row) = table.find_mut(level) else {
                return (None, false);
            };
            let previous = row.clone();
            let updated = score > previous.remaining_lives;
            if updated {
                row.winner = winner.to_string();
                row.remaining_lives = score;
            }
            (Some(RecordOutcome { updated, previous }), updated || inserted)
        })?;

        let outcome = outcome.unwrap_or_else(|| RecordOutcome {
            updated: false,
            previous: LeaderboardEntry::empty(level),
        });
        if outcome.updated {
            log::info!("New {level} record: {winner} with {score} lives left");
        }
        Ok(outcome)
    }
}

/// Default score file: `<data dir>/hangman/hangman_scores.json`, or the
/// working directory when the platform has no data dir.
#[must_use]
pub fn default_scores_path() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from(SCORES_FILE_NAME),
        |dir| dir.join("hangman").join(SCORES_FILE_NAME),
    )
}
