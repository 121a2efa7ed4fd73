//! Persisted play-time mapping: game id → accumulated record.
//! The store owns the cache file path and all load/save I/O. One store per
//! process is assumed; concurrent writers from other processes end up
//! last-writer-wins (see README).

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::utils::time::minutes_played;

/// Accumulated play time for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameTimeRecord {
    /// Total seconds across completed sessions. Never negative.
    pub time_played: f64,
    /// Unix seconds of the most recent session stop.
    #[serde(default)]
    pub last_played: Option<i64>,
}

impl GameTimeRecord {
    /// Accumulated time in whole minutes, the unit most host APIs expect.
    pub fn time_played_minutes(&self) -> i64 {
        minutes_played(self.time_played)
    }
}

#[derive(Debug)]
pub struct TrackerStore {
    path: PathBuf,
    records: HashMap<String, GameTimeRecord>,
}

impl TrackerStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            records: HashMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, game_id: &str) -> Option<&GameTimeRecord> {
        self.records.get(game_id)
    }

    /// Record for `game_id`, created zeroed on first access.
    pub fn ensure_record(&mut self, game_id: &str) -> &mut GameTimeRecord {
        self.records.entry(game_id.to_string()).or_default()
    }

    pub fn records(&self) -> &HashMap<String, GameTimeRecord> {
        &self.records
    }

    /// Load the persisted mapping from the cache file.
    /// - Missing file → empty mapping, Ok (first run is not an error).
    /// - Malformed file → mapping reset to empty, Err(PersistenceRead).
    ///   Losing historical totals beats blocking plugin startup.
    pub fn load(&mut self) -> AppResult<()> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.records.clear();
                return Ok(());
            }
            Err(e) => {
                self.records.clear();
                return Err(AppError::PersistenceRead(format!(
                    "{}: {e}",
                    self.path.display()
                )));
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => {
                self.records = records;
                Ok(())
            }
            Err(e) => {
                log::warn!(
                    "play-time cache {} is corrupt, starting from an empty mapping",
                    self.path.display()
                );
                self.records.clear();
                Err(AppError::PersistenceRead(format!(
                    "{}: {e}",
                    self.path.display()
                )))
            }
        }
    }

    /// Persist the full mapping. Writes to a sibling `.tmp` file and renames
    /// it over the cache path so a crash mid-write cannot truncate the cache.
    pub fn save(&self) -> AppResult<()> {
        let json = serde_json::to_string_pretty(&self.records)
            .map_err(|e| AppError::PersistenceWrite(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)
            .map_err(|e| AppError::PersistenceWrite(format!("{}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| AppError::PersistenceWrite(format!("{}: {e}", self.path.display())))?;

        log::debug!("saved {} game records to {}", self.records.len(), self.path.display());
        Ok(())
    }
}
