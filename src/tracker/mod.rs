//! Per-game play-time tracking: session lifecycle, accumulation, persistence.
//!
//! A session is the interval between `start_tracking` and its matching
//! `stop_tracking` for one game. Elapsed time is measured on the monotonic
//! clock (`std::time::Instant`) so a system clock adjustment mid-session
//! cannot skew the total; wall-clock time is only recorded as the
//! "last played" stamp.

use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::errors::{AppError, AppResult};

pub mod store;

pub use store::{GameTimeRecord, TrackerStore};

/// Bookkeeping for a game whose session is currently running.
/// Exists only between a start and its matching stop; never persisted.
#[derive(Debug, Clone, Copy)]
struct ActiveSession {
    started: Instant,
}

/// Tracks accumulated play time per game and persists it to a cache file.
///
/// Own one instance at the plugin's composition root and pass it by
/// reference; there is no process-wide singleton. The cache file is assumed
/// to have a single writer per process.
pub struct PlayTimeTracker {
    store: TrackerStore,
    running: HashMap<String, ActiveSession>,
}

impl PlayTimeTracker {
    /// Create an empty tracker bound to `cache_file`. No I/O happens here;
    /// call [`load`](Self::load) to pick up previously persisted totals.
    pub fn new(cache_file: impl AsRef<Path>) -> Self {
        Self {
            store: TrackerStore::new(cache_file),
            running: HashMap::new(),
        }
    }

    /// Read the persisted mapping into memory.
    ///
    /// A missing cache file yields an empty mapping and `Ok`. A corrupt file
    /// resets the mapping to empty and surfaces `PersistenceRead`; the
    /// tracker stays usable either way.
    pub fn load(&mut self) -> AppResult<()> {
        self.store.load()
    }

    /// Begin a session for `game_id` now. See [`start_tracking_at`](Self::start_tracking_at).
    pub fn start_tracking(&mut self, game_id: &str) {
        self.start_tracking_at(game_id, Instant::now());
    }

    /// Begin a session for `game_id` at an explicit instant (e.g. a launch
    /// observed before the tracker was constructed).
    ///
    /// If a session is already running for this game its start timestamp is
    /// replaced; time since the earlier start is discarded. Only in-memory
    /// state changes, nothing is written to disk.
    pub fn start_tracking_at(&mut self, game_id: &str, started: Instant) {
        self.store.ensure_record(game_id);
        let previous = self
            .running
            .insert(game_id.to_string(), ActiveSession { started });
        if previous.is_some() {
            log::debug!("session for '{game_id}' was already running, start timestamp replaced");
        }
    }

    /// Stop the session for `game_id` now. See [`stop_tracking_at`](Self::stop_tracking_at).
    pub fn stop_tracking(&mut self, game_id: &str) -> AppResult<Duration> {
        self.stop_tracking_at(game_id, Instant::now())
    }

    /// Stop the session for `game_id` at an explicit instant, fold the
    /// elapsed duration into the accumulated total, stamp `last_played`, and
    /// persist the updated mapping.
    ///
    /// Returns the elapsed duration of the completed session. Stopping a game
    /// with no active session is a usage error (`SessionNotActive`) and
    /// leaves the accumulated total untouched.
    pub fn stop_tracking_at(&mut self, game_id: &str, stopped: Instant) -> AppResult<Duration> {
        let session = self
            .running
            .remove(game_id)
            .ok_or_else(|| AppError::SessionNotActive(game_id.to_string()))?;

        let elapsed = stopped.saturating_duration_since(session.started);

        let record = self.store.ensure_record(game_id);
        record.time_played += elapsed.as_secs_f64();
        record.last_played = Some(Utc::now().timestamp());

        log::debug!(
            "session for '{game_id}' ran {:.0}s, total now {:.0}s",
            elapsed.as_secs_f64(),
            record.time_played
        );

        self.store.save()?;
        Ok(elapsed)
    }

    /// Accumulated seconds across *completed* sessions for `game_id`.
    ///
    /// Returns `0.0` for a game never tracked. A currently running session is
    /// not included; callers wanting a live figure can check
    /// [`is_tracking`](Self::is_tracking) and add their own `now − start`.
    pub fn get_time_played(&self, game_id: &str) -> f64 {
        self.store
            .record(game_id)
            .map(|r| r.time_played)
            .unwrap_or(0.0)
    }

    /// Wall-clock time of the most recent completed session for `game_id`.
    pub fn last_played(&self, game_id: &str) -> Option<DateTime<Utc>> {
        self.store
            .record(game_id)
            .and_then(|r| r.last_played)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Whether a session is currently running for `game_id`.
    pub fn is_tracking(&self, game_id: &str) -> bool {
        self.running.contains_key(game_id)
    }

    /// The full game id → record mapping (completed sessions only).
    pub fn records(&self) -> &HashMap<String, GameTimeRecord> {
        self.store.records()
    }

    /// Persist the current mapping on demand. `stop_tracking` already saves;
    /// this exists for host shutdown hooks.
    pub fn save(&self) -> AppResult<()> {
        self.store.save()
    }
}
