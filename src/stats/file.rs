//! File-backed stats store.
//!
//! The record lives in one JSON file that is rewritten whole (temp file +
//! rename) after every mutation. A cached copy is kept in memory and loaded
//! from disk on first access, so snapshots don't touch the filesystem.
//!
//! A record that exists but cannot be read is never overwritten. Updates are
//! held in memory and the load is retried on every access; once it succeeds
//! the held counts are merged into the record from disk.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::clock::Clock;
use crate::error::{BestEffort, Result, WordleError};
use crate::stats::{GameStats, Statistics, StatsStore};
use crate::util::{read_to_string_limited, write_atomic};

/// In-memory copy of the record.
struct Cached {
    stats: GameStats,
    /// False while the file on disk could not be read.
    synced: bool,
}

/// Stats store persisted to a JSON file.
pub struct FileStatsStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    /// `None` until the first access.
    cached: Mutex<Option<Cached>>,
}

impl std::fmt::Debug for FileStatsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStatsStore")
            .field("path", &self.path)
            .finish()
    }
}

impl FileStatsStore {
    /// Create a store for `path`. Nothing is read until first use.
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
            cached: Mutex::new(None),
        }
    }

    /// Path of the durable record.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record from disk. `Ok(None)` if there is no file yet.
    pub fn load(&self) -> Result<Option<GameStats>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = read_to_string_limited(&self.path)
            .map_err(|e| WordleError::stats_persistence(&self.path, e))?;
        let stats: GameStats = serde_json::from_str(&content)
            .map_err(|e| WordleError::serde(format!("Failed to parse stats record: {}", e)))?;

        Ok(Some(stats))
    }

    /// Overwrite the record on disk.
    pub fn save(&self, stats: &GameStats) -> Result<()> {
        let json = serde_json::to_string_pretty(stats)?;
        write_atomic(&self.path, json.as_bytes())
            .map_err(|e| WordleError::stats_persistence(&self.path, e))
    }

    fn lock(&self) -> MutexGuard<'_, Option<Cached>> {
        // A panic mid-update leaves the cached record intact; keep serving it.
        self.cached.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The record to start from when the cache is not synced.
    ///
    /// A missing file or one that does not parse starts a fresh record. Read
    /// failures are returned so the caller keeps the file untouched.
    fn load_or_fresh(&self, today: chrono::NaiveDate) -> Result<GameStats> {
        match self.load() {
            Ok(Some(stats)) => Ok(stats),
            Ok(None) => Ok(GameStats::new(today)),
            Err(e @ WordleError::Serde { .. }) => {
                tracing::warn!("{} (starting a fresh record)", e);
                Ok(GameStats::new(today))
            }
            Err(e) => Err(e),
        }
    }

    /// Bring the cached record up to date for today.
    ///
    /// Must be called with the lock held. Loads (or retries the load) until
    /// the file has been read, then applies the day-boundary reset and
    /// persists it.
    fn current<'a>(&self, slot: &'a mut Option<Cached>) -> &'a mut Cached {
        let today = self.clock.today();
        let synced = slot.as_ref().map(|c| c.synced).unwrap_or(false);

        if !synced {
            match self.load_or_fresh(today) {
                Ok(mut stats) => {
                    stats.roll_over(today);
                    let merged = match slot.take() {
                        Some(mut pending) => {
                            pending.stats.roll_over(today);
                            stats.absorb(&pending.stats)
                        }
                        None => false,
                    };
                    if merged {
                        tracing::info!("Statistics record readable again, merged held updates");
                        self.save(&stats)
                            .best_effort_default("Failed to persist merged statistics");
                    }
                    *slot = Some(Cached { stats, synced: true });
                }
                Err(e) => {
                    tracing::warn!("Failed to load game statistics: {} (holding updates in memory)", e);
                    if slot.is_none() {
                        *slot = Some(Cached {
                            stats: GameStats::new(today),
                            synced: false,
                        });
                    }
                }
            }
        }

        let cached = slot.get_or_insert_with(|| Cached {
            stats: GameStats::new(today),
            synced: false,
        });

        if cached.stats.roll_over(today) && cached.synced {
            self.save(&cached.stats)
                .best_effort_default("Failed to persist statistics reset");
        }

        cached
    }
}

impl StatsStore for FileStatsStore {
    fn record_result(&self, won: bool, turns_used: u32) -> Result<()> {
        let mut guard = self.lock();
        let cached = self.current(&mut guard);

        cached.stats.record(won, turns_used);
        if !cached.synced {
            return Err(WordleError::stats_persistence(
                &self.path,
                io::Error::other("existing record unreadable, update held in memory"),
            ));
        }

        let saved = self.save(&cached.stats);
        match &saved {
            Ok(()) => tracing::debug!(
                "Saved statistics to {} ({} players)",
                self.path.display(),
                cached.stats.total_players
            ),
            Err(e) => tracing::warn!("Failed to save statistics: {}", e),
        }
        saved
    }

    fn snapshot(&self) -> Statistics {
        let mut guard = self.lock();
        self.current(&mut guard).stats.statistics()
    }
}
