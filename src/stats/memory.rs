//! In-memory stats store.
//!
//! Same day-boundary rules as the file store, nothing persisted. Used in
//! tests and when running with `--ephemeral`.

use std::sync::{Arc, Mutex};

use crate::clock::Clock;
use crate::error::Result;
use crate::stats::{GameStats, Statistics, StatsStore};

/// Stats store that lives only as long as the process.
pub struct MemoryStatsStore {
    clock: Arc<dyn Clock>,
    stats: Mutex<GameStats>,
}

impl std::fmt::Debug for MemoryStatsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStatsStore").finish_non_exhaustive()
    }
}

impl MemoryStatsStore {
    /// Create an empty store for today.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let stats = GameStats::new(clock.today());
        Self {
            clock,
            stats: Mutex::new(stats),
        }
    }

    /// Copy of the raw counters, after applying any day reset.
    pub fn record(&self) -> GameStats {
        let mut stats = self.stats.lock().unwrap_or_else(|e| e.into_inner());
        stats.roll_over(self.clock.today());
        stats.clone()
    }
}

impl StatsStore for MemoryStatsStore {
    fn record_result(&self, won: bool, turns_used: u32) -> Result<()> {
        let mut stats = self.stats.lock().unwrap_or_else(|e| e.into_inner());
        stats.roll_over(self.clock.today());
        stats.record(won, turns_used);
        Ok(())
    }

    fn snapshot(&self) -> Statistics {
        let mut stats = self.stats.lock().unwrap_or_else(|e| e.into_inner());
        stats.roll_over(self.clock.today());
        stats.statistics()
    }
}
