//! Stats store trait.

use std::sync::Arc;

use crate::error::Result;
use crate::stats::Statistics;

/// Concurrency-safe aggregator of the day's results.
///
/// Both operations apply the day-boundary reset before doing anything else
/// and are serialized against each other, so concurrent sessions never lose
/// an update.
pub trait StatsStore: Send + Sync {
    /// Count one finished session.
    ///
    /// The in-memory counters are always updated. An `Err` means the update
    /// could not be persisted.
    fn record_result(&self, won: bool, turns_used: u32) -> Result<()>;

    /// Current statistics for today.
    fn snapshot(&self) -> Statistics;
}

impl<T: StatsStore + ?Sized> StatsStore for Arc<T> {
    fn record_result(&self, won: bool, turns_used: u32) -> Result<()> {
        (**self).record_result(won, turns_used)
    }

    fn snapshot(&self) -> Statistics {
        (**self).snapshot()
    }
}
