//! Daily play statistics.
//!
//! Counters reset at the first access on a new calendar day. The file store
//! is what the server runs with; the memory store backs tests and ephemeral
//! servers.

pub mod file;
pub mod memory;
pub mod record;
pub mod store;

pub use file::FileStatsStore;
pub use memory::MemoryStatsStore;
pub use record::{GameStats, Statistics};
pub use store::StatsStore;
