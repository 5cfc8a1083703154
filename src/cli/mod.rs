//! CLI commands for the `wordle` binary.
//!
//! - **Server**: serve
//! - **Player**: play, stats
//! - **Operator**: word

pub mod play;
pub mod serve;
pub mod stats;
pub mod word;

pub use play::{PlayCommand, PlaySummary};
pub use serve::{ServeCommand, ServeOptions};
pub use stats::{format_statistics, StatsCommand, StatsOptions, StatsOutput};
pub use word::{WordCommand, WordOptions, WordOutput};
