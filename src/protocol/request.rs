//! Client-to-server messages.

use serde::{Deserialize, Serialize};

/// First line of every connection: which call the client is making.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum CallRequest {
    /// Start a game; guesses follow on the same connection.
    Play,
    /// One-shot statistics query.
    Statistics(StatisticsRequest),
}

/// One guess. Sent after the server answers `play` with `ready`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRequest {
    pub word: String,
}

impl GuessRequest {
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }
}

/// Statistics query. Carries no parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsRequest {}
