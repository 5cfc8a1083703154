//! Unified error types for the daily word game.
//!
//! Gameplay-critical failures (no word of the day) abort a session.
//! Statistics failures never do: they are logged and the caller carries on
//! with whatever it has in memory.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for game operations.
#[derive(Error, Debug)]
pub enum WordleError {
    /// Guess is not exactly five ASCII letters.
    #[error("invalid guess format: {guess:?} (expected 5 letters)")]
    InvalidGuessFormat { guess: String },

    /// Guess is well-formed but not in the word list.
    #[error("unplayable word: {word}")]
    UnplayableWord { word: String },

    /// No word of the day could be produced.
    #[error("word provider unavailable: {message}")]
    WordProviderUnavailable { message: String },

    /// The durable stats record could not be read or written.
    #[error("stats persistence error at {path}: {source}")]
    StatsPersistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON serialization or parsing errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// Malformed or out-of-sequence protocol frames.
    #[error("protocol error: {message}")]
    Protocol { message: String },

    /// Socket-level failures.
    #[error("transport error: {source}")]
    Transport {
        #[source]
        source: io::Error,
    },
}

/// A specialized Result type for game operations.
pub type Result<T> = std::result::Result<T, WordleError>;

impl WordleError {
    /// Create an invalid guess format error.
    pub fn invalid_guess_format(guess: impl Into<String>) -> Self {
        Self::InvalidGuessFormat {
            guess: guess.into(),
        }
    }

    /// Create an unplayable word error.
    pub fn unplayable_word(word: impl Into<String>) -> Self {
        Self::UnplayableWord { word: word.into() }
    }

    /// Create a word provider unavailable error.
    pub fn word_provider_unavailable(message: impl Into<String>) -> Self {
        Self::WordProviderUnavailable {
            message: message.into(),
        }
    }

    /// Create a stats persistence error from an I/O error.
    pub fn stats_persistence(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StatsPersistence {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Whether the error must stop a session from starting or continuing.
    ///
    /// Only a missing word of the day and a dead connection are fatal;
    /// everything else is either a rejected guess or degraded telemetry.
    pub fn is_fatal_to_session(&self) -> bool {
        matches!(
            self,
            Self::WordProviderUnavailable { .. } | Self::Transport { .. }
        )
    }
}

impl From<io::Error> for WordleError {
    fn from(err: io::Error) -> Self {
        Self::Transport { source: err }
    }
}

impl From<serde_json::Error> for WordleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Log-and-continue handling for best-effort operations.
pub trait BestEffort<T> {
    /// Log a warning on error and return the default value.
    fn best_effort_default(self, context: &str) -> T
    where
        T: Default;

    /// Log a warning on error and return the provided fallback.
    fn best_effort_with(self, context: &str, fallback: T) -> T;
}

impl<T> BestEffort<T> for Result<T> {
    fn best_effort_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (continuing with default)", context, err);
                T::default()
            }
        }
    }

    fn best_effort_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (continuing with fallback)", context, err);
                fallback
            }
        }
    }
}

/// Process exit codes for the `wordle` binary.
pub mod exit_codes {
    /// Command completed.
    pub const SUCCESS: i32 = 0;

    /// Command failed (bad config, unreachable server, bind failure).
    pub const ERROR: i32 = 1;

    /// Process panicked.
    pub const CRASH: i32 = 3;
}
