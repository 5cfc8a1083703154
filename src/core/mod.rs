//! Core game logic.
//!
//! Word validation, guess evaluation, letter bookkeeping and the per-player
//! session state machine. Nothing here does I/O.

pub mod evaluate;
pub mod session;
pub mod state;
pub mod word;

pub use evaluate::{evaluate, LetterResult, LetterStatus};
pub use session::{
    ActiveSession, FinishedSession, Outcome, Rejection, Turn, TurnReport, GUESS_LIMIT,
};
pub use state::LetterSets;
pub use word::{Word, WORD_LENGTH};
