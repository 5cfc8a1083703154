//! Daily Wordle - a word-guessing game server.
//!
//! Every player gets the same five-letter word each calendar day and six
//! guesses to find it. The server evaluates guesses over a line-delimited
//! JSON protocol and keeps shared statistics for the day, persisted to disk.

pub mod cli;
pub mod client;
pub mod clock;
pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod server;
pub mod service;
pub mod stats;
pub mod util;
pub mod words;

pub use client::{Client, Game};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use core::{
    evaluate, ActiveSession, FinishedSession, LetterResult, LetterSets, LetterStatus, Outcome,
    Word, GUESS_LIMIT, WORD_LENGTH,
};
pub use error::{Result, WordleError};
pub use protocol::{
    CallRequest, GuessRequest, GuessResponse, ServerFrame, StatisticsRequest, StatisticsResponse,
};
pub use server::Server;
pub use service::GameService;
pub use stats::{FileStatsStore, GameStats, MemoryStatsStore, Statistics, StatsStore};
pub use words::{StaticWords, WordList, WordProvider};
