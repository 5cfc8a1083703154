//! Server-to-client messages.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{LetterResult, LetterStatus, TurnReport};
use crate::stats::Statistics;

/// Letter classification as sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireStatus {
    CorrectPosition,
    WrongPosition,
    NotInWord,
}

impl WireStatus {
    /// Console mark: `*` right spot, `?` wrong spot, `x` absent.
    pub fn mark(&self) -> char {
        match self {
            WireStatus::CorrectPosition => '*',
            WireStatus::WrongPosition => '?',
            WireStatus::NotInWord => 'x',
        }
    }
}

impl From<LetterStatus> for WireStatus {
    fn from(status: LetterStatus) -> Self {
        match status {
            LetterStatus::CorrectPosition => WireStatus::CorrectPosition,
            LetterStatus::WrongPosition => WireStatus::WrongPosition,
            // Evaluation never leaves a letter unresolved.
            LetterStatus::NotInWord | LetterStatus::Unresolved => WireStatus::NotInWord,
        }
    }
}

/// One position of an evaluated guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterResultMessage {
    pub letter: String,
    pub status: WireStatus,
}

impl From<&LetterResult> for LetterResultMessage {
    fn from(result: &LetterResult) -> Self {
        Self {
            letter: result.letter.to_string(),
            status: result.status.into(),
        }
    }
}

/// Answer to one guess.
///
/// `results` is empty when the guess was rejected and no turn was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    pub results: Vec<LetterResultMessage>,
    pub included_letters: Vec<String>,
    pub excluded_letters: Vec<String>,
    pub unused_letters: Vec<String>,
    pub is_correct: bool,
    pub is_game_over: bool,
}

impl GuessResponse {
    /// Whether the guess was turned away without counting.
    pub fn is_rejected(&self) -> bool {
        self.results.is_empty()
    }

    /// The `*` / `?` / `x` line for this guess.
    pub fn marks(&self) -> String {
        self.results.iter().map(|r| r.status.mark()).collect()
    }
}

fn letter_list(letters: &BTreeSet<char>) -> Vec<String> {
    letters.iter().map(char::to_string).collect()
}

impl From<&TurnReport> for GuessResponse {
    fn from(report: &TurnReport) -> Self {
        Self {
            results: report.results.iter().map(LetterResultMessage::from).collect(),
            included_letters: letter_list(report.letters.included()),
            excluded_letters: letter_list(report.letters.excluded()),
            unused_letters: letter_list(report.letters.available()),
            is_correct: report.is_correct,
            is_game_over: report.is_game_over,
        }
    }
}

/// Answer to a statistics query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub num_players: u32,
    pub winners_percentage: f64,
    pub average_guesses: f64,
    /// Winners keyed by guess count.
    #[serde(deserialize_with = "deserialize_distribution")]
    pub guess_distribution: BTreeMap<u32, u32>,
}

impl From<Statistics> for StatisticsResponse {
    fn from(stats: Statistics) -> Self {
        Self {
            num_players: stats.num_players,
            winners_percentage: stats.winners_percentage,
            average_guesses: stats.average_guesses,
            guess_distribution: stats.guess_distribution,
        }
    }
}

/// JSON object keys are strings; parse them back into guess counts.
///
/// Done by hand because a tagged frame buffers its body, and buffered keys
/// no longer convert to integers on their own.
fn deserialize_distribution<'de, D>(deserializer: D) -> Result<BTreeMap<u32, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, u32>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, count)| {
            key.parse::<u32>()
                .map(|guesses| (guesses, count))
                .map_err(|_| serde::de::Error::custom(format!("invalid guess count '{}'", key)))
        })
        .collect()
}

/// Every line the server writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum ServerFrame {
    /// Game started; send guesses.
    Ready,
    /// The call failed or the last line could not be understood.
    Error { message: String },
    /// Result of a guess.
    Guess(GuessResponse),
    /// Result of a statistics query.
    Statistics(StatisticsResponse),
}

impl ServerFrame {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
