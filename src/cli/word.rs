//! Word command.
//!
//! Prints the word the configured list selects for a date, so an operator
//! can check what players will see without starting a server.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::words::WordList;

/// Options for the word command.
#[derive(Debug, Clone, Default)]
pub struct WordOptions {
    /// Date to look up. Defaults to today.
    pub date: Option<NaiveDate>,
    /// Output as JSON.
    pub json: bool,
}

/// Output format for the word command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordOutput {
    pub success: bool,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    /// Playable words in the list.
    pub list_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The word command implementation.
pub struct WordCommand {
    config: Config,
    clock: Arc<dyn Clock>,
}

impl WordCommand {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use a different clock (tests).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run the word command.
    pub fn run(&self, options: &WordOptions) -> WordOutput {
        let date = options.date.unwrap_or_else(|| self.clock.today());

        let list = match WordList::load(self.config.words.list_path.as_deref(), self.clock.clone())
        {
            Ok(list) => list,
            Err(e) => {
                return WordOutput {
                    success: false,
                    date,
                    word: None,
                    list_size: 0,
                    error: Some(e.to_string()),
                }
            }
        };

        match list.word_for_date(date) {
            Ok(word) => WordOutput {
                success: true,
                date,
                word: Some(word.to_string()),
                list_size: list.len(),
                error: None,
            },
            Err(e) => WordOutput {
                success: false,
                date,
                word: None,
                list_size: list.len(),
                error: Some(e.to_string()),
            },
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &WordOutput, options: &WordOptions) -> String {
        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        match &output.word {
            Some(word) if output.success => format!(
                "{}: {} (from {} words)\n",
                output.date, word, output.list_size
            ),
            _ => format!(
                "Word lookup failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}
