//! JSON word-list provider.
//!
//! The list is a JSON array of strings. Entries are lowercased and anything
//! that is not five ASCII letters is dropped. The daily word is picked
//! deterministically from the calendar date and memoized for the day.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, RwLock};

use chrono::{Datelike, NaiveDate};

use crate::clock::Clock;
use crate::core::Word;
use crate::error::{Result, WordleError};
use crate::util::read_to_string_limited;
use crate::words::WordProvider;

/// Word list compiled into the binary, used when no list path is configured.
pub const EMBEDDED_WORDS: &str = include_str!("../../data/words.json");

/// Multiplier spreading consecutive day numbers across the list.
const DAY_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Word-list backed provider with a per-day cache.
pub struct WordList {
    /// Playable words in list order (duplicates removed).
    words: Vec<Word>,
    lookup: HashSet<Word>,
    clock: Arc<dyn Clock>,
    /// Memoized (date, word) for the most recent day asked.
    daily: RwLock<Option<(NaiveDate, Word)>>,
}

impl fmt::Debug for WordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordList")
            .field("words", &self.words.len())
            .finish()
    }
}

impl WordList {
    /// Build from the embedded word list.
    pub fn embedded(clock: Arc<dyn Clock>) -> Result<Self> {
        Self::from_json(EMBEDDED_WORDS, clock)
    }

    /// Load from `path` when given, else the embedded list.
    pub fn load(path: Option<&Path>, clock: Arc<dyn Clock>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path, clock),
            None => Self::embedded(clock),
        }
    }

    /// Load a JSON word list from disk.
    pub fn from_path(path: &Path, clock: Arc<dyn Clock>) -> Result<Self> {
        let content = read_to_string_limited(path).map_err(|e| {
            WordleError::word_provider_unavailable(format!(
                "failed to read word list {}: {}",
                path.display(),
                e
            ))
        })?;
        let list = Self::from_json(&content, clock)?;
        tracing::info!("Loaded {} words from {}", list.len(), path.display());
        Ok(list)
    }

    /// Parse a JSON array of words.
    pub fn from_json(json: &str, clock: Arc<dyn Clock>) -> Result<Self> {
        let raw: Vec<String> = serde_json::from_str(json).map_err(|e| {
            WordleError::word_provider_unavailable(format!("malformed word list: {}", e))
        })?;
        Ok(Self::from_words(raw.iter().map(String::as_str), clock))
    }

    /// Build from an iterator of words.
    pub fn from_words<'a>(
        words: impl IntoIterator<Item = &'a str>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut ordered = Vec::new();
        let mut lookup = HashSet::new();
        let mut dropped = 0usize;

        for raw in words {
            match Word::parse(raw) {
                Ok(word) => {
                    if lookup.insert(word) {
                        ordered.push(word);
                    }
                }
                Err(_) => dropped += 1,
            }
        }

        if dropped > 0 {
            tracing::warn!("Dropped {} word list entries that are not 5 letters", dropped);
        }

        Self {
            words: ordered,
            lookup,
            clock,
            daily: RwLock::new(None),
        }
    }

    /// Number of playable words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list has no playable words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The word selected for a given date. Uncached.
    pub fn word_for_date(&self, date: NaiveDate) -> Result<Word> {
        if self.words.is_empty() {
            return Err(WordleError::word_provider_unavailable("word list is empty"));
        }

        let day = u64::from(date.num_days_from_ce().unsigned_abs());
        let index = (day.wrapping_mul(DAY_MIX) >> 32) % self.words.len() as u64;
        Ok(self.words[index as usize])
    }
}

impl WordProvider for WordList {
    fn word_of_the_day(&self) -> Result<Word> {
        let today = self.clock.today();

        if let Some((date, word)) = *self.daily.read().unwrap_or_else(|e| e.into_inner()) {
            if date == today {
                return Ok(word);
            }
        }

        let word = self.word_for_date(today)?;
        *self.daily.write().unwrap_or_else(|e| e.into_inner()) = Some((today, word));
        tracing::debug!("Word of the day selected for {}", today);
        Ok(word)
    }

    fn is_playable(&self, token: &str) -> bool {
        Word::parse(token)
            .map(|w| self.lookup.contains(&w))
            .unwrap_or(false)
    }
}
