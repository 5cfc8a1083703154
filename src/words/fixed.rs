//! Fixed-word provider for tests and demos.

use std::collections::HashSet;

use crate::core::Word;
use crate::error::{Result, WordleError};
use crate::words::WordProvider;

/// Provider with a pinned secret and an explicit set of playable words.
///
/// The secret is always playable. `StaticWords::unavailable()` models a
/// provider that cannot produce a word.
#[derive(Debug, Clone)]
pub struct StaticWords {
    secret: Option<Word>,
    playable: HashSet<Word>,
}

impl StaticWords {
    /// Create a provider whose secret is `secret` and whose other playable
    /// words are `playable`. Malformed entries are ignored.
    pub fn new<'a>(secret: Word, playable: impl IntoIterator<Item = &'a str>) -> Self {
        let mut words: HashSet<Word> = playable
            .into_iter()
            .filter_map(|w| Word::parse(w).ok())
            .collect();
        words.insert(secret);
        Self {
            secret: Some(secret),
            playable: words,
        }
    }

    /// A provider that has no word to give.
    pub fn unavailable() -> Self {
        Self {
            secret: None,
            playable: HashSet::new(),
        }
    }
}

impl WordProvider for StaticWords {
    fn word_of_the_day(&self) -> Result<Word> {
        self.secret
            .ok_or_else(|| WordleError::word_provider_unavailable("no word configured"))
    }

    fn is_playable(&self, token: &str) -> bool {
        Word::parse(token)
            .map(|w| self.playable.contains(&w))
            .unwrap_or(false)
    }
}
