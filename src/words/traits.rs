//! Word provider trait.

use std::sync::Arc;

use crate::core::Word;
use crate::error::Result;

/// Supplies the secret word and decides which guesses are playable.
pub trait WordProvider: Send + Sync {
    /// The word for today. Same value for every caller on a given date.
    ///
    /// Returns `WordProviderUnavailable` if no word can be produced.
    fn word_of_the_day(&self) -> Result<Word>;

    /// Case-insensitive membership test against the allowed words.
    fn is_playable(&self, token: &str) -> bool;
}

impl<T: WordProvider + ?Sized> WordProvider for Arc<T> {
    fn word_of_the_day(&self) -> Result<Word> {
        (**self).word_of_the_day()
    }

    fn is_playable(&self, token: &str) -> bool {
        (**self).is_playable(token)
    }
}
