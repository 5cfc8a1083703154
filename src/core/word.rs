//! Validated five-letter words.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WordleError};

/// Number of letters in every playable word.
pub const WORD_LENGTH: usize = 5;

/// A lowercase, five-letter ASCII word.
///
/// Construction is the only place guess format is checked; everything
/// downstream can index positions without bounds concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word([char; WORD_LENGTH]);

impl Word {
    /// Parse a word, normalizing to lowercase.
    ///
    /// Surrounding whitespace is ignored. Anything other than exactly five
    /// ASCII letters is an `InvalidGuessFormat` error.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let mut letters = ['a'; WORD_LENGTH];
        let mut count = 0;

        for c in trimmed.chars() {
            if count == WORD_LENGTH || !c.is_ascii_alphabetic() {
                return Err(WordleError::invalid_guess_format(text));
            }
            letters[count] = c.to_ascii_lowercase();
            count += 1;
        }

        if count != WORD_LENGTH {
            return Err(WordleError::invalid_guess_format(text));
        }

        Ok(Self(letters))
    }

    /// The letters in position order.
    pub fn letters(&self) -> &[char; WORD_LENGTH] {
        &self.0
    }

    /// Check whether the word contains a letter anywhere.
    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(&letter)
    }

    /// Count occurrences of a letter.
    pub fn count(&self, letter: char) -> usize {
        self.0.iter().filter(|&&c| c == letter).count()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0 {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Word {
    type Err = WordleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Word {
    type Error = WordleError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercases() {
        let word = Word::parse("CrAnE").unwrap();
        assert_eq!(word.to_string(), "crane");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let word = Word::parse("  slate\n").unwrap();
        assert_eq!(word.to_string(), "slate");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(
            Word::parse("four"),
            Err(WordleError::InvalidGuessFormat { .. })
        ));
        assert!(matches!(
            Word::parse("sixsix"),
            Err(WordleError::InvalidGuessFormat { .. })
        ));
        assert!(Word::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_letters() {
        assert!(Word::parse("sh0rt").is_err());
        assert!(Word::parse("ab de").is_err());
        assert!(Word::parse("caf\u{e9}s").is_err());
    }

    #[test]
    fn test_contains_and_count() {
        let word = Word::parse("level").unwrap();
        assert!(word.contains('v'));
        assert!(!word.contains('z'));
        assert_eq!(word.count('l'), 2);
        assert_eq!(word.count('e'), 2);
        assert_eq!(word.count('v'), 1);
    }

    #[test]
    fn test_serde_as_string() {
        let word = Word::parse("crane").unwrap();
        assert_eq!(serde_json::to_string(&word).unwrap(), "\"crane\"");

        let parsed: Word = serde_json::from_str("\"SLATE\"").unwrap();
        assert_eq!(parsed.to_string(), "slate");

        assert!(serde_json::from_str::<Word>("\"nope\"").is_err());
    }
}
