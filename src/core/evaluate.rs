//! Guess evaluation.
//!
//! Classifies each letter of a guess against the secret word using the
//! standard duplicate-aware two-pass rule: exact matches are credited first,
//! then misplaced letters draw from whatever count of that letter remains.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::state::LetterSets;
use crate::core::word::{Word, WORD_LENGTH};

/// Classification of one guessed letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterStatus {
    /// Right letter, right position.
    CorrectPosition,
    /// Letter is in the word at another position.
    WrongPosition,
    /// No remaining occurrence of the letter to credit.
    NotInWord,
    /// Not yet classified. Only exists between the two passes.
    Unresolved,
}

impl LetterStatus {
    /// Whether this status has been decided.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, LetterStatus::Unresolved)
    }

    /// Whether the letter was credited as present in the secret.
    pub fn is_present(&self) -> bool {
        matches!(
            self,
            LetterStatus::CorrectPosition | LetterStatus::WrongPosition
        )
    }
}

/// One position of an evaluated guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterResult {
    pub letter: char,
    pub status: LetterStatus,
}

impl LetterResult {
    fn new(letter: char, status: LetterStatus) -> Self {
        Self { letter, status }
    }
}

/// Evaluate `guess` against `secret`, folding what was learned into `sets`.
///
/// Every guessed letter leaves `available`. Credited letters join
/// `included`; a letter joins `excluded` only when the secret has no
/// occurrence of it at all, so surplus copies of a present letter are
/// reported as `NotInWord` without being excluded.
pub fn evaluate(
    secret: &Word,
    guess: &Word,
    sets: &mut LetterSets,
) -> [LetterResult; WORD_LENGTH] {
    let guessed = guess.letters();

    if guess == secret {
        return guessed.map(|letter| {
            sets.mark_used(letter);
            sets.include(letter);
            LetterResult::new(letter, LetterStatus::CorrectPosition)
        });
    }

    let target = secret.letters();
    let mut remaining = letter_counts(secret);
    let mut results = guessed.map(|letter| LetterResult::new(letter, LetterStatus::Unresolved));

    // Exact positions
    for (i, result) in results.iter_mut().enumerate() {
        sets.mark_used(result.letter);
        if result.letter == target[i] {
            result.status = LetterStatus::CorrectPosition;
            if let Some(count) = remaining.get_mut(&result.letter) {
                *count -= 1;
            }
            sets.include(result.letter);
        }
    }

    // Misplaced or absent
    for result in results.iter_mut().filter(|r| !r.status.is_resolved()) {
        match remaining.get_mut(&result.letter) {
            Some(count) if *count > 0 => {
                *count -= 1;
                result.status = LetterStatus::WrongPosition;
                sets.include(result.letter);
            }
            _ => {
                result.status = LetterStatus::NotInWord;
                if !secret.contains(result.letter) {
                    sets.exclude(result.letter);
                }
            }
        }
    }

    results
}

fn letter_counts(word: &Word) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for &letter in word.letters() {
        *counts.entry(letter).or_insert(0) += 1;
    }
    counts
}
