//! Per-session letter knowledge.
//!
//! These sets accumulate what a player has learned across guesses. They are
//! owned by one session and echoed back to the client after every guess.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Included / excluded / available letter sets for one session.
///
/// `included` and `excluded` only grow, `available` only shrinks, and a
/// letter is never both included and excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterSets {
    included: BTreeSet<char>,
    excluded: BTreeSet<char>,
    available: BTreeSet<char>,
}

impl Default for LetterSets {
    fn default() -> Self {
        Self {
            included: BTreeSet::new(),
            excluded: BTreeSet::new(),
            available: ('a'..='z').collect(),
        }
    }
}

impl LetterSets {
    /// Fresh sets: nothing known, whole alphabet available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Letters confirmed present in the secret word.
    pub fn included(&self) -> &BTreeSet<char> {
        &self.included
    }

    /// Letters confirmed absent from the secret word.
    pub fn excluded(&self) -> &BTreeSet<char> {
        &self.excluded
    }

    /// Letters not yet tried in any guess.
    pub fn available(&self) -> &BTreeSet<char> {
        &self.available
    }

    /// Record a letter as present.
    pub fn include(&mut self, letter: char) {
        self.excluded.remove(&letter);
        self.included.insert(letter);
    }

    /// Record a letter as absent. Ignored for letters already included.
    pub fn exclude(&mut self, letter: char) {
        if !self.included.contains(&letter) {
            self.excluded.insert(letter);
        }
    }

    /// Mark a letter as tried.
    pub fn mark_used(&mut self, letter: char) {
        self.available.remove(&letter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets() {
        let sets = LetterSets::new();
        assert!(sets.included().is_empty());
        assert!(sets.excluded().is_empty());
        assert_eq!(sets.available().len(), 26);
        assert!(sets.available().contains(&'a'));
        assert!(sets.available().contains(&'z'));
    }

    #[test]
    fn test_include_wins_over_exclude() {
        let mut sets = LetterSets::new();
        sets.include('e');
        sets.exclude('e');
        assert!(sets.included().contains(&'e'));
        assert!(!sets.excluded().contains(&'e'));

        sets.exclude('q');
        sets.include('q');
        assert!(sets.included().contains(&'q'));
        assert!(!sets.excluded().contains(&'q'));
    }

    #[test]
    fn test_mark_used_is_idempotent() {
        let mut sets = LetterSets::new();
        sets.mark_used('x');
        sets.mark_used('x');
        assert_eq!(sets.available().len(), 25);
        assert!(!sets.available().contains(&'x'));
    }
}
