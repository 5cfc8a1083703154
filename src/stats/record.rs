//! Daily statistics record.
//!
//! `GameStats` is the durable record written to disk; `Statistics` is the
//! derived view returned to clients.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::GUESS_LIMIT;

/// Cumulative results for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStats {
    /// Day these counters belong to.
    pub date: NaiveDate,
    /// Completed sessions (winners and non-winners).
    pub total_players: u32,
    /// Sessions that guessed the word.
    pub total_winners: u32,
    /// Sum of turns used by winners.
    pub total_guesses_by_winners: u32,
    /// Winners keyed by how many guesses they needed.
    #[serde(default)]
    pub guess_distribution: BTreeMap<u32, u32>,
}

impl GameStats {
    /// Zeroed counters for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            total_players: 0,
            total_winners: 0,
            total_guesses_by_winners: 0,
            guess_distribution: BTreeMap::new(),
        }
    }

    /// Whether these counters belong to a day other than `today`.
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        self.date != today
    }

    /// Reset to zero for `today` if stale. Returns whether a reset happened.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if !self.is_stale(today) {
            return false;
        }
        tracing::info!(
            "New day detected ({} -> {}), resetting statistics",
            self.date,
            today
        );
        *self = Self::new(today);
        true
    }

    /// Count one finished session.
    ///
    /// A win with a turn count outside `1..=GUESS_LIMIT` cannot come from a
    /// real session; it is counted as a non-winning play so the distribution
    /// keeps summing to `total_winners`.
    pub fn record(&mut self, won: bool, turns_used: u32) {
        self.total_players += 1;

        if !won {
            return;
        }
        if !(1..=GUESS_LIMIT).contains(&turns_used) {
            tracing::warn!(
                "Ignoring win with impossible turn count {} (limit {})",
                turns_used,
                GUESS_LIMIT
            );
            return;
        }

        self.total_winners += 1;
        self.total_guesses_by_winners += turns_used;
        *self.guess_distribution.entry(turns_used).or_insert(0) += 1;
    }

    /// Add counts from `other` if it covers the same day.
    ///
    /// Returns whether anything was added.
    pub fn absorb(&mut self, other: &GameStats) -> bool {
        if other.date != self.date || other.total_players == 0 {
            return false;
        }
        self.total_players += other.total_players;
        self.total_winners += other.total_winners;
        self.total_guesses_by_winners += other.total_guesses_by_winners;
        for (&turns, &count) in &other.guess_distribution {
            *self.guess_distribution.entry(turns).or_insert(0) += count;
        }
        true
    }

    /// Compute the client-facing view.
    pub fn statistics(&self) -> Statistics {
        let winners_percentage = if self.total_players > 0 {
            self.total_winners as f64 / self.total_players as f64 * 100.0
        } else {
            0.0
        };
        let average_guesses = if self.total_winners > 0 {
            self.total_guesses_by_winners as f64 / self.total_winners as f64
        } else {
            0.0
        };

        Statistics {
            num_players: self.total_players,
            winners_percentage,
            average_guesses,
            guess_distribution: self.guess_distribution.clone(),
        }
    }
}

/// Point-in-time summary of the day's play.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Statistics {
    pub num_players: u32,
    /// Winners as a percentage of players, 0 when nobody has played.
    pub winners_percentage: f64,
    /// Mean guesses per winner, 0 when nobody has won.
    pub average_guesses: f64,
    pub guess_distribution: BTreeMap<u32, u32>,
}
