//! Game session state machine.
//!
//! A session is either awaiting a guess (`ActiveSession`) or over
//! (`FinishedSession`). Guessing consumes the active session and hands back
//! whichever state comes next, so a finished game has no way to accept
//! another guess.

use serde::{Deserialize, Serialize};

use crate::core::evaluate::{evaluate, LetterResult};
use crate::core::state::LetterSets;
use crate::core::word::Word;
use crate::error::WordleError;
use crate::words::WordProvider;

/// Maximum counted guesses per session.
pub const GUESS_LIMIT: u32 = 6;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Secret word guessed.
    Won,
    /// Guess limit reached without a win.
    Lost,
    /// Stream closed before the game concluded.
    Abandoned,
}

impl Outcome {
    /// Whether the player won.
    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Won)
    }

    /// Lowercase name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Outcome::Won => "won",
            Outcome::Lost => "lost",
            Outcome::Abandoned => "abandoned",
        }
    }
}

/// Why a guess did not count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Not five ASCII letters.
    InvalidFormat,
    /// Well-formed but not in the word list.
    Unplayable,
}

impl Rejection {
    /// The validation error behind this rejection, for logging.
    pub fn to_error(self, guess: &str) -> WordleError {
        match self {
            Rejection::InvalidFormat => WordleError::invalid_guess_format(guess),
            Rejection::Unplayable => WordleError::unplayable_word(guess.trim().to_lowercase()),
        }
    }
}

/// What one guess produced.
///
/// Rejected guesses carry empty `results` and the letter sets unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub results: Vec<LetterResult>,
    pub letters: LetterSets,
    pub is_correct: bool,
    pub is_game_over: bool,
    pub rejection: Option<Rejection>,
}

impl TurnReport {
    /// Whether the guess was rejected without using a turn.
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }
}

/// Result of submitting a guess.
#[derive(Debug)]
pub enum Turn {
    /// The game goes on.
    Continue(ActiveSession, TurnReport),
    /// This guess ended the game.
    Finished(FinishedSession, TurnReport),
}

impl Turn {
    /// The report for the guess just played.
    pub fn report(&self) -> &TurnReport {
        match self {
            Turn::Continue(_, report) | Turn::Finished(_, report) => report,
        }
    }
}

/// A game awaiting its next guess.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    secret: Word,
    turns_used: u32,
    letters: LetterSets,
}

impl ActiveSession {
    /// Start a game against `secret`.
    pub fn new(secret: Word) -> Self {
        Self {
            secret,
            turns_used: 0,
            letters: LetterSets::new(),
        }
    }

    /// Counted guesses so far.
    pub fn turns_used(&self) -> u32 {
        self.turns_used
    }

    /// Counted guesses left.
    pub fn turns_remaining(&self) -> u32 {
        GUESS_LIMIT - self.turns_used
    }

    /// Accumulated letter knowledge.
    pub fn letters(&self) -> &LetterSets {
        &self.letters
    }

    /// Play one guess.
    ///
    /// Malformed or unplayable guesses are rejected without consuming a
    /// turn or touching the letter sets. Otherwise the guess is evaluated
    /// and the game ends on a win or when the last turn is used.
    pub fn guess(mut self, raw: &str, words: &dyn WordProvider) -> Turn {
        let guess = match Word::parse(raw) {
            Ok(word) => word,
            Err(_) => return self.reject(Rejection::InvalidFormat),
        };
        if !words.is_playable(raw) {
            return self.reject(Rejection::Unplayable);
        }

        self.turns_used += 1;
        let results = evaluate(&self.secret, &guess, &mut self.letters);
        let won = guess == self.secret;

        let outcome = if won {
            Some(Outcome::Won)
        } else if self.turns_used >= GUESS_LIMIT {
            Some(Outcome::Lost)
        } else {
            None
        };

        let report = TurnReport {
            results: results.to_vec(),
            letters: self.letters.clone(),
            is_correct: won,
            is_game_over: outcome.is_some(),
            rejection: None,
        };

        match outcome {
            Some(outcome) => Turn::Finished(self.finish(outcome), report),
            None => Turn::Continue(self, report),
        }
    }

    /// End the game because the player went away.
    pub fn abandon(self) -> FinishedSession {
        self.finish(Outcome::Abandoned)
    }

    fn reject(self, rejection: Rejection) -> Turn {
        let report = TurnReport {
            results: Vec::new(),
            letters: self.letters.clone(),
            is_correct: false,
            is_game_over: false,
            rejection: Some(rejection),
        };
        Turn::Continue(self, report)
    }

    fn finish(self, outcome: Outcome) -> FinishedSession {
        FinishedSession {
            turns_used: self.turns_used,
            outcome,
        }
    }
}

/// A concluded game. Only inspection is possible.
#[derive(Debug, Clone)]
pub struct FinishedSession {
    turns_used: u32,
    outcome: Outcome,
}

impl FinishedSession {
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn won(&self) -> bool {
        self.outcome.is_win()
    }

    pub fn turns_used(&self) -> u32 {
        self.turns_used
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::StaticWords;

    fn words() -> StaticWords {
        StaticWords::new(
            Word::parse("crane").unwrap(),
            ["slate", "pious", "trace", "react", "caner", "nacre", "eerie"],
        )
    }

    fn session() -> ActiveSession {
        ActiveSession::new(Word::parse("crane").unwrap())
    }

    fn expect_continue(turn: Turn) -> (ActiveSession, TurnReport) {
        match turn {
            Turn::Continue(session, report) => (session, report),
            Turn::Finished(..) => panic!("expected game to continue"),
        }
    }

    fn expect_finished(turn: Turn) -> (FinishedSession, TurnReport) {
        match turn {
            Turn::Finished(session, report) => (session, report),
            Turn::Continue(..) => panic!("expected game to finish"),
        }
    }

    #[test]
    fn test_new_session() {
        let session = session();
        assert_eq!(session.turns_used(), 0);
        assert_eq!(session.turns_remaining(), GUESS_LIMIT);
        assert_eq!(session.letters(), &LetterSets::new());
    }

    #[test]
    fn test_win_on_first_guess() {
        let words = words();
        let (finished, report) = expect_finished(session().guess("CRANE", &words));

        assert!(report.is_correct);
        assert!(report.is_game_over);
        assert_eq!(report.results.len(), 5);
        assert_eq!(finished.outcome(), Outcome::Won);
        assert_eq!(finished.turns_used(), 1);
        assert!(finished.won());
    }

    #[test]
    fn test_ordinary_guess_counts() {
        let words = words();
        let (session, report) = expect_continue(session().guess("slate", &words));

        assert_eq!(session.turns_used(), 1);
        assert_eq!(session.turns_remaining(), GUESS_LIMIT - 1);
        assert!(!report.is_correct);
        assert!(!report.is_game_over);
        assert!(!report.is_rejected());
        assert_eq!(report.results.len(), 5);
        assert!(report.letters.included().contains(&'a'));
        assert!(report.letters.excluded().contains(&'s'));
    }

    #[test]
    fn test_unplayable_guess_rejected_idempotently() {
        let words = words();
        let (session, _) = expect_continue(session().guess("slate", &words));
        let before = session.letters().clone();

        let (session, first) = expect_continue(session.guess("zzzzq", &words));
        let (session, second) = expect_continue(session.guess("zzzzq", &words));

        for report in [&first, &second] {
            assert_eq!(report.rejection, Some(Rejection::Unplayable));
            assert!(report.results.is_empty());
            assert!(!report.is_correct);
            assert!(!report.is_game_over);
            assert_eq!(report.letters, before);
        }
        assert_eq!(session.turns_used(), 1);
        assert_eq!(session.letters(), &before);
    }

    #[test]
    fn test_malformed_guess_rejected() {
        let words = words();
        let (session, report) = expect_continue(session().guess("cranes", &words));

        assert_eq!(report.rejection, Some(Rejection::InvalidFormat));
        assert!(report.results.is_empty());
        assert_eq!(session.turns_used(), 0);
    }

    #[test]
    fn test_loss_after_guess_limit() {
        let words = words();
        let mut session = session();

        for _ in 0..GUESS_LIMIT - 1 {
            let (next, report) = expect_continue(session.guess("slate", &words));
            assert!(!report.is_game_over);
            session = next;
        }

        let (finished, report) = expect_finished(session.guess("pious", &words));
        assert!(report.is_game_over);
        assert!(!report.is_correct);
        assert_eq!(finished.outcome(), Outcome::Lost);
        assert_eq!(finished.turns_used(), GUESS_LIMIT);
    }

    #[test]
    fn test_win_on_last_guess() {
        let words = words();
        let mut session = session();

        for _ in 0..GUESS_LIMIT - 1 {
            session = expect_continue(session.guess("trace", &words)).0;
        }

        let (finished, report) = expect_finished(session.guess("crane", &words));
        assert!(report.is_correct);
        assert_eq!(finished.outcome(), Outcome::Won);
        assert_eq!(finished.turns_used(), GUESS_LIMIT);
    }

    #[test]
    fn test_abandon_keeps_progress() {
        let words = words();
        let (session, _) = expect_continue(session().guess("slate", &words));
        let (session, _) = expect_continue(session.guess("pious", &words));

        let finished = session.abandon();
        assert_eq!(finished.outcome(), Outcome::Abandoned);
        assert_eq!(finished.turns_used(), 2);
        assert!(!finished.won());
    }

    #[test]
    fn test_rejection_errors() {
        assert!(matches!(
            Rejection::InvalidFormat.to_error("cranes"),
            WordleError::InvalidGuessFormat { .. }
        ));
        assert_eq!(
            Rejection::Unplayable.to_error(" ZZZZQ ").to_string(),
            "unplayable word: zzzzq"
        );
    }

    #[test]
    fn test_abandon_before_any_guess() {
        let finished = session().abandon();
        assert_eq!(finished.outcome(), Outcome::Abandoned);
        assert_eq!(finished.turns_used(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        const PLAYABLE: [&str; 8] = [
            "slate", "pious", "trace", "react", "caner", "nacre", "eerie", "crane",
        ];

        fn arb_guess() -> impl Strategy<Value = String> {
            prop_oneof![
                prop::sample::select(PLAYABLE.to_vec()).prop_map(String::from),
                Just("zzzzq".to_string()),
                Just("toolong".to_string()),
            ]
        }

        proptest! {
            // Property: letter sets move in one direction and stay disjoint
            #[test]
            fn prop_letter_sets_monotonic(guesses in prop::collection::vec(arb_guess(), 1..12)) {
                let words = words();
                let mut session = session();

                for guess in guesses {
                    let before = session.letters().clone();
                    let turns_before = session.turns_used();

                    match session.guess(&guess, &words) {
                        Turn::Continue(next, report) => {
                            let after = next.letters();
                            prop_assert!(before.included().is_subset(after.included()));
                            prop_assert!(before.excluded().is_subset(after.excluded()));
                            prop_assert!(after.available().is_subset(before.available()));
                            prop_assert!(after.included().is_disjoint(after.excluded()));
                            if report.is_rejected() {
                                prop_assert_eq!(next.turns_used(), turns_before);
                                prop_assert_eq!(after, &before);
                            } else {
                                prop_assert_eq!(next.turns_used(), turns_before + 1);
                            }
                            prop_assert!(next.turns_used() < GUESS_LIMIT);
                            session = next;
                        }
                        Turn::Finished(done, report) => {
                            prop_assert!(report.is_game_over);
                            prop_assert!(done.turns_used() <= GUESS_LIMIT);
                            prop_assert_eq!(report.is_correct, done.won());
                            prop_assert!(
                                done.won() || done.turns_used() == GUESS_LIMIT
                            );
                            break;
                        }
                    }
                }
            }
        }
    }
}
