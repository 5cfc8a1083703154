//! Game service.
//!
//! Binds an inbound stream of guesses to one session, answers statistics
//! queries, and makes sure each finished session is counted exactly once.

use std::sync::Arc;

use crate::core::{ActiveSession, FinishedSession, Outcome, Turn};
use crate::error::{BestEffort, Result};
use crate::protocol::{GuessRequest, GuessResponse, ServerFrame, StatisticsResponse};
use crate::stats::StatsStore;
use crate::words::WordProvider;

/// Shared entry point for every connection.
pub struct GameService {
    words: Arc<dyn WordProvider>,
    stats: Arc<dyn StatsStore>,
    /// Whether sessions closed before the end count as non-winning plays.
    count_abandoned: bool,
}

impl GameService {
    /// Create a service. Abandoned sessions are counted.
    pub fn new(words: Arc<dyn WordProvider>, stats: Arc<dyn StatsStore>) -> Self {
        Self {
            words,
            stats,
            count_abandoned: true,
        }
    }

    /// Choose whether abandoned sessions submit a stats update.
    pub fn with_count_abandoned(mut self, count_abandoned: bool) -> Self {
        self.count_abandoned = count_abandoned;
        self
    }

    /// Start a session against today's word.
    ///
    /// Fails with `WordProviderUnavailable` when there is no word to play.
    pub fn start_session(&self) -> Result<ActiveSession> {
        let secret = self.words.word_of_the_day()?;
        tracing::info!("Session started");
        Ok(ActiveSession::new(secret))
    }

    /// Drive a session to its end.
    ///
    /// Each `Ok` request is played and answered with a `guess` frame. An
    /// `Err` that is fatal to the session (a broken stream) abandons it;
    /// any other `Err` is answered with an `error` frame and costs nothing.
    /// The session is also abandoned when `requests` runs dry or `respond`
    /// fails mid-game.
    ///
    /// The finished session is counted before this returns.
    pub fn run_session<I, F>(
        &self,
        mut session: ActiveSession,
        requests: I,
        mut respond: F,
    ) -> FinishedSession
    where
        I: IntoIterator<Item = Result<GuessRequest>>,
        F: FnMut(ServerFrame) -> Result<()>,
    {
        let mut requests = requests.into_iter();

        let finished = loop {
            let request = match requests.next() {
                Some(Ok(request)) => request,
                Some(Err(e)) if e.is_fatal_to_session() => {
                    tracing::info!("Session stream failed: {}", e);
                    break session.abandon();
                }
                Some(Err(e)) => {
                    tracing::warn!("Rejected frame: {}", e);
                    if let Err(e) = respond(ServerFrame::error(e.to_string())) {
                        tracing::info!("Failed to answer client: {}", e);
                        break session.abandon();
                    }
                    continue;
                }
                None => break session.abandon(),
            };

            match session.guess(&request.word, &*self.words) {
                Turn::Continue(next, report) => {
                    match report.rejection {
                        Some(rejection) => {
                            tracing::debug!("Guess rejected: {}", rejection.to_error(&request.word))
                        }
                        None => tracing::debug!(
                            "Guess played (turn {}, {} left)",
                            next.turns_used(),
                            next.turns_remaining()
                        ),
                    }
                    if let Err(e) = respond(ServerFrame::Guess(GuessResponse::from(&report))) {
                        tracing::info!("Failed to answer client: {}", e);
                        break next.abandon();
                    }
                    session = next;
                }
                Turn::Finished(done, report) => {
                    // Count before answering so a stats query that follows
                    // the final response already sees this game.
                    self.record(&done);
                    if let Err(e) = respond(ServerFrame::Guess(GuessResponse::from(&report))) {
                        tracing::info!("Failed to deliver final response: {}", e);
                    }
                    return done;
                }
            }
        };

        self.record(&finished);
        finished
    }

    /// End a session before any guess was read, counting it as abandoned.
    pub fn abandon(&self, session: ActiveSession) -> FinishedSession {
        let finished = session.abandon();
        self.record(&finished);
        finished
    }

    /// Today's statistics.
    pub fn statistics(&self) -> StatisticsResponse {
        self.stats.snapshot().into()
    }

    fn record(&self, session: &FinishedSession) {
        tracing::info!(
            "Session {} after {} turn(s)",
            session.outcome().name(),
            session.turns_used()
        );

        if session.outcome() == Outcome::Abandoned && !self.count_abandoned {
            tracing::debug!("Not counting abandoned session");
            return;
        }

        self.stats
            .record_result(session.won(), session.turns_used())
            .best_effort_default("Failed to persist game result");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::core::{Word, GUESS_LIMIT};
    use crate::error::WordleError;
    use crate::stats::{MemoryStatsStore, Statistics};
    use crate::words::StaticWords;
    use chrono::NaiveDate;
    use std::io;

    fn words() -> Arc<StaticWords> {
        Arc::new(StaticWords::new(
            Word::parse("crane").unwrap(),
            ["slate", "pious", "trace", "eerie"],
        ))
    }

    fn stats() -> Arc<MemoryStatsStore> {
        let date = NaiveDate::from_ymd_opt(2025, 3, 25).unwrap();
        Arc::new(MemoryStatsStore::new(Arc::new(FixedClock::new(date))))
    }

    fn guesses(words: &[&str]) -> Vec<Result<GuessRequest>> {
        words.iter().map(|w| Ok(GuessRequest::new(*w))).collect()
    }

    fn guess_frames(frames: &[ServerFrame]) -> Vec<&GuessResponse> {
        frames
            .iter()
            .filter_map(|f| match f {
                ServerFrame::Guess(g) => Some(g),
                _ => None,
            })
            .collect()
    }

    /// Counts in memory but never manages to persist.
    struct FailingStats {
        inner: MemoryStatsStore,
    }

    impl StatsStore for FailingStats {
        fn record_result(&self, won: bool, turns_used: u32) -> Result<()> {
            self.inner.record_result(won, turns_used)?;
            Err(WordleError::stats_persistence(
                "gamestats.json",
                io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }

        fn snapshot(&self) -> Statistics {
            self.inner.snapshot()
        }
    }

    #[test]
    fn test_start_session_without_word() {
        let service = GameService::new(Arc::new(StaticWords::unavailable()), stats());
        assert!(matches!(
            service.start_session(),
            Err(WordleError::WordProviderUnavailable { .. })
        ));
    }

    #[test]
    fn test_win_counts_once() {
        let stats = stats();
        let service = GameService::new(words(), stats.clone());
        let session = service.start_session().unwrap();

        let mut frames = Vec::new();
        let finished = service.run_session(
            session,
            guesses(&["slate", "crane", "pious"]),
            |frame| {
                frames.push(frame);
                Ok(())
            },
        );

        assert_eq!(finished.outcome(), Outcome::Won);
        assert_eq!(finished.turns_used(), 2);
        // Nothing is read after the terminal response.
        assert_eq!(frames.len(), 2);
        assert!(guess_frames(&frames)[1].is_game_over);

        let record = stats.record();
        assert_eq!(record.total_players, 1);
        assert_eq!(record.total_winners, 1);
        assert_eq!(record.guess_distribution.get(&2), Some(&1));
    }

    #[test]
    fn test_loss_after_six_turns() {
        let stats = stats();
        let service = GameService::new(words(), stats.clone());
        let session = service.start_session().unwrap();

        let mut frames = Vec::new();
        let finished = service.run_session(session, guesses(&["slate"; 6]), |frame| {
            frames.push(frame);
            Ok(())
        });

        assert_eq!(finished.outcome(), Outcome::Lost);
        assert_eq!(finished.turns_used(), GUESS_LIMIT);
        let last = guess_frames(&frames)[5];
        assert!(last.is_game_over);
        assert!(!last.is_correct);

        let record = stats.record();
        assert_eq!(record.total_players, 1);
        assert_eq!(record.total_winners, 0);
    }

    #[test]
    fn test_rejected_guesses_are_free() {
        let service = GameService::new(words(), stats());
        let session = service.start_session().unwrap();

        let mut frames = Vec::new();
        let finished = service.run_session(
            session,
            guesses(&["zzzzq", "toolong", "slate"]),
            |frame| {
                frames.push(frame);
                Ok(())
            },
        );

        let responses = guess_frames(&frames);
        assert!(responses[0].is_rejected());
        assert!(responses[1].is_rejected());
        assert!(!responses[2].is_rejected());
        assert_eq!(finished.turns_used(), 1);
    }

    #[test]
    fn test_malformed_frame_answered_with_error() {
        let service = GameService::new(words(), stats());
        let session = service.start_session().unwrap();

        let requests = vec![
            Err(WordleError::protocol("expected a guess")),
            Ok(GuessRequest::new("crane")),
        ];
        let mut frames = Vec::new();
        let finished = service.run_session(session, requests, |frame| {
            frames.push(frame);
            Ok(())
        });

        assert!(matches!(frames[0], ServerFrame::Error { .. }));
        assert_eq!(finished.outcome(), Outcome::Won);
        assert_eq!(finished.turns_used(), 1);
    }

    #[test]
    fn test_closed_stream_abandons_and_counts() {
        let stats = stats();
        let service = GameService::new(words(), stats.clone());
        let session = service.start_session().unwrap();

        let finished = service.run_session(session, guesses(&["slate"]), |_| Ok(()));

        assert_eq!(finished.outcome(), Outcome::Abandoned);
        let record = stats.record();
        assert_eq!(record.total_players, 1);
        assert_eq!(record.total_winners, 0);
    }

    #[test]
    fn test_abandoned_not_counted_when_disabled() {
        let stats = stats();
        let service = GameService::new(words(), stats.clone()).with_count_abandoned(false);
        let session = service.start_session().unwrap();

        let no_guesses: Vec<Result<GuessRequest>> = Vec::new();
        let finished = service.run_session(session, no_guesses, |_| Ok(()));

        assert_eq!(finished.outcome(), Outcome::Abandoned);
        assert_eq!(stats.record().total_players, 0);
    }

    #[test]
    fn test_broken_stream_abandons() {
        let stats = stats();
        let service = GameService::new(words(), stats.clone());
        let session = service.start_session().unwrap();

        let requests = vec![
            Ok(GuessRequest::new("slate")),
            Err(WordleError::from(io::Error::new(
                io::ErrorKind::TimedOut,
                "idle",
            ))),
            Ok(GuessRequest::new("crane")),
        ];
        let finished = service.run_session(session, requests, |_| Ok(()));

        assert_eq!(finished.outcome(), Outcome::Abandoned);
        assert_eq!(finished.turns_used(), 1);
        assert_eq!(stats.record().total_players, 1);
    }

    #[test]
    fn test_failed_response_abandons() {
        let stats = stats();
        let service = GameService::new(words(), stats.clone());
        let session = service.start_session().unwrap();

        let finished = service.run_session(session, guesses(&["slate", "crane"]), |_| {
            Err(WordleError::from(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "gone",
            )))
        });

        assert_eq!(finished.outcome(), Outcome::Abandoned);
        assert_eq!(stats.record().total_players, 1);
    }

    #[test]
    fn test_persistence_failure_does_not_break_session() {
        let stats = Arc::new(FailingStats {
            inner: MemoryStatsStore::new(Arc::new(FixedClock::new(
                NaiveDate::from_ymd_opt(2025, 3, 25).unwrap(),
            ))),
        });
        let service = GameService::new(words(), stats.clone());
        let session = service.start_session().unwrap();

        let mut frames = Vec::new();
        let finished = service.run_session(session, guesses(&["crane"]), |frame| {
            frames.push(frame);
            Ok(())
        });

        assert!(finished.won());
        assert!(guess_frames(&frames)[0].is_correct);
        assert_eq!(service.statistics().num_players, 1);
    }

    #[test]
    fn test_statistics() {
        let stats = stats();
        let service = GameService::new(words(), stats.clone());
        assert_eq!(service.statistics(), StatisticsResponse::default());

        stats.record_result(true, 3).unwrap();
        stats.record_result(false, 6).unwrap();

        let response = service.statistics();
        assert_eq!(response.num_players, 2);
        assert!((response.winners_percentage - 50.0).abs() < f64::EPSILON);
        assert!((response.average_guesses - 3.0).abs() < f64::EPSILON);
    }
}
