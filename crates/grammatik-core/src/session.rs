//! Practice session state machine.
//!
//! `Idle -> Loaded -> InProgress -> Completed`, with `reset` returning to
//! `Idle` from anywhere. A session borrows the validated corpus read-only and
//! owns everything else: the serving queue, the cursor, the result log and
//! the counters. Nothing here blocks; timed mode checks expiry lazily when an
//! answer is submitted.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::corpus::ValidatedCorpus;
use crate::error::SessionError;
use crate::matcher::{match_answer, MatchOutcome, Verdict};
use crate::model::{Answer, ChecklistItem, ExerciseFilter, ExerciseRecord};
use crate::report::SessionSummary;
use crate::statistics::{accuracy, breakdown_by_checklist};
use crate::traits::{Clock, SystemClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Loaded,
    InProgress,
    Completed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Loaded => "loaded",
            SessionPhase::InProgress => "in progress",
            SessionPhase::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Order in which matching exercises are served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueueOrder {
    /// Corpus insertion order.
    #[default]
    Insertion,
    /// Seeded shuffle; the same seed always yields the same queue.
    Shuffled { seed: u64 },
    /// Seeded shuffle that never serves the same verb twice in a row when
    /// the verb mix allows it.
    VerbInterleaved { seed: u64 },
}

impl QueueOrder {
    pub fn seed(self) -> Option<u64> {
        match self {
            QueueOrder::Insertion => None,
            QueueOrder::Shuffled { seed } | QueueOrder::VerbInterleaved { seed } => Some(seed),
        }
    }
}

/// Configuration for a practice session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub order: QueueOrder,
    /// Per-exercise time budget; `None` disables timed mode.
    pub time_budget: Option<Duration>,
}

/// One entry in the session's result log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub exercise_id: String,
    pub checklist_item: ChecklistItem,
    pub verdict: Verdict,
    pub elapsed_ms: u64,
}

/// What `submit` reports back to the caller.
#[derive(Debug, Clone)]
pub struct Submission {
    pub exercise_id: String,
    pub outcome: MatchOutcome,
    pub elapsed: Duration,
    /// Phase after the submission.
    pub phase: SessionPhase,
}

/// 1-based position of the current exercise within the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

/// State of one loaded run. Discarded on `reset` and on the next `load`.
#[derive(Debug)]
struct Run<'c> {
    id: Uuid,
    filter: ExerciseFilter,
    queue: Vec<&'c ExerciseRecord>,
    cursor: usize,
    results: Vec<ResultEntry>,
    attempted: usize,
    correct: usize,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    /// When the cursor moved onto the current exercise.
    arrived_at: Instant,
    /// When `next` first returned the current exercise.
    presented_at: Option<Instant>,
}

impl<'c> Run<'c> {
    fn current(&self) -> Option<&'c ExerciseRecord> {
        self.queue.get(self.cursor).copied()
    }
}

/// An interactive practice run over a validated corpus.
pub struct PracticeSession<'c> {
    corpus: &'c ValidatedCorpus,
    config: SessionConfig,
    clock: Box<dyn Clock>,
    phase: SessionPhase,
    run: Option<Run<'c>>,
}

impl<'c> PracticeSession<'c> {
    pub fn new(corpus: &'c ValidatedCorpus, config: SessionConfig) -> Self {
        Self::with_clock(corpus, config, SystemClock)
    }

    pub fn with_clock(
        corpus: &'c ValidatedCorpus,
        config: SessionConfig,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            corpus,
            config,
            clock: Box::new(clock),
            phase: SessionPhase::Idle,
            run: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn filter(&self) -> Option<&ExerciseFilter> {
        self.run.as_ref().map(|r| &r.filter)
    }

    /// Ids in serving order.
    pub fn queue_ids(&self) -> Vec<&'c str> {
        self.run
            .as_ref()
            .map(|r| r.queue.iter().map(|e| e.id.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn results(&self) -> &[ResultEntry] {
        self.run.as_ref().map(|r| r.results.as_slice()).unwrap_or(&[])
    }

    /// Position of the exercise at the cursor, if one remains.
    pub fn progress(&self) -> Option<Progress> {
        let run = self.run.as_ref()?;
        (run.cursor < run.queue.len()).then(|| Progress {
            position: run.cursor + 1,
            total: run.queue.len(),
        })
    }

    /// Select exercises matching `filter` and build a fresh queue.
    ///
    /// Valid from `Idle` or `Completed`. Returns the queue length.
    pub fn load(&mut self, filter: ExerciseFilter) -> Result<usize, SessionError> {
        if matches!(self.phase, SessionPhase::Loaded | SessionPhase::InProgress) {
            return Err(SessionError::SessionActive);
        }

        let mut queue = self.corpus.select(&filter);
        if queue.is_empty() {
            return Err(SessionError::EmptyFilterResult);
        }
        match self.config.order {
            QueueOrder::Insertion => {}
            QueueOrder::Shuffled { seed } => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                queue.shuffle(&mut rng);
            }
            QueueOrder::VerbInterleaved { seed } => {
                queue = interleave_by_verb(queue, seed);
            }
        }

        let run = Run {
            id: Uuid::new_v4(),
            filter,
            queue,
            cursor: 0,
            results: Vec::new(),
            attempted: 0,
            correct: 0,
            started_at: Utc::now(),
            finished_at: None,
            arrived_at: self.clock.now(),
            presented_at: None,
        };
        tracing::info!(
            "session {} loaded: {} exercise(s), order {:?}, time budget {:?}",
            run.id,
            run.queue.len(),
            self.config.order,
            self.config.time_budget
        );
        let len = run.queue.len();
        self.run = Some(run);
        self.phase = SessionPhase::Loaded;
        Ok(len)
    }

    fn active_run(&mut self) -> Result<&mut Run<'c>, SessionError> {
        match (self.phase, self.run.as_mut()) {
            (SessionPhase::Idle, _) | (_, None) => Err(SessionError::SessionNotLoaded),
            (SessionPhase::Completed, _) => Err(SessionError::SessionCompleted),
            (_, Some(run)) => Ok(run),
        }
    }

    /// The exercise at the cursor. Does not advance.
    pub fn next(&mut self) -> Result<&'c ExerciseRecord, SessionError> {
        let now = self.clock.now();
        let run = self.active_run()?;
        let record = run.current().ok_or(SessionError::SessionCompleted)?;
        run.presented_at.get_or_insert(now);
        Ok(record)
    }

    /// Grade `answer` against the exercise at the cursor and advance.
    pub fn submit(&mut self, answer: &Answer) -> Result<Submission, SessionError> {
        let now = self.clock.now();
        let budget = self.config.time_budget;
        let run = self.active_run()?;
        let record = run.current().ok_or(SessionError::SessionCompleted)?;

        let started = run.presented_at.unwrap_or(run.arrived_at);
        let elapsed = now.saturating_duration_since(started);

        let mut outcome = match_answer(record, answer);
        if budget.is_some_and(|limit| elapsed > limit) {
            tracing::warn!(
                "{}: answered after {}ms, over the time budget",
                record.id,
                elapsed.as_millis()
            );
            outcome = outcome.timed_out();
        }

        run.results.push(ResultEntry {
            exercise_id: record.id.clone(),
            checklist_item: record.checklist_item,
            verdict: outcome.verdict,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        });
        run.attempted += 1;
        if outcome.verdict.is_correct() {
            run.correct += 1;
        }
        run.cursor += 1;
        run.arrived_at = now;
        run.presented_at = None;

        let exhausted = run.cursor >= run.queue.len();
        if exhausted {
            run.finished_at = Some(Utc::now());
            tracing::info!(
                "session {} completed: {}/{} correct",
                run.id,
                run.correct,
                run.attempted
            );
        }
        self.phase = if exhausted {
            SessionPhase::Completed
        } else {
            SessionPhase::InProgress
        };

        Ok(Submission {
            exercise_id: record.id.clone(),
            outcome,
            elapsed,
            phase: self.phase,
        })
    }

    /// Complete the session and summarize it. Idempotent once completed.
    pub fn finalize(&mut self) -> Result<SessionSummary, SessionError> {
        let seed = self.config.order.seed();
        let run = match (self.phase, self.run.as_mut()) {
            (SessionPhase::Idle, _) | (_, None) => return Err(SessionError::SessionNotLoaded),
            (_, Some(run)) => run,
        };

        let finished_at = *run.finished_at.get_or_insert_with(Utc::now);
        let was_running = self.phase != SessionPhase::Completed;
        self.phase = SessionPhase::Completed;

        let summary = SessionSummary {
            session_id: run.id,
            started_at: run.started_at,
            finished_at,
            seed,
            queue_len: run.queue.len(),
            attempted: run.attempted,
            correct: run.correct,
            incorrect: run.attempted - run.correct,
            timeouts: run.results.iter().filter(|r| r.verdict.is_timeout()).count(),
            accuracy: accuracy(run.correct, run.attempted),
            by_checklist_item: breakdown_by_checklist(&run.results),
            results: run.results.clone(),
        };
        if was_running {
            tracing::info!(
                "session {} finalized early: {}/{} correct",
                summary.session_id,
                summary.correct,
                summary.attempted
            );
        }
        Ok(summary)
    }

    /// Discard the current run and return to `Idle`.
    pub fn reset(&mut self) {
        if let Some(run) = self.run.take() {
            tracing::debug!("session {} reset", run.id);
        }
        self.phase = SessionPhase::Idle;
    }
}

/// Shuffle `queue`, then rebuild it by always drawing from the largest
/// remaining verb pile other than the one just served.
fn interleave_by_verb(queue: Vec<&ExerciseRecord>, seed: u64) -> Vec<&ExerciseRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let total = queue.len();

    let mut by_verb: BTreeMap<&str, Vec<&ExerciseRecord>> = BTreeMap::new();
    for record in queue {
        by_verb.entry(record.verb.as_str()).or_default().push(record);
    }
    let mut piles: Vec<Vec<&ExerciseRecord>> = by_verb.into_values().collect();
    for pile in &mut piles {
        pile.shuffle(&mut rng);
    }
    piles.shuffle(&mut rng);

    let mut interleaved = Vec::with_capacity(total);
    let mut last = None;
    while interleaved.len() < total {
        let non_empty = || piles.iter().enumerate().filter(|(_, pile)| !pile.is_empty());
        // Ties go to the earlier pile; fall back to repeating a verb only
        // when nothing else is left.
        let pick = non_empty()
            .filter(|(i, _)| Some(*i) != last)
            .max_by_key(|(i, pile)| (pile.len(), Reverse(*i)))
            .or_else(|| non_empty().next())
            .map(|(i, _)| i);
        let Some(i) = pick else { break };
        if let Some(record) = piles[i].pop() {
            interleaved.push(record);
        }
        last = Some(i);
    }
    interleaved
}

impl fmt::Debug for PracticeSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticeSession")
            .field("phase", &self.phase)
            .field("config", &self.config)
            .field("run", &self.run)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::IncorrectReason;
    use crate::model::Level;
    use crate::source::RawGroup;
    use crate::traits::ManualClock;
    use serde_json::json;

    fn corpus() -> ValidatedCorpus {
        let kasus = vec![
            json!({
                "id": "k1", "level": "A2.1", "verb": "helfen",
                "checklist_item": "kasus", "task_type": "multiple_choice",
                "sentence": "Ich helfe … Mann.", "solution": "dem",
                "choices": ["dem", "den", "der"]
            }),
            json!({
                "id": "k2", "level": "A2.1", "verb": "sehen",
                "checklist_item": "kasus", "task_type": "fill_blank",
                "sentence": "Ich ___ ein__ gut__ Film.",
                "solution": ["sehe", "einen", "guten"]
            }),
            json!({
                "id": "k3", "level": "A2.1", "verb": "geben",
                "checklist_item": "kasus", "task_type": "fill_blank",
                "sentence": "Ich gebe ___ Kind das Buch.", "solution": "dem"
            }),
        ];
        let reflexiv = vec![json!({
            "id": "r1", "level": "A2.1", "verb": "sich freuen",
            "checklist_item": "reflexiv", "task_type": "reorder",
            "sentence": "freue / mich / ich / auf den Urlaub",
            "solution": ["Ich", "freue", "mich", "auf den Urlaub"]
        })];
        ValidatedCorpus::build(&[
            RawGroup::new(Level::A2_1, ChecklistItem::Kasus, kasus),
            RawGroup::new(Level::A2_1, ChecklistItem::Reflexiv, reflexiv),
        ])
        .unwrap()
    }

    fn correct_answer(record: &ExerciseRecord) -> Answer {
        match &record.solution {
            crate::model::Solution::Single(s) => Answer::Single(s.clone()),
            crate::model::Solution::Sequence(parts) => Answer::Sequence(parts.clone()),
        }
    }

    #[test]
    fn operations_before_load() {
        let corpus = corpus();
        let mut session = PracticeSession::new(&corpus, SessionConfig::default());
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.next().unwrap_err(), SessionError::SessionNotLoaded);
        assert_eq!(
            session.submit(&"dem".into()).unwrap_err(),
            SessionError::SessionNotLoaded
        );
        assert_eq!(session.finalize().unwrap_err(), SessionError::SessionNotLoaded);
        assert!(session.progress().is_none());
    }

    #[test]
    fn empty_filter_result() {
        let corpus = corpus();
        let mut session = PracticeSession::new(&corpus, SessionConfig::default());
        let filter = ExerciseFilter::default().level(Level::B1_2);
        assert_eq!(session.load(filter).unwrap_err(), SessionError::EmptyFilterResult);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn queue_length_matches_filter() {
        let corpus = corpus();
        let mut session = PracticeSession::new(&corpus, SessionConfig::default());
        let filter = ExerciseFilter::default().checklist_item(ChecklistItem::Kasus);
        let expected = corpus.select(&filter).len();
        assert_eq!(session.load(filter).unwrap(), expected);
        assert_eq!(session.queue_ids(), vec!["k1", "k2", "k3"]);
        assert_eq!(session.phase(), SessionPhase::Loaded);
    }

    #[test]
    fn next_does_not_advance() {
        let corpus = corpus();
        let mut session = PracticeSession::new(&corpus, SessionConfig::default());
        session.load(ExerciseFilter::default()).unwrap();
        assert_eq!(session.next().unwrap().id, "k1");
        assert_eq!(session.next().unwrap().id, "k1");
        assert_eq!(
            session.progress(),
            Some(Progress {
                position: 1,
                total: 4
            })
        );
    }

    #[test]
    fn full_session_counts() {
        let corpus = corpus();
        let mut session = PracticeSession::new(&corpus, SessionConfig::default());
        let len = session.load(ExerciseFilter::default()).unwrap();

        let mut expected_correct = 0;
        for i in 0..len {
            let record = session.next().unwrap();
            let answer = if i % 2 == 0 {
                expected_correct += 1;
                correct_answer(record)
            } else {
                Answer::Single("falsch".into())
            };
            let submission = session.submit(&answer).unwrap();
            assert_eq!(submission.exercise_id, record.id);
        }

        assert_eq!(session.phase(), SessionPhase::Completed);
        assert_eq!(session.next().unwrap_err(), SessionError::SessionCompleted);
        assert_eq!(
            session.submit(&"dem".into()).unwrap_err(),
            SessionError::SessionCompleted
        );

        let summary = session.finalize().unwrap();
        assert_eq!(summary.attempted, len);
        assert_eq!(summary.correct, expected_correct);
        assert_eq!(
            summary.correct,
            summary.results.iter().filter(|r| r.verdict.is_correct()).count()
        );
        assert_eq!(summary.by_checklist_item[&ChecklistItem::Kasus].attempted, 3);
        assert_eq!(summary.by_checklist_item[&ChecklistItem::Reflexiv].attempted, 1);
    }

    #[test]
    fn submit_transitions_to_in_progress() {
        let corpus = corpus();
        let mut session = PracticeSession::new(&corpus, SessionConfig::default());
        session.load(ExerciseFilter::default()).unwrap();
        let submission = session.submit(&"dem".into()).unwrap();
        assert!(submission.outcome.verdict.is_correct());
        assert_eq!(submission.phase, SessionPhase::InProgress);
        assert_eq!(session.next().unwrap().id, "k2");
    }

    #[test]
    fn load_while_active_is_rejected() {
        let corpus = corpus();
        let mut session = PracticeSession::new(&corpus, SessionConfig::default());
        session.load(ExerciseFilter::default()).unwrap();
        assert_eq!(
            session.load(ExerciseFilter::default()).unwrap_err(),
            SessionError::SessionActive
        );
        session.finalize().unwrap();
        assert!(session.load(ExerciseFilter::default()).is_ok());
        assert!(session.results().is_empty());
    }

    #[test]
    fn finalize_is_idempotent() {
        let corpus = corpus();
        let mut session = PracticeSession::new(&corpus, SessionConfig::default());
        session.load(ExerciseFilter::default()).unwrap();
        session.submit(&"dem".into()).unwrap();
        let first = session.finalize().unwrap();
        let second = session.finalize().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.attempted, 1);
        assert_eq!(first.queue_len, 4);
        assert_eq!(session.phase(), SessionPhase::Completed);
    }

    #[test]
    fn reset_returns_to_idle() {
        let corpus = corpus();
        let mut session = PracticeSession::new(&corpus, SessionConfig::default());
        session.load(ExerciseFilter::default()).unwrap();
        session.submit(&"dem".into()).unwrap();
        session.reset();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.results().is_empty());
        assert_eq!(session.next().unwrap_err(), SessionError::SessionNotLoaded);
        session.reset();
        assert_eq!(corpus.len(), 4);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let corpus = corpus();
        let config = SessionConfig {
            order: QueueOrder::Shuffled { seed: 7 },
            time_budget: None,
        };
        let mut a = PracticeSession::new(&corpus, config.clone());
        let mut b = PracticeSession::new(&corpus, config);
        a.load(ExerciseFilter::default()).unwrap();
        b.load(ExerciseFilter::default()).unwrap();
        assert_eq!(a.queue_ids(), b.queue_ids());

        let mut sorted = a.queue_ids();
        sorted.sort_unstable();
        assert_eq!(sorted, vec!["k1", "k2", "k3", "r1"]);
    }

    fn verb_corpus(verbs: &[&str]) -> ValidatedCorpus {
        let records = verbs
            .iter()
            .enumerate()
            .map(|(i, verb)| {
                json!({
                    "id": format!("v{i}"), "level": "A2.1", "verb": verb,
                    "checklist_item": "kasus", "task_type": "fill_blank",
                    "sentence": "Ich ___ das.", "solution": "mache"
                })
            })
            .collect();
        ValidatedCorpus::build(&[RawGroup::new(Level::A2_1, ChecklistItem::Kasus, records)])
            .unwrap()
    }

    fn served_verbs<'c>(corpus: &'c ValidatedCorpus, order: QueueOrder) -> Vec<&'c str> {
        let mut session = PracticeSession::new(
            corpus,
            SessionConfig {
                order,
                time_budget: None,
            },
        );
        session.load(ExerciseFilter::default()).unwrap();
        session
            .queue_ids()
            .into_iter()
            .map(|id| corpus.get(id).unwrap().verb.as_str())
            .collect()
    }

    #[test]
    fn verb_interleaving_avoids_repeats() {
        let corpus = verb_corpus(&[
            "machen", "machen", "machen", "sehen", "sehen", "helfen", "geben", "machen",
        ]);
        for seed in 0..32 {
            let verbs = served_verbs(&corpus, QueueOrder::VerbInterleaved { seed });
            assert_eq!(verbs.len(), 8);
            assert!(
                verbs.windows(2).all(|w| w[0] != w[1]),
                "seed {seed} repeated a verb: {verbs:?}"
            );
            assert_eq!(verbs.iter().filter(|v| **v == "machen").count(), 4);
        }
    }

    #[test]
    fn verb_interleaving_repeats_only_when_forced() {
        let corpus = verb_corpus(&["machen", "machen", "machen", "sehen"]);
        let verbs = served_verbs(&corpus, QueueOrder::VerbInterleaved { seed: 3 });
        assert_eq!(verbs, vec!["machen", "sehen", "machen", "machen"]);
    }

    #[test]
    fn verb_interleaving_is_reproducible() {
        let corpus = verb_corpus(&["a", "b", "c", "a", "b", "c", "d"]);
        let order = QueueOrder::VerbInterleaved { seed: 11 };
        assert_eq!(served_verbs(&corpus, order), served_verbs(&corpus, order));
        assert_eq!(order.seed(), Some(11));
        assert_eq!(QueueOrder::Insertion.seed(), None);
    }

    #[test]
    fn timeout_overrides_correct_answer() {
        let corpus = corpus();
        let clock = ManualClock::new();
        let config = SessionConfig {
            order: QueueOrder::Insertion,
            time_budget: Some(Duration::from_secs(10)),
        };
        let mut session = PracticeSession::with_clock(&corpus, config, clock.clone());
        session.load(ExerciseFilter::default()).unwrap();

        session.next().unwrap();
        clock.advance(Duration::from_secs(11));
        let submission = session.submit(&"dem".into()).unwrap();
        assert_eq!(
            submission.outcome.verdict,
            Verdict::Incorrect(IncorrectReason::Timeout)
        );
        assert_eq!(submission.elapsed, Duration::from_secs(11));

        session.next().unwrap();
        clock.advance(Duration::from_secs(10));
        let submission = session
            .submit(&vec!["sehe", "einen", "guten"].into())
            .unwrap();
        assert!(submission.outcome.verdict.is_correct());

        let summary = session.finalize().unwrap();
        assert_eq!(summary.timeouts, 1);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.results[0].elapsed_ms, 11_000);
    }

    #[test]
    fn timer_starts_when_exercise_is_served() {
        let corpus = corpus();
        let clock = ManualClock::new();
        let config = SessionConfig {
            order: QueueOrder::Insertion,
            time_budget: Some(Duration::from_secs(5)),
        };
        let mut session = PracticeSession::with_clock(&corpus, config, clock.clone());
        session.load(ExerciseFilter::default()).unwrap();

        clock.advance(Duration::from_secs(60));
        session.next().unwrap();
        clock.advance(Duration::from_secs(2));
        assert!(session.submit(&"dem".into()).unwrap().outcome.verdict.is_correct());
    }

    #[test]
    fn untimed_sessions_never_time_out() {
        let corpus = corpus();
        let clock = ManualClock::new();
        let mut session =
            PracticeSession::with_clock(&corpus, SessionConfig::default(), clock.clone());
        session.load(ExerciseFilter::default()).unwrap();
        session.next().unwrap();
        clock.advance(Duration::from_secs(3600));
        assert!(session.submit(&"dem".into()).unwrap().outcome.verdict.is_correct());
    }

    #[test]
    fn independent_sessions_share_one_corpus() {
        let corpus = corpus();
        let mut a = PracticeSession::new(&corpus, SessionConfig::default());
        let mut b = PracticeSession::new(&corpus, SessionConfig::default());
        a.load(ExerciseFilter::default().checklist_item(ChecklistItem::Reflexiv))
            .unwrap();
        b.load(ExerciseFilter::default()).unwrap();
        a.submit(&vec!["Ich", "freue", "mich", "auf den Urlaub"].into())
            .unwrap();
        assert_eq!(a.phase(), SessionPhase::Completed);
        assert_eq!(b.phase(), SessionPhase::Loaded);
        assert_eq!(b.next().unwrap().id, "k1");
    }
}
