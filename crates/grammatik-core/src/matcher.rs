//! Exact answer matching.
//!
//! The only normalization is trimming leading and trailing whitespace. Case,
//! diacritics and inflection all count: every exercise has exactly one
//! correct surface form, and multi-blank answers are compared position by
//! position with no partial credit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Answer, ExerciseRecord, Solution};

/// Why an answer was judged incorrect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncorrectReason {
    /// The answer differs from the solution.
    Mismatch,
    /// The answer has a different number of parts than the solution.
    WrongArity,
    /// The time budget ran out before the answer was submitted.
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect(IncorrectReason),
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }

    pub fn is_timeout(self) -> bool {
        matches!(self, Verdict::Incorrect(IncorrectReason::Timeout))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "correct"),
            Verdict::Incorrect(IncorrectReason::Mismatch) => write!(f, "incorrect"),
            Verdict::Incorrect(IncorrectReason::WrongArity) => {
                write!(f, "incorrect (wrong number of answers)")
            }
            Verdict::Incorrect(IncorrectReason::Timeout) => write!(f, "incorrect (timeout)"),
        }
    }
}

/// A verdict plus the canonical solution, for feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub verdict: Verdict,
    pub solution: Solution,
}

impl MatchOutcome {
    /// Replace the verdict with a timeout, keeping the solution for reveal.
    pub fn timed_out(self) -> Self {
        Self {
            verdict: Verdict::Incorrect(IncorrectReason::Timeout),
            ..self
        }
    }
}

/// The normalization applied to both sides before comparison.
pub fn normalize(s: &str) -> &str {
    s.trim()
}

/// Match a candidate answer against an exercise's solution.
///
/// Pure: the same record and answer always yield the same outcome.
pub fn match_answer(record: &ExerciseRecord, answer: &Answer) -> MatchOutcome {
    MatchOutcome {
        verdict: judge(&record.solution, answer),
        solution: record.solution.clone(),
    }
}

fn judge(solution: &Solution, answer: &Answer) -> Verdict {
    let expected = solution.parts();
    let given: Vec<&str> = match answer {
        Answer::Single(s) => vec![s.as_str()],
        Answer::Sequence(parts) => parts.iter().map(String::as_str).collect(),
    };

    if expected.len() != given.len() {
        return Verdict::Incorrect(IncorrectReason::WrongArity);
    }

    let all_equal = expected
        .iter()
        .zip(&given)
        .all(|(want, got)| normalize(want) == normalize(got));
    if all_equal {
        Verdict::Correct
    } else {
        Verdict::Incorrect(IncorrectReason::Mismatch)
    }
}
