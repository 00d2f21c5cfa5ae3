//! Corpus counts and session accuracy statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ChecklistItem, ExerciseRecord, Level, TaskType};
use crate::session::ResultEntry;

/// Fraction of correct answers, or 0.0 when nothing was attempted.
pub fn accuracy(correct: usize, attempted: usize) -> f64 {
    if attempted == 0 {
        0.0
    } else {
        correct as f64 / attempted as f64
    }
}

/// Fraction of `whole` made up by `part`, or 0.0 for an empty whole.
pub fn share(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Exercise counts over (a filtered view of) the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total: usize,
    pub by_level: BTreeMap<Level, usize>,
    pub by_checklist_item: BTreeMap<ChecklistItem, usize>,
    pub by_task_type: BTreeMap<TaskType, usize>,
}

impl CorpusStats {
    pub fn compute<'a>(records: impl IntoIterator<Item = &'a ExerciseRecord>) -> Self {
        let mut stats = CorpusStats::default();
        for record in records {
            stats.total += 1;
            *stats.by_level.entry(record.level).or_default() += 1;
            *stats.by_checklist_item.entry(record.checklist_item).or_default() += 1;
            *stats.by_task_type.entry(record.task_type).or_default() += 1;
        }
        stats
    }
}

/// Attempts and correct answers for one checklist item within a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemBreakdown {
    pub attempted: usize,
    pub correct: usize,
    pub accuracy: f64,
}

/// Group a result log by checklist item.
pub fn breakdown_by_checklist(results: &[ResultEntry]) -> BTreeMap<ChecklistItem, ItemBreakdown> {
    let mut breakdown: BTreeMap<ChecklistItem, ItemBreakdown> = BTreeMap::new();
    for entry in results {
        let item = breakdown.entry(entry.checklist_item).or_default();
        item.attempted += 1;
        if entry.verdict.is_correct() {
            item.correct += 1;
        }
    }
    for item in breakdown.values_mut() {
        item.accuracy = accuracy(item.correct, item.attempted);
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{IncorrectReason, Verdict};

    fn entry(id: &str, item: ChecklistItem, verdict: Verdict) -> ResultEntry {
        ResultEntry {
            exercise_id: id.into(),
            checklist_item: item,
            verdict,
            elapsed_ms: 100,
        }
    }

    #[test]
    fn accuracy_handles_zero_attempts() {
        assert_eq!(accuracy(0, 0), 0.0);
        assert!((accuracy(3, 4) - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn share_of_corpus() {
        assert_eq!(share(3, 0), 0.0);
        assert!((share(2, 8) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn breakdown_groups_by_item() {
        let results = vec![
            entry("a", ChecklistItem::Kasus, Verdict::Correct),
            entry("b", ChecklistItem::Kasus, Verdict::Incorrect(IncorrectReason::Mismatch)),
            entry("c", ChecklistItem::Reflexiv, Verdict::Incorrect(IncorrectReason::Timeout)),
        ];
        let breakdown = breakdown_by_checklist(&results);
        assert_eq!(breakdown.len(), 2);
        let kasus = breakdown[&ChecklistItem::Kasus];
        assert_eq!((kasus.attempted, kasus.correct), (2, 1));
        assert!((kasus.accuracy - 0.5).abs() < f64::EPSILON);
        assert_eq!(breakdown[&ChecklistItem::Reflexiv].correct, 0);
    }

    #[test]
    fn empty_corpus_stats() {
        let stats = CorpusStats::compute(Vec::<&ExerciseRecord>::new());
        assert_eq!(stats.total, 0);
        assert!(stats.by_level.is_empty());
    }
}
