//! Cross-record corpus integrity checks.
//!
//! Runs over every schema-valid record, in a fixed order, and reports every
//! violation. Earlier failures never stop later checks.

use std::collections::HashMap;

use crate::error::ValidationError;
use crate::matcher::normalize;
use crate::model::{count_blanks, ExerciseRecord, RecordOrigin, Solution, TaskType};

/// A schema-valid record together with where it was found.
#[derive(Debug, Clone)]
pub struct SourcedRecord {
    pub origin: RecordOrigin,
    pub record: ExerciseRecord,
}

type RecordCheck = fn(&SourcedRecord) -> Option<ValidationError>;

/// Per-task-type checks, in report order.
static TASK_CHECKS: &[(TaskType, RecordCheck)] = &[
    (TaskType::MultipleChoice, check_unambiguous_solution),
    (TaskType::FillBlank, check_blank_count),
];

/// Check cross-record invariants. An empty result means the set is consistent.
pub fn check_corpus(records: &[SourcedRecord]) -> Vec<ValidationError> {
    let mut errors = check_duplicate_ids(records);

    errors.extend(records.iter().filter_map(check_source_group));
    errors.extend(records.iter().filter_map(check_solution_leak));

    for (task_type, check) in TASK_CHECKS {
        errors.extend(
            records
                .iter()
                .filter(|r| r.record.task_type == *task_type)
                .filter_map(check),
        );
    }

    errors
}

fn check_duplicate_ids(records: &[SourcedRecord]) -> Vec<ValidationError> {
    let mut first_seen: HashMap<&str, RecordOrigin> = HashMap::new();
    let mut errors = Vec::new();
    for sourced in records {
        match first_seen.get(sourced.record.id.as_str()) {
            Some(first) => errors.push(ValidationError::DuplicateId {
                id: sourced.record.id.clone(),
                first: *first,
                duplicate: sourced.origin,
            }),
            None => {
                first_seen.insert(&sourced.record.id, sourced.origin);
            }
        }
    }
    errors
}

fn check_source_group(sourced: &SourcedRecord) -> Option<ValidationError> {
    let declared = sourced.record.checklist_item;
    let expected = sourced.origin.group.checklist_item;
    (declared != expected).then(|| ValidationError::ChecklistMismatch {
        id: sourced.record.id.clone(),
        origin: sourced.origin,
        declared,
        expected,
    })
}

/// Solutions shorter than this are common words and may legitimately
/// appear in the prompt.
const MIN_LEAK_LEN: usize = 16;

/// Lowercase and drop whitespace, sentence punctuation and blank markers.
fn fold_for_leak(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '.' | ',' | '!' | '?' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn check_solution_leak(sourced: &SourcedRecord) -> Option<ValidationError> {
    let record = &sourced.record;
    if count_blanks(&record.sentence) > 0 {
        return None;
    }
    let solution = fold_for_leak(&record.solution.parts().concat());
    let leaked = solution.chars().count() >= MIN_LEAK_LEN
        && fold_for_leak(&record.sentence).contains(&solution);
    leaked.then(|| ValidationError::SolutionLeak {
        id: record.id.clone(),
        origin: sourced.origin,
    })
}

fn check_unambiguous_solution(sourced: &SourcedRecord) -> Option<ValidationError> {
    let record = &sourced.record;
    let occurrences = match (&record.solution, &record.choices) {
        (Solution::Single(solution), Some(choices)) => {
            let solution = normalize(solution);
            choices.iter().filter(|c| normalize(c) == solution).count()
        }
        _ => 0,
    };
    (occurrences != 1).then(|| ValidationError::AmbiguousSolution {
        id: record.id.clone(),
        origin: sourced.origin,
        occurrences,
    })
}

fn check_blank_count(sourced: &SourcedRecord) -> Option<ValidationError> {
    let record = &sourced.record;
    let Solution::Sequence(parts) = &record.solution else {
        // A single-string solution only requires at least one blank, which
        // the schema validator already enforces.
        return None;
    };
    let blanks = count_blanks(&record.sentence);
    (blanks != parts.len()).then(|| ValidationError::BlankCountMismatch {
        id: record.id.clone(),
        origin: sourced.origin,
        blanks,
        solutions: parts.len(),
    })
}
