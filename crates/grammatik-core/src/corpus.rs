//! The immutable, validated exercise corpus.
//!
//! Construction runs the schema validator over every raw record and the
//! integrity checker over every schema-valid record, then either returns the
//! whole corpus or the full error list. No partial corpus is ever exposed.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use anyhow::Result;

use crate::error::{CorpusLoadError, ValidationError};
use crate::integrity::{check_corpus, SourcedRecord};
use crate::model::{ExerciseFilter, ExerciseRecord, ExerciseSummary, GroupKey, RecordOrigin};
use crate::schema::validate_record;
use crate::source::RawGroup;
use crate::statistics::CorpusStats;
use crate::traits::CorpusSource;

/// Validated exercises keyed by id and indexed by (level, checklist item).
///
/// Never mutated after construction; sessions borrow it read-only.
#[derive(Debug, Clone)]
pub struct ValidatedCorpus {
    records: Vec<ExerciseRecord>,
    by_id: HashMap<String, usize>,
    by_group: BTreeMap<GroupKey, Vec<usize>>,
}

impl ValidatedCorpus {
    /// Validate raw groups into a corpus, collecting every error.
    pub fn build(groups: &[RawGroup]) -> Result<Self, CorpusLoadError> {
        let mut errors: Vec<ValidationError> = Vec::new();
        let mut valid = Vec::new();

        for group in groups {
            for (index, raw) in group.records.iter().enumerate() {
                let origin = RecordOrigin {
                    group: group.key(),
                    index,
                };
                match validate_record(raw, &origin) {
                    Ok(record) => valid.push(SourcedRecord { origin, record }),
                    Err(record_errors) => errors.extend(record_errors),
                }
            }
        }

        errors.extend(check_corpus(&valid));

        if let Some(err) = CorpusLoadError::new(errors) {
            tracing::warn!("corpus rejected: {} validation error(s)", err.errors().len());
            return Err(err);
        }

        let corpus = Self::from_records(valid.into_iter().map(|s| s.record).collect());
        tracing::info!(
            "corpus validated: {} exercise(s) in {} group(s)",
            corpus.len(),
            corpus.by_group.len()
        );
        Ok(corpus)
    }

    /// Fetch groups from a source and validate them.
    ///
    /// The outer error is a collaborator failure (I/O, malformed files); the
    /// inner one carries every validation error.
    pub fn load(source: &dyn CorpusSource) -> Result<Result<Self, CorpusLoadError>> {
        let groups = source.groups()?;
        tracing::debug!("validating {} group(s) from {}", groups.len(), source.describe());
        Ok(Self::build(&groups))
    }

    fn from_records(records: Vec<ExerciseRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut by_group: BTreeMap<GroupKey, Vec<usize>> = BTreeMap::new();
        for (i, record) in records.iter().enumerate() {
            by_id.insert(record.id.clone(), i);
            by_group.entry(record.group()).or_default().push(i);
        }
        Self {
            records,
            by_id,
            by_group,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ExerciseRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    /// All exercises in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ExerciseRecord> {
        self.records.iter()
    }

    /// Exercises of one (level, checklist item) group, in insertion order.
    pub fn group(&self, key: GroupKey) -> impl Iterator<Item = &ExerciseRecord> {
        self.by_group
            .get(&key)
            .into_iter()
            .flatten()
            .map(|&i| &self.records[i])
    }

    /// Exercises matching `filter`, in insertion order.
    pub fn select(&self, filter: &ExerciseFilter) -> Vec<&ExerciseRecord> {
        let mut indices: Vec<usize> = self
            .by_group
            .iter()
            .filter(|(key, _)| {
                filter.admits_level(key.level)
                    && filter
                        .checklist_item
                        .map_or(true, |item| item == key.checklist_item)
            })
            .flat_map(|(_, ids)| ids.iter().copied())
            .filter(|&i| filter.matches(&self.records[i]))
            .collect();
        indices.sort_unstable();
        indices.into_iter().map(|i| &self.records[i]).collect()
    }

    /// Summaries of matching exercises, sorted by (level, checklist item, id).
    pub fn list(&self, filter: &ExerciseFilter) -> Vec<ExerciseSummary> {
        let mut summaries: Vec<ExerciseSummary> =
            self.select(filter).into_iter().map(ExerciseRecord::summary).collect();
        summaries.sort_by(|a, b| {
            (a.level, a.checklist_item, &a.id).cmp(&(b.level, b.checklist_item, &b.id))
        });
        summaries
    }

    /// Corpus-wide counts for matching exercises.
    pub fn stats(&self, filter: &ExerciseFilter) -> CorpusStats {
        CorpusStats::compute(self.select(filter))
    }

    /// Distinct verbs among matching exercises, sorted.
    pub fn verbs(&self, filter: &ExerciseFilter) -> Vec<String> {
        self.select(filter)
            .into_iter()
            .map(|r| r.verb.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use crate::model::{ChecklistItem, Level, TaskType};
    use serde_json::{json, Value};

    fn mc(id: &str, level: &str, item: &str, verb: &str) -> Value {
        json!({
            "id": id,
            "level": level,
            "verb": verb,
            "checklist_item": item,
            "task_type": "multiple_choice",
            "sentence": "Ich helfe … Mann.",
            "solution": "dem",
            "choices": ["dem", "den", "der"]
        })
    }

    fn fixture() -> Vec<RawGroup> {
        vec![
            RawGroup::new(
                Level::A2_1,
                ChecklistItem::Kasus,
                vec![
                    mc("a21-k-2", "A2.1", "kasus", "helfen"),
                    mc("a21-k-1", "A2.1", "kasus", "danken"),
                ],
            ),
            RawGroup::new(
                Level::A2_2,
                ChecklistItem::Trennbar,
                vec![mc("a22-t-1", "A2.2", "trennbar", "anrufen")],
            ),
            RawGroup::new(
                Level::B1_1,
                ChecklistItem::Kasus,
                vec![mc("b11-k-1", "B1.1", "kasus", "helfen")],
            ),
        ]
    }

    #[test]
    fn builds_and_indexes() {
        let corpus = ValidatedCorpus::build(&fixture()).unwrap();
        assert_eq!(corpus.len(), 4);
        assert_eq!(corpus.get("a22-t-1").unwrap().verb, "anrufen");
        assert!(corpus.get("missing").is_none());
        let key = GroupKey {
            level: Level::A2_1,
            checklist_item: ChecklistItem::Kasus,
        };
        let ids: Vec<&str> = corpus.group(key).map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a21-k-2", "a21-k-1"]);
    }

    #[test]
    fn select_keeps_insertion_order() {
        let corpus = ValidatedCorpus::build(&fixture()).unwrap();
        let ids: Vec<&str> = corpus
            .select(&ExerciseFilter::default().checklist_item(ChecklistItem::Kasus))
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a21-k-2", "a21-k-1", "b11-k-1"]);
    }

    #[test]
    fn select_with_previous_levels_and_verbs() {
        let corpus = ValidatedCorpus::build(&fixture()).unwrap();
        let filter = ExerciseFilter {
            level: Some(Level::A2_2),
            include_previous_levels: true,
            ..Default::default()
        };
        assert_eq!(corpus.select(&filter).len(), 3);

        let filter = ExerciseFilter {
            verbs: vec!["helfen".into()],
            ..Default::default()
        };
        assert_eq!(corpus.select(&filter).len(), 2);
    }

    #[test]
    fn list_is_sorted() {
        let corpus = ValidatedCorpus::build(&fixture()).unwrap();
        let ids: Vec<String> = corpus
            .list(&ExerciseFilter::default())
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["a21-k-1", "a21-k-2", "a22-t-1", "b11-k-1"]);
    }

    #[test]
    fn stats_and_verbs() {
        let corpus = ValidatedCorpus::build(&fixture()).unwrap();
        let stats = corpus.stats(&ExerciseFilter::default());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_checklist_item[&ChecklistItem::Kasus], 3);
        assert_eq!(stats.by_task_type[&TaskType::MultipleChoice], 4);
        assert_eq!(
            corpus.verbs(&ExerciseFilter::default()),
            vec!["anrufen", "danken", "helfen"]
        );
    }

    #[test]
    fn ids_are_pairwise_distinct() {
        let corpus = ValidatedCorpus::build(&fixture()).unwrap();
        let ids: BTreeSet<&str> = corpus.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), corpus.len());
    }

    #[test]
    fn reports_schema_and_integrity_errors_together() {
        let mut groups = fixture();
        groups[0].records.push(json!({"id": "a21-k-1", "level": "A2.1"}));
        groups[1].records.push(mc("a21-k-2", "A2.2", "kasus", "helfen"));

        let err = ValidatedCorpus::build(&groups).unwrap_err();
        assert!(err.count_of(ValidationErrorKind::SchemaMismatch) >= 4);
        assert_eq!(err.count_of(ValidationErrorKind::DuplicateId), 1);
        assert_eq!(err.count_of(ValidationErrorKind::ChecklistMismatch), 1);
    }

    #[test]
    fn loads_from_source() {
        let corpus = ValidatedCorpus::load(&fixture()).unwrap().unwrap();
        assert_eq!(corpus.len(), 4);
    }

    #[test]
    fn empty_source_builds_empty_corpus() {
        let corpus = ValidatedCorpus::build(&[]).unwrap();
        assert!(corpus.is_empty());
    }
}
