//! Core data model types for grammatik.
//!
//! These are the fundamental types that the whole system uses to represent
//! authored exercises, their grammar dimensions, and the filters applied to
//! them.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// CEFR levels covered by the corpus, in teaching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "A2.1")]
    A2_1,
    #[serde(rename = "A2.2")]
    A2_2,
    #[serde(rename = "B1.1")]
    B1_1,
    #[serde(rename = "B1.2")]
    B1_2,
}

impl Level {
    /// Every level, lowest first.
    pub const ALL: [Level; 4] = [Level::A2_1, Level::A2_2, Level::B1_1, Level::B1_2];

    /// Accepted spellings, in the same order as [`Level::ALL`].
    pub const VALUES: [&'static str; 4] = ["A2.1", "A2.2", "B1.1", "B1.2"];

    const DIR_NAMES: [&'static str; 4] = ["a2_1", "a2_2", "b1_1", "b1_2"];

    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        Self::VALUES[self.index()]
    }

    /// Directory name used by the on-disk corpus layout (e.g. `a2_1`).
    pub fn dir_name(self) -> &'static str {
        Self::DIR_NAMES[self.index()]
    }

    pub fn from_dir_name(name: &str) -> Option<Level> {
        let name = name.to_ascii_lowercase();
        Self::DIR_NAMES
            .iter()
            .position(|d| *d == name)
            .map(|i| Self::ALL[i])
    }

    /// Levels strictly below this one.
    pub fn previous(self) -> &'static [Level] {
        &Self::ALL[..self.index()]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::VALUES
            .iter()
            .position(|v| v.eq_ignore_ascii_case(s))
            .map(|i| Self::ALL[i])
            .ok_or_else(|| format!("unknown level: {s} (expected one of {})", Self::VALUES.join(", ")))
    }
}

/// The grammar dimension an exercise targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistItem {
    Kasus,
    Trennbar,
    Praeposition,
    Reflexiv,
    PartizipIi,
}

impl ChecklistItem {
    pub const ALL: [ChecklistItem; 5] = [
        ChecklistItem::Kasus,
        ChecklistItem::Trennbar,
        ChecklistItem::Praeposition,
        ChecklistItem::Reflexiv,
        ChecklistItem::PartizipIi,
    ];

    pub const VALUES: [&'static str; 5] =
        ["kasus", "trennbar", "praeposition", "reflexiv", "partizip_ii"];

    pub fn as_str(self) -> &'static str {
        Self::VALUES[self as usize]
    }
}

impl fmt::Display for ChecklistItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecklistItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::VALUES
            .iter()
            .position(|v| *v == s)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| {
                format!(
                    "unknown checklist item: {s} (expected one of {})",
                    Self::VALUES.join(", ")
                )
            })
    }
}

/// How the learner answers an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    FillBlank,
    MultipleChoice,
    Reorder,
}

impl TaskType {
    pub const ALL: [TaskType; 3] = [TaskType::FillBlank, TaskType::MultipleChoice, TaskType::Reorder];

    pub const VALUES: [&'static str; 3] = ["fill_blank", "multiple_choice", "reorder"];

    pub fn as_str(self) -> &'static str {
        Self::VALUES[self as usize]
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::VALUES
            .iter()
            .position(|v| *v == s)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| {
                format!("unknown task type: {s} (expected one of {})", Self::VALUES.join(", "))
            })
    }
}

/// The literal placeholder marking a position the learner must fill.
pub const BLANK_MARKER: &str = "__";

/// Count blanks in a sentence. A blank is a maximal run of two or more
/// underscores, so `"___"`, `"ein__"` and `"gut__"` each count once.
pub fn count_blanks(sentence: &str) -> usize {
    let mut blanks = 0;
    let mut run = 0usize;
    for ch in sentence.chars().chain(std::iter::once(' ')) {
        if ch == '_' {
            run += 1;
        } else {
            if run >= BLANK_MARKER.len() {
                blanks += 1;
            }
            run = 0;
        }
    }
    blanks
}

/// The canonical solution of an exercise: one surface form, or one per blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Solution {
    Single(String),
    Sequence(Vec<String>),
}

impl Solution {
    /// Number of answer positions this solution expects.
    pub fn arity(&self) -> usize {
        match self {
            Solution::Single(_) => 1,
            Solution::Sequence(parts) => parts.len(),
        }
    }

    pub fn parts(&self) -> Vec<&str> {
        match self {
            Solution::Single(s) => vec![s.as_str()],
            Solution::Sequence(parts) => parts.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solution::Single(s) => f.write_str(s),
            Solution::Sequence(parts) => f.write_str(&parts.join(", ")),
        }
    }
}

/// A learner's candidate answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Sequence(Vec<String>),
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Answer::Single(s.to_string())
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Answer::Single(s)
    }
}

impl From<Vec<String>> for Answer {
    fn from(parts: Vec<String>) -> Self {
        Answer::Sequence(parts)
    }
}

impl From<Vec<&str>> for Answer {
    fn from(parts: Vec<&str>) -> Self {
        Answer::Sequence(parts.into_iter().map(str::to_string).collect())
    }
}

/// One authored drill item, after schema validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Globally unique identifier.
    pub id: String,
    pub level: Level,
    /// Display-only.
    pub verb: String,
    #[serde(alias = "checklistItem")]
    pub checklist_item: ChecklistItem,
    #[serde(alias = "taskType")]
    pub task_type: TaskType,
    /// Carries the blank marker for `fill_blank` tasks.
    pub sentence: String,
    pub solution: Solution,
    /// Present iff the task is `multiple_choice`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl ExerciseRecord {
    pub fn group(&self) -> GroupKey {
        GroupKey {
            level: self.level,
            checklist_item: self.checklist_item,
        }
    }

    pub fn summary(&self) -> ExerciseSummary {
        ExerciseSummary {
            id: self.id.clone(),
            level: self.level,
            verb: self.verb.clone(),
            checklist_item: self.checklist_item,
            task_type: self.task_type,
        }
    }
}

/// The (level, checklist item) pair under which records are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub level: Level,
    pub checklist_item: ChecklistItem,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.level, self.checklist_item)
    }
}

/// Where a raw record came from: its source group and position in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOrigin {
    pub group: GroupKey,
    pub index: usize,
}

impl fmt::Display for RecordOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.group, self.index)
    }
}

/// Compact listing view of an exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSummary {
    pub id: String,
    pub level: Level,
    pub verb: String,
    pub checklist_item: ChecklistItem,
    pub task_type: TaskType,
}

/// Selects a subset of the corpus. Absent fields mean "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub level: Option<Level>,
    pub checklist_item: Option<ChecklistItem>,
    /// With a level set, also admit every earlier level.
    pub include_previous_levels: bool,
    /// Restrict to these verbs when non-empty.
    pub verbs: Vec<String>,
}

impl ExerciseFilter {
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn checklist_item(mut self, item: ChecklistItem) -> Self {
        self.checklist_item = Some(item);
        self
    }

    pub fn include_previous_levels(mut self, include: bool) -> Self {
        self.include_previous_levels = include;
        self
    }

    pub fn admits_level(&self, level: Level) -> bool {
        match self.level {
            None => true,
            Some(wanted) if self.include_previous_levels => level <= wanted,
            Some(wanted) => level == wanted,
        }
    }

    pub fn matches(&self, record: &ExerciseRecord) -> bool {
        self.admits_level(record.level)
            && self
                .checklist_item
                .map_or(true, |item| item == record.checklist_item)
            && (self.verbs.is_empty() || self.verbs.iter().any(|v| *v == record.verb))
    }
}
