//! The published field contract and the per-record schema validator.
//!
//! The validator walks [`FIELD_CONTRACT`] for presence and type checks, then
//! applies the conditional rules for the record's task type from
//! [`TASK_RULES`]. All problems in a record are collected before returning.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::model::{
    count_blanks, ChecklistItem, ExerciseRecord, Level, RecordOrigin, TaskType, BLANK_MARKER,
};

/// Version of the field contract. Bump when fields or rules change.
pub const SCHEMA_VERSION: u32 = 1;

/// The JSON type a field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Enum(&'static [&'static str]),
    TextOrTextList,
    TextList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Required,
    Optional,
    /// Governed by the task rules table.
    Conditional,
}

/// One entry of the field contract.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<&'static str>,
    pub kind: FieldKind,
    pub presence: Presence,
    /// Strings (or every list element) must contain non-whitespace text.
    pub non_empty: bool,
}

const fn field(name: &'static str, kind: FieldKind, presence: Presence, non_empty: bool) -> FieldSpec {
    FieldSpec {
        name,
        alias: None,
        kind,
        presence,
        non_empty,
    }
}

/// Field contract for a raw exercise record.
pub static FIELD_CONTRACT: &[FieldSpec] = &[
    field("id", FieldKind::Text, Presence::Required, true),
    field("level", FieldKind::Enum(&Level::VALUES), Presence::Required, true),
    field("verb", FieldKind::Text, Presence::Required, true),
    FieldSpec {
        alias: Some("checklistItem"),
        ..field(
            "checklist_item",
            FieldKind::Enum(&ChecklistItem::VALUES),
            Presence::Required,
            true,
        )
    },
    FieldSpec {
        alias: Some("taskType"),
        ..field(
            "task_type",
            FieldKind::Enum(&TaskType::VALUES),
            Presence::Required,
            true,
        )
    },
    field("sentence", FieldKind::Text, Presence::Required, true),
    field("solution", FieldKind::TextOrTextList, Presence::Required, true),
    field("choices", FieldKind::TextList, Presence::Conditional, true),
    field("english", FieldKind::Text, Presence::Optional, false),
    field("hint", FieldKind::Text, Presence::Optional, false),
    field("tags", FieldKind::TextList, Presence::Optional, false),
];

/// Conditional requirements for one task type.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TaskRules {
    pub task_type: TaskType,
    /// `choices` must be present (and is forbidden otherwise).
    pub requires_choices: bool,
    /// `sentence` must contain the blank marker (and must not otherwise).
    pub requires_blank: bool,
    /// `solution` must be a single string.
    pub single_solution: bool,
}

/// One row per task type. Adding a task type is a one-line edit here.
pub static TASK_RULES: &[TaskRules] = &[
    TaskRules {
        task_type: TaskType::FillBlank,
        requires_choices: false,
        requires_blank: true,
        single_solution: false,
    },
    TaskRules {
        task_type: TaskType::MultipleChoice,
        requires_choices: true,
        requires_blank: false,
        single_solution: true,
    },
    TaskRules {
        task_type: TaskType::Reorder,
        requires_choices: false,
        requires_blank: false,
        single_solution: false,
    },
];

pub fn rules_for(task_type: TaskType) -> Option<&'static TaskRules> {
    TASK_RULES.iter().find(|r| r.task_type == task_type)
}

/// The complete published contract.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaContract {
    pub version: u32,
    pub blank_marker: &'static str,
    pub fields: &'static [FieldSpec],
    pub task_rules: &'static [TaskRules],
}

pub fn contract() -> SchemaContract {
    SchemaContract {
        version: SCHEMA_VERSION,
        blank_marker: BLANK_MARKER,
        fields: FIELD_CONTRACT,
        task_rules: TASK_RULES,
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl FieldKind {
    /// Check a present value against this kind.
    fn check(self, value: &Value, non_empty: bool) -> Result<(), String> {
        match (self, value) {
            (FieldKind::Text, Value::String(s)) => {
                if non_empty && is_blank(s) {
                    Err("must not be empty".into())
                } else {
                    Ok(())
                }
            }
            (FieldKind::Enum(values), Value::String(s)) => {
                if values.contains(&s.as_str()) {
                    Ok(())
                } else {
                    Err(format!("`{s}` is not one of {}", values.join(", ")))
                }
            }
            (FieldKind::TextOrTextList, Value::String(_)) => FieldKind::Text.check(value, non_empty),
            (FieldKind::TextOrTextList, Value::Array(_)) => FieldKind::TextList.check(value, non_empty),
            (FieldKind::TextList, Value::Array(items)) => {
                if non_empty && items.is_empty() {
                    return Err("must contain at least one element".into());
                }
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Value::String(s) if non_empty && is_blank(s) => {
                            return Err(format!("element {i} must not be empty"));
                        }
                        Value::String(_) => {}
                        other => {
                            return Err(format!(
                                "element {i} must be a string, found {}",
                                json_type(other)
                            ));
                        }
                    }
                }
                Ok(())
            }
            (kind, other) => Err(format!("expected {}, found {}", kind.describe(), json_type(other))),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Enum(_) => "a string",
            FieldKind::TextOrTextList => "a string or an array of strings",
            FieldKind::TextList => "an array of strings",
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn lookup<'a>(obj: &'a Map<String, Value>, spec: &FieldSpec) -> Option<&'a Value> {
    obj.get(spec.name)
        .or_else(|| spec.alias.and_then(|alias| obj.get(alias)))
}

fn lookup_str<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    FIELD_CONTRACT
        .iter()
        .find(|spec| spec.name == name)
        .and_then(|spec| lookup(obj, spec))
        .and_then(Value::as_str)
}

/// Accumulates field errors for one record.
struct Collector<'a> {
    origin: &'a RecordOrigin,
    record_id: Option<String>,
    errors: Vec<ValidationError>,
}

impl Collector<'_> {
    fn fail(&mut self, field: &str, reason: impl Into<String>) {
        self.errors.push(ValidationError::SchemaMismatch {
            origin: *self.origin,
            record_id: self.record_id.clone(),
            field: field.to_string(),
            reason: reason.into(),
        });
    }
}

/// Validate one raw record against the field contract.
///
/// Returns every field-level error in the record rather than the first.
pub fn validate_record(
    raw: &Value,
    origin: &RecordOrigin,
) -> Result<ExerciseRecord, Vec<ValidationError>> {
    let mut c = Collector {
        origin,
        record_id: None,
        errors: Vec::new(),
    };

    let Some(obj) = raw.as_object() else {
        c.fail("<record>", format!("expected an object, found {}", json_type(raw)));
        return Err(c.errors);
    };
    c.record_id = obj.get("id").and_then(Value::as_str).map(str::to_string);

    for spec in FIELD_CONTRACT {
        match (lookup(obj, spec), spec.presence) {
            (None, Presence::Required) => c.fail(spec.name, "missing required field"),
            // Non-required fields may be null in hand-written files.
            (None, _) | (Some(Value::Null), Presence::Optional | Presence::Conditional) => {}
            (Some(value), _) => {
                if let Err(reason) = spec.kind.check(value, spec.non_empty) {
                    c.fail(spec.name, reason);
                }
            }
        }
    }

    let task_type = lookup_str(obj, "task_type").and_then(|s| s.parse::<TaskType>().ok());
    if let Some(rules) = task_type.and_then(rules_for) {
        check_task_rules(&mut c, obj, rules);
    }

    if !c.errors.is_empty() {
        return Err(c.errors);
    }

    let mut normalized = Map::new();
    for spec in FIELD_CONTRACT {
        if let Some(value) = lookup(obj, spec).filter(|v| !v.is_null()) {
            normalized.insert(spec.name.to_string(), value.clone());
        }
    }
    match serde_json::from_value::<ExerciseRecord>(Value::Object(normalized)) {
        Ok(record) => Ok(record),
        Err(e) => {
            c.fail("<record>", e.to_string());
            Err(c.errors)
        }
    }
}

fn check_task_rules(c: &mut Collector<'_>, obj: &Map<String, Value>, rules: &TaskRules) {
    let task = rules.task_type;

    let has_choices = obj.get("choices").is_some_and(|v| !v.is_null());
    match (rules.requires_choices, has_choices) {
        (true, false) => c.fail("choices", format!("required for {task} tasks")),
        (false, true) => c.fail("choices", format!("only allowed for multiple_choice tasks, not {task}")),
        _ => {}
    }

    if let Some(sentence) = lookup_str(obj, "sentence") {
        let blanks = count_blanks(sentence);
        if rules.requires_blank && blanks == 0 {
            c.fail(
                "sentence",
                format!("{task} sentence must contain the blank marker `{BLANK_MARKER}`"),
            );
        } else if !rules.requires_blank && blanks > 0 {
            c.fail(
                "sentence",
                format!("blank marker `{BLANK_MARKER}` is only allowed in fill_blank sentences"),
            );
        }
    }

    if rules.single_solution && obj.get("solution").is_some_and(Value::is_array) {
        c.fail("solution", format!("{task} solution must be a single string"));
    }
}
