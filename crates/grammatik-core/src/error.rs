//! Load-time and session-time error types.
//!
//! Load-time errors are collected, never short-circuited: a corpus load
//! reports every [`ValidationError`] it finds through one [`CorpusLoadError`].
//! Session-time errors are ordinary recoverable outcomes for the caller.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::model::{ChecklistItem, RecordOrigin};

/// A single problem found while validating the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A record's shape does not satisfy the field contract.
    #[error("{origin} ({}): field `{field}`: {reason}", .record_id.as_deref().unwrap_or("<no id>"))]
    SchemaMismatch {
        origin: RecordOrigin,
        record_id: Option<String>,
        field: String,
        reason: String,
    },

    /// The same id appears more than once anywhere in the corpus.
    #[error("{duplicate} ({id}): duplicate id, first defined at {first}")]
    DuplicateId {
        id: String,
        first: RecordOrigin,
        duplicate: RecordOrigin,
    },

    /// The declared checklist item differs from the group the record was found in.
    #[error("{origin} ({id}): checklist_item `{declared}` does not match source group `{expected}`")]
    ChecklistMismatch {
        id: String,
        origin: RecordOrigin,
        declared: ChecklistItem,
        expected: ChecklistItem,
    },

    /// A multiple-choice solution does not appear exactly once among the choices.
    #[error("{origin} ({id}): solution appears {occurrences} time(s) in choices, expected exactly once")]
    AmbiguousSolution {
        id: String,
        origin: RecordOrigin,
        occurrences: usize,
    },

    /// A fill-blank sentence's blank count disagrees with the solution arity.
    #[error("{origin} ({id}): sentence has {blanks} blank(s) but solution has {solutions} element(s)")]
    BlankCountMismatch {
        id: String,
        origin: RecordOrigin,
        blanks: usize,
        solutions: usize,
    },

    /// A prompt without blanks already spells out the whole solution.
    #[error("{origin} ({id}): sentence gives away the full solution")]
    SolutionLeak { id: String, origin: RecordOrigin },
}

/// Discriminant of a [`ValidationError`], for grouping and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ValidationErrorKind {
    SchemaMismatch,
    DuplicateId,
    ChecklistMismatch,
    AmbiguousSolution,
    BlankCountMismatch,
    SolutionLeak,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::SchemaMismatch { .. } => ValidationErrorKind::SchemaMismatch,
            ValidationError::DuplicateId { .. } => ValidationErrorKind::DuplicateId,
            ValidationError::ChecklistMismatch { .. } => ValidationErrorKind::ChecklistMismatch,
            ValidationError::AmbiguousSolution { .. } => ValidationErrorKind::AmbiguousSolution,
            ValidationError::BlankCountMismatch { .. } => ValidationErrorKind::BlankCountMismatch,
            ValidationError::SolutionLeak { .. } => ValidationErrorKind::SolutionLeak,
        }
    }

    /// The id of the offending record, when one could be read.
    pub fn record_id(&self) -> Option<&str> {
        match self {
            ValidationError::SchemaMismatch { record_id, .. } => record_id.as_deref(),
            ValidationError::DuplicateId { id, .. }
            | ValidationError::ChecklistMismatch { id, .. }
            | ValidationError::AmbiguousSolution { id, .. }
            | ValidationError::BlankCountMismatch { id, .. }
            | ValidationError::SolutionLeak { id, .. } => Some(id),
        }
    }
}

/// The corpus failed to load. Always carries at least one error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLoadError {
    errors: Vec<ValidationError>,
}

impl CorpusLoadError {
    /// Returns `None` for an empty list: no errors means no failure.
    pub fn new(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    pub fn count_of(&self, kind: ValidationErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind() == kind).count()
    }
}

impl fmt::Display for CorpusLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "corpus failed validation with {} error(s):", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  [{}] {}", error.kind(), error)?;
        }
        Ok(())
    }
}

impl std::error::Error for CorpusLoadError {}

/// Recoverable errors returned by the practice session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The filter selected no exercises.
    #[error("no exercises match the selected filter")]
    EmptyFilterResult,

    /// The queue is exhausted or the session was finalized.
    #[error("session is completed; load a new session or reset")]
    SessionCompleted,

    /// No session has been loaded.
    #[error("no session loaded")]
    SessionNotLoaded,

    /// A session is still running; finalize or reset it before loading another.
    #[error("a session is already in progress; finalize or reset it first")]
    SessionActive,
}
