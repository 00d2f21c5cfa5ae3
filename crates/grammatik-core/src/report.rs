//! Session summary with JSON persistence.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::ChecklistItem;
use crate::session::ResultEntry;
use crate::statistics::ItemBreakdown;

/// Immutable summary of a finished practice session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Unique session identifier.
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Shuffle seed, when the queue was shuffled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Number of exercises queued for the session.
    pub queue_len: usize,
    pub attempted: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Incorrect verdicts caused by the time budget.
    pub timeouts: usize,
    /// `correct / attempted`, 0.0 when nothing was attempted.
    pub accuracy: f64,
    pub by_checklist_item: BTreeMap<ChecklistItem, ItemBreakdown>,
    /// Result log in submission order.
    pub results: Vec<ResultEntry>,
}

impl SessionSummary {
    /// Save the summary as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize summary")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        Ok(())
    }

    /// Load a summary from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read summary from {}", path.display()))?;
        let summary: SessionSummary =
            serde_json::from_str(&content).context("failed to parse summary JSON")?;
        Ok(summary)
    }

    /// True when every queued exercise was answered.
    pub fn is_complete(&self) -> bool {
        self.attempted == self.queue_len
    }
}
