//! JSON exercise file loading.
//!
//! Reads raw exercise groups from the on-disk layout
//! `<data_dir>/exercises/<level_dir>/<checklist_item>.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::model::{ChecklistItem, GroupKey, Level};
use crate::traits::CorpusSource;

/// An ordered sequence of raw records supplied for one (level, checklist item).
#[derive(Debug, Clone, PartialEq)]
pub struct RawGroup {
    pub level: Level,
    pub checklist_item: ChecklistItem,
    pub records: Vec<Value>,
}

impl RawGroup {
    pub fn new(level: Level, checklist_item: ChecklistItem, records: Vec<Value>) -> Self {
        Self {
            level,
            checklist_item,
            records,
        }
    }

    pub fn key(&self) -> GroupKey {
        GroupKey {
            level: self.level,
            checklist_item: self.checklist_item,
        }
    }
}

/// Reads exercise groups from a data directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    data_dir: PathBuf,
}

impl DirectorySource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn exercises_dir(&self) -> PathBuf {
        self.data_dir.join("exercises")
    }
}

impl CorpusSource for DirectorySource {
    fn describe(&self) -> String {
        self.exercises_dir().display().to_string()
    }

    fn groups(&self) -> Result<Vec<RawGroup>> {
        load_exercise_directory(&self.exercises_dir())
    }
}

/// Parse one exercise file's contents into a group.
pub fn parse_group_str(
    content: &str,
    level: Level,
    checklist_item: ChecklistItem,
    source_path: &Path,
) -> Result<RawGroup> {
    let parsed: Value = serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?;

    let Value::Array(records) = parsed else {
        anyhow::bail!(
            "exercise file must contain a JSON array: {}",
            source_path.display()
        );
    };

    Ok(RawGroup::new(level, checklist_item, records))
}

/// Load every group under an `exercises/` directory, in sorted path order.
pub fn load_exercise_directory(dir: &Path) -> Result<Vec<RawGroup>> {
    if !dir.is_dir() {
        anyhow::bail!("exercises directory not found: {}", dir.display());
    }

    let mut groups = Vec::new();
    for level_dir in sorted_entries(dir)? {
        if !level_dir.is_dir() {
            continue;
        }
        let dir_name = file_name(&level_dir);
        let level = Level::from_dir_name(&dir_name).with_context(|| {
            format!(
                "unknown level directory: {} (expected one of {})",
                level_dir.display(),
                Level::ALL.map(Level::dir_name).join(", ")
            )
        })?;

        for path in sorted_entries(&level_dir)? {
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let checklist_item: ChecklistItem = stem.parse().map_err(|e: String| {
                anyhow::anyhow!("unexpected exercise file {}: {e}", path.display())
            })?;

            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read exercise file: {}", path.display()))?;
            let group = parse_group_str(&content, level, checklist_item, &path)?;
            tracing::debug!(
                "loaded {} raw record(s) from {}",
                group.records.len(),
                path.display()
            );
            groups.push(group);
        }
    }

    Ok(groups)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("failed to list directory: {}", dir.display()))?;
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
