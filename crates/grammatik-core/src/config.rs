//! Configuration file loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::{QueueOrder, SessionConfig};

/// Top-level grammatik configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammatikConfig {
    /// Directory containing `exercises/`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Shuffle the session queue.
    #[serde(default)]
    pub shuffle: bool,
    /// Shuffle while keeping the same verb from being served twice in a row.
    #[serde(default)]
    pub interleave_verbs: bool,
    /// Shuffle seed; a random one is chosen when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Per-exercise time budget in seconds; absent disables timed mode.
    #[serde(default)]
    pub time_budget_secs: Option<u64>,
    /// With a level filter, include all earlier levels too.
    #[serde(default)]
    pub include_previous_levels: bool,
    /// Print hint and translation after each answer.
    #[serde(default)]
    pub show_hints: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for GrammatikConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            shuffle: false,
            interleave_verbs: false,
            seed: None,
            time_budget_secs: None,
            include_previous_levels: false,
            show_hints: false,
        }
    }
}

impl GrammatikConfig {
    /// Session settings, given the seed to use if shuffling.
    pub fn session_config(&self, seed: u64) -> SessionConfig {
        SessionConfig {
            order: if self.interleave_verbs {
                QueueOrder::VerbInterleaved { seed }
            } else if self.shuffle {
                QueueOrder::Shuffled { seed }
            } else {
                QueueOrder::Insertion
            },
            time_budget: self.time_budget_secs.map(Duration::from_secs),
        }
    }
}

/// Expand `${VAR}` references from the environment. Unset variables expand
/// to nothing; substituted values are not expanded again.
fn resolve_env_vars(input: &str) -> String {
    let mut resolved = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        resolved.push_str(&rest[..start]);
        let name = &rest[start + 2..start + 2 + len];
        resolved.push_str(&std::env::var(name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    resolved.push_str(rest);
    resolved
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `grammatik.toml` in the current directory
/// 2. `~/.config/grammatik/config.toml`
///
/// Environment variable overrides: `GRAMMATIK_DATA_DIR`, `GRAMMATIK_SEED`.
pub fn load_config() -> Result<GrammatikConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GrammatikConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("grammatik.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => GrammatikConfig::default(),
    };

    if let Ok(dir) = std::env::var("GRAMMATIK_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Ok(seed) = std::env::var("GRAMMATIK_SEED") {
        config.seed = Some(
            seed.trim()
                .parse()
                .with_context(|| format!("GRAMMATIK_SEED is not a valid u64: {seed}"))?,
        );
    }

    Ok(config)
}

/// Parse config TOML, resolving `${VAR}` references in the data directory.
pub fn parse_config_str(content: &str) -> Result<GrammatikConfig> {
    let mut config: GrammatikConfig = toml::from_str(content)?;
    config.data_dir = PathBuf::from(resolve_env_vars(&config.data_dir.to_string_lossy()));
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("grammatik"))
}
