//! Subcommand implementations, one module per command.

use std::path::PathBuf;

use anyhow::Result;

use grammatik_core::config::{load_config_from, GrammatikConfig};
use grammatik_core::corpus::ValidatedCorpus;
use grammatik_core::source::DirectorySource;

pub mod init;
pub mod list;
pub mod practice;
pub mod schema;
pub mod stats;
pub mod validate;

/// Options accepted by every subcommand.
pub struct Globals {
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl Globals {
    /// Load the config file, with `--data-dir` taking precedence.
    pub fn config(&self) -> Result<GrammatikConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        Ok(config)
    }
}

/// Load and validate the corpus. Any validation failure aborts with the
/// full error list.
pub fn load_corpus(config: &GrammatikConfig) -> Result<ValidatedCorpus> {
    let source = DirectorySource::new(config.data_dir.clone());
    let corpus = ValidatedCorpus::load(&source)??;
    Ok(corpus)
}
