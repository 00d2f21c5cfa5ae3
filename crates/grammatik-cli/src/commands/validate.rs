//! The `grammatik validate` command.

use anyhow::Result;

use grammatik_core::model::{ChecklistItem, GroupKey, Level};

use super::{load_corpus, Globals};

pub fn execute(globals: &Globals) -> Result<()> {
    let config = globals.config()?;
    let corpus = load_corpus(&config)?;

    let mut groups = 0;
    for level in Level::ALL {
        for checklist_item in ChecklistItem::ALL {
            let count = corpus
                .group(GroupKey {
                    level,
                    checklist_item,
                })
                .count();
            if count > 0 {
                groups += 1;
                println!("{level}/{checklist_item}: {count} exercise(s)");
            }
        }
    }

    println!(
        "\nCorpus valid: {} exercise(s) in {groups} group(s).",
        corpus.len()
    );
    Ok(())
}
