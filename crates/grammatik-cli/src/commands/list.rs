//! The `grammatik list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::{load_corpus, Globals};
use crate::FilterArgs;

pub fn execute(globals: &Globals, filter_args: &FilterArgs, json: bool) -> Result<()> {
    let config = globals.config()?;
    let corpus = load_corpus(&config)?;
    let filter = filter_args.to_filter(config.include_previous_levels);

    let summaries = corpus.list(&filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("No exercises match the filter.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Level", "Checklist", "Task", "Verb"]);
    for s in &summaries {
        table.add_row(vec![
            Cell::new(&s.id),
            Cell::new(s.level),
            Cell::new(s.checklist_item),
            Cell::new(s.task_type),
            Cell::new(&s.verb),
        ]);
    }
    println!("{table}");
    println!("{} exercise(s)", summaries.len());

    Ok(())
}
