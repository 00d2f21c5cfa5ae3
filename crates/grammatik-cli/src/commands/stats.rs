//! The `grammatik stats` command.

use std::collections::BTreeMap;
use std::fmt::Display;

use anyhow::Result;
use comfy_table::{Cell, Table};

use grammatik_core::statistics::share;

use super::{load_corpus, Globals};
use crate::FilterArgs;

pub fn execute(globals: &Globals, filter_args: &FilterArgs, json: bool) -> Result<()> {
    let config = globals.config()?;
    let corpus = load_corpus(&config)?;
    let filter = filter_args.to_filter(config.include_previous_levels);

    let stats = corpus.stats(&filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Total exercises: {}", stats.total);
    print_counts("Level", &stats.by_level, stats.total);
    print_counts("Checklist", &stats.by_checklist_item, stats.total);
    print_counts("Task", &stats.by_task_type, stats.total);

    let verbs = corpus.verbs(&filter);
    if !verbs.is_empty() {
        println!("\nVerbs ({}): {}", verbs.len(), verbs.join(", "));
    }

    Ok(())
}

fn print_counts<K: Display>(header: &str, counts: &BTreeMap<K, usize>, total: usize) {
    if counts.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header, "Exercises", "Share"]);
    for (key, count) in counts {
        let fraction = share(*count, total);
        table.add_row(vec![
            Cell::new(key),
            Cell::new(count),
            Cell::new(format!("{:.1}%", fraction * 100.0)),
        ]);
    }
    println!("\n{table}");
}
