//! The `grammatik practice` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use grammatik_core::error::SessionError;
use grammatik_core::matcher::Verdict;
use grammatik_core::model::{Answer, ExerciseRecord, Solution, TaskType};
use grammatik_core::report::SessionSummary;
use grammatik_core::session::PracticeSession;

use super::{load_corpus, Globals};
use crate::FilterArgs;

pub struct PracticeOptions {
    pub shuffle: bool,
    pub interleave_verbs: bool,
    pub seed: Option<u64>,
    pub time_budget: Option<u64>,
    pub show_hints: bool,
    pub output: Option<PathBuf>,
}

pub fn execute(globals: &Globals, filter_args: &FilterArgs, options: PracticeOptions) -> Result<()> {
    let mut config = globals.config()?;
    config.shuffle |= options.shuffle;
    config.interleave_verbs |= options.interleave_verbs;
    config.show_hints |= options.show_hints;
    if options.time_budget.is_some() {
        config.time_budget_secs = options.time_budget;
    }
    if let Some(secs) = config.time_budget_secs {
        anyhow::ensure!(secs >= 1, "time budget must be at least 1 second");
    }

    let corpus = load_corpus(&config)?;
    let filter = filter_args.to_filter(config.include_previous_levels);

    let seed = options.seed.or(config.seed).unwrap_or_else(rand::random);
    let session_config = config.session_config(seed);
    if session_config.order.seed().is_some() {
        tracing::info!("shuffle seed: {seed}");
    }

    let mut session = PracticeSession::new(&corpus, session_config);
    let total = session.load(filter)?;
    println!("{total} exercise(s) queued. Press Ctrl-D to stop early.\n");

    let stdin = io::stdin();
    run_loop(&mut session, stdin.lock(), config.show_hints)?;

    let summary = session.finalize()?;
    print_summary(&summary);

    if let Some(path) = &options.output {
        summary.save_json(path)?;
        eprintln!("Summary saved to: {}", path.display());
    }

    Ok(())
}

/// Serve exercises until the queue is exhausted or input ends.
fn run_loop(session: &mut PracticeSession<'_>, input: impl BufRead, show_hints: bool) -> Result<()> {
    let mut lines = input.lines();
    loop {
        let record = match session.next() {
            Ok(record) => record,
            Err(SessionError::SessionCompleted) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        if let Some(progress) = session.progress() {
            println!(
                "[{}/{}] {} · {} · {} ({})",
                progress.position,
                progress.total,
                record.level,
                record.checklist_item,
                record.task_type,
                record.verb
            );
        }
        print_prompt(record);
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let answer = parse_answer(record, &line?);
        let submission = session.submit(&answer)?;

        match submission.outcome.verdict {
            Verdict::Correct => println!("Correct!"),
            verdict => println!(
                "{}. Solution: {}",
                capitalize(&verdict.to_string()),
                submission.outcome.solution
            ),
        }
        if show_hints {
            if let Some(english) = &record.english {
                println!("  EN: {english}");
            }
            if let Some(hint) = &record.hint {
                println!("  Hint: {hint}");
            }
        }
        println!();
    }
}

fn print_prompt(record: &ExerciseRecord) {
    println!("  {}", record.sentence);
    if let Some(choices) = &record.choices {
        for (i, choice) in choices.iter().enumerate() {
            println!("  {}) {choice}", i + 1);
        }
    }
    match (record.task_type, &record.solution) {
        (TaskType::FillBlank, Solution::Sequence(parts)) => {
            println!("  ({} blanks, separate answers with commas)", parts.len());
        }
        (TaskType::Reorder, _) => println!("  (type the words in order)"),
        _ => {}
    }
}

/// Turn one input line into an answer shaped like the exercise's solution.
///
/// Multiple-choice input may be the 1-based choice number or the choice
/// text. Multi-blank answers are comma-separated; reorder answers may also be
/// separated by whitespace.
fn parse_answer(record: &ExerciseRecord, line: &str) -> Answer {
    if let Some(choices) = &record.choices {
        let picked = line
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| choices.get(i));
        return match picked {
            Some(choice) => Answer::Single(choice.clone()),
            None => Answer::Single(line.to_string()),
        };
    }

    if record.solution.arity() == 1 {
        return Answer::Single(line.to_string());
    }

    let parts: Vec<String> = if record.task_type == TaskType::Reorder && !line.contains(',') {
        line.split_whitespace().map(str::to_string).collect()
    } else {
        line.split(',').map(str::to_string).collect()
    };
    Answer::Sequence(parts)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn print_summary(summary: &SessionSummary) {
    println!(
        "Score: {}/{} correct ({:.1}%), {} of {} exercise(s) attempted",
        summary.correct,
        summary.attempted,
        summary.accuracy * 100.0,
        summary.attempted,
        summary.queue_len
    );
    if summary.timeouts > 0 {
        println!("Timed out: {}", summary.timeouts);
    }
    if let Some(seed) = summary.seed {
        println!("Seed: {seed}");
    }

    if summary.by_checklist_item.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["Checklist", "Attempted", "Correct", "Accuracy"]);
    for (item, breakdown) in &summary.by_checklist_item {
        table.add_row(vec![
            Cell::new(item),
            Cell::new(breakdown.attempted),
            Cell::new(breakdown.correct),
            Cell::new(format!("{:.1}%", breakdown.accuracy * 100.0)),
        ]);
    }
    println!("\n{table}");
}
