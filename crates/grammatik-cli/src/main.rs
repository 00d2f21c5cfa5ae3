//! grammatik CLI — validate the exercise corpus and run practice sessions.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use grammatik_core::model::{ChecklistItem, ExerciseFilter, Level};

mod commands;

#[derive(Parser)]
#[command(name = "grammatik", version, about = "German grammar drills (A2.1 to B1.2)")]
struct Cli {
    /// Directory containing `exercises/` (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Exercise selection shared by `list`, `stats` and `practice`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Level to practice (A2.1, A2.2, B1.1, B1.2)
    #[arg(long)]
    level: Option<Level>,

    /// Checklist item (kasus, trennbar, praeposition, reflexiv, partizip_ii)
    #[arg(long)]
    checklist: Option<ChecklistItem>,

    /// With --level, also include all earlier levels
    #[arg(long)]
    include_previous: bool,

    /// Restrict to these verbs (comma-separated)
    #[arg(long, value_delimiter = ',')]
    verb: Vec<String>,
}

impl FilterArgs {
    pub fn to_filter(&self, include_previous_default: bool) -> ExerciseFilter {
        ExerciseFilter {
            level: self.level,
            checklist_item: self.checklist,
            include_previous_levels: self.include_previous || include_previous_default,
            verbs: self.verb.iter().map(|v| v.trim().to_string()).collect(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the exercise corpus and report every error
    Validate,

    /// List exercises
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show exercise counts per level, checklist item and task type
    Stats {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Run an interactive practice session, reading answers from stdin
    Practice {
        #[command(flatten)]
        filter: FilterArgs,

        /// Shuffle the queue
        #[arg(long)]
        shuffle: bool,

        /// Shuffle without serving the same verb twice in a row
        #[arg(long)]
        interleave_verbs: bool,

        /// Shuffle seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Per-exercise time budget in seconds
        #[arg(long)]
        time_budget: Option<u64>,

        /// Show translation and hint after each answer
        #[arg(long)]
        show_hints: bool,

        /// Write the session summary as JSON to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the exercise schema contract as JSON
    Schema,

    /// Create a starter config and an example exercise file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("grammatik=info,grammatik_core=info")
            }),
        )
        .init();

    let cli = Cli::parse();
    let globals = commands::Globals {
        data_dir: cli.data_dir,
        config: cli.config,
    };

    let result = match cli.command {
        Commands::Validate => commands::validate::execute(&globals),
        Commands::List { filter, json } => commands::list::execute(&globals, &filter, json),
        Commands::Stats { filter, json } => commands::stats::execute(&globals, &filter, json),
        Commands::Practice {
            filter,
            shuffle,
            interleave_verbs,
            seed,
            time_budget,
            show_hints,
            output,
        } => commands::practice::execute(
            &globals,
            &filter,
            commands::practice::PracticeOptions {
                shuffle,
                interleave_verbs,
                seed,
                time_budget,
                show_hints,
                output,
            },
        ),
        Commands::Schema => commands::schema::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
