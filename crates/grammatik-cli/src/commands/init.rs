//! The `grammatik init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("grammatik.toml").exists() {
        println!("grammatik.toml already exists, skipping.");
    } else {
        std::fs::write("grammatik.toml", SAMPLE_CONFIG)?;
        println!("Created grammatik.toml");
    }

    std::fs::create_dir_all("data/exercises/a2_1")?;
    let example_path = Path::new("data/exercises/a2_1/kasus.json");
    if example_path.exists() {
        println!("data/exercises/a2_1/kasus.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_EXERCISES)?;
        println!("Created data/exercises/a2_1/kasus.json");
    }

    println!("\nNext steps:");
    println!("  1. Add exercise files under data/exercises/<level>/<checklist_item>.json");
    println!("  2. Run: grammatik validate");
    println!("  3. Run: grammatik practice --level A2.1");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# grammatik configuration

data_dir = "./data"
shuffle = false
# seed = 42
# time_budget_secs = 30
include_previous_levels = false
show_hints = true
"#;

const EXAMPLE_EXERCISES: &str = r#"[
  {
    "id": "a21-kasus-001",
    "level": "A2.1",
    "verb": "helfen",
    "checklist_item": "kasus",
    "task_type": "multiple_choice",
    "sentence": "Ich helfe … Mann.",
    "solution": "dem",
    "choices": ["dem", "den", "der"],
    "english": "I help the man.",
    "hint": "helfen takes the dative."
  },
  {
    "id": "a21-kasus-002",
    "level": "A2.1",
    "verb": "sehen",
    "checklist_item": "kasus",
    "task_type": "fill_blank",
    "sentence": "Ich ___ ein__ gut__ Film.",
    "solution": ["sehe", "einen", "guten"],
    "english": "I see a good film."
  }
]
"#;
