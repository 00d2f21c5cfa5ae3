//! The `grammatik schema` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    let contract = grammatik_core::schema::contract();
    println!("{}", serde_json::to_string_pretty(&contract)?);
    Ok(())
}
