//! `instructions` command handler.

use anyhow::{Context, Result};
use launchpath_resolver::installation_instructions;

use crate::presentation::format_instructions;

/// Print installation guidance. Needs no resolver: the guidance is static.
pub fn execute(command: &str, json: bool) -> Result<()> {
    let instructions = installation_instructions(command);
    if json {
        let rendered = serde_json::to_string_pretty(&instructions)
            .context("Failed to serialize installation instructions")?;
        println!("{rendered}");
    } else {
        print!("{}", format_instructions(&instructions));
    }
    Ok(())
}
