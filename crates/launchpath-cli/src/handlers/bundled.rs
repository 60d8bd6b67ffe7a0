//! `bundled` command handler.

use anyhow::{Context, Result};

use crate::bootstrap::CliContext;
use crate::presentation::format_bundled;

pub fn execute(ctx: &CliContext, json: bool) -> Result<()> {
    let servers = ctx.resolver().bundled_servers();
    if json {
        let rendered =
            serde_json::to_string_pretty(&servers).context("Failed to serialize bundled servers")?;
        println!("{rendered}");
    } else {
        print!("{}", format_bundled(&servers));
    }
    Ok(())
}
