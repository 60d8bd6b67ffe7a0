//! `candidates` command handler.
//!
//! Diagnostics for "works in my terminal but not in the app": lists every
//! fallback location checked for a command and why each was rejected.

use anyhow::Result;

use crate::bootstrap::CliContext;

pub async fn execute(ctx: &CliContext, command: &str) -> Result<()> {
    let report = ctx.resolver().fallback_attempts(command).await;

    println!("Fallback search for '{command}':");
    println!("{}", report.format_attempts());
    match report.found {
        Some(ref path) => println!("\nFound: {}", path.display()),
        None => println!("\nNo working fallback location found."),
    }
    Ok(())
}
