//! `resolve` command handler.

use anyhow::{Context, Result};
use launchpath_resolver::effective_path;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_instructions, format_resolution};

/// Resolve `command` and print how it would be launched.
///
/// An unavailable command prints installation guidance and fails with
/// `CliError::Unavailable`.
pub async fn execute(ctx: &CliContext, command: &str, args: &[String], json: bool) -> Result<()> {
    let resolver = ctx.resolver();
    let resolution = resolver.resolve_command(command, args).await;

    if json {
        let rendered =
            serde_json::to_string_pretty(&resolution).context("Failed to serialize resolution")?;
        println!("{rendered}");
    } else {
        let config = resolver.config();
        let path = effective_path(
            &resolution,
            ctx.env.as_ref(),
            config.platform,
            &config.extra_search_dirs,
        );
        print!("{}", format_resolution(&resolution, &path));
    }

    if !resolution.available {
        if !json {
            println!();
            print!(
                "{}",
                format_instructions(&resolver.installation_instructions(command))
            );
        }
        return Err(CliError::Unavailable(command.to_string()).into());
    }
    Ok(())
}
