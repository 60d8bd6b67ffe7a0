//! CLI entry point.
//!
//! Loads `.env`, installs logging, bootstraps the resolver and dispatches to
//! a handler. Errors map to exit codes through `CliError`.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use launchpath_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before reading RUST_LOG or LAUNCHPATH_* variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            // Unavailable commands already printed their guidance
            if !matches!(e.downcast_ref::<CliError>(), Some(CliError::Unavailable(_))) {
                eprintln!("Error: {e:#}");
            }
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);
    match cli.command {
        Commands::Resolve {
            json,
            ref command,
            ref args,
        } => {
            let ctx = bootstrap(&config)?;
            handlers::resolve::execute(&ctx, command, args, json).await
        }
        Commands::Bundled { json } => handlers::bundled::execute(&bootstrap(&config)?, json),
        Commands::Instructions { json, ref command } => {
            handlers::instructions::execute(command, json)
        }
        Commands::Candidates { ref command } => {
            let ctx = bootstrap(&config)?;
            handlers::candidates::execute(&ctx, command).await
        }
    }
}

/// Logs go to stderr so `--json` output stays machine-readable.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
