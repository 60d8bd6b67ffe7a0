//! Root CLI parser and global options.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Commands;

/// Resolve how external tool commands can be launched on this machine.
///
/// Global options override the matching `LAUNCHPATH_*` environment variables.
#[derive(Parser)]
#[command(name = "launchpath")]
#[command(about = "Resolve commands for launching tool servers, with fallbacks")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Hard limit for each availability probe
    #[arg(long = "probe-timeout-ms", global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub probe_timeout_ms: Option<u64>,

    /// Hard limit for the which/where lookup
    #[arg(long = "lookup-timeout-ms", global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub lookup_timeout_ms: Option<u64>,

    /// Interpreter used to run bundled entry points
    #[arg(long = "runtime", global = true)]
    pub runtime: Option<String>,

    /// Extra directory to search after the well-known locations (repeatable)
    #[arg(long = "search-dir", global = true)]
    pub search_dirs: Vec<String>,

    /// Resource directory of a packaged distribution
    #[arg(long = "resources-dir", global = true)]
    pub resources_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
