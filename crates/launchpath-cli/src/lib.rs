//! `launchpath` command-line adapter.
//!
//! Wires the OS adapters from `launchpath-runtime` into a
//! `launchpath_resolver::Resolver` and exposes it as subcommands:
//!
//! - `resolve <cmd> [args..]`: how the command would be launched
//! - `bundled`: adapter packages shipped with this installation
//! - `instructions <cmd>`: installation guidance
//! - `candidates <cmd>`: every fallback location checked, with outcomes

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
