//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the resolver expects from the operating
//! system. They contain no implementation details.
//!
//! # Design Rules
//!
//! - No `tokio::process` or `std::fs` types in any signature
//! - Every port is object-safe and `Send + Sync` so a resolver can be shared
//! - Failures are values: runners return `ProcessError`, filesystem listings
//!   return `io::Result`

pub mod env;
pub mod fs;
pub mod process;

pub use env::EnvProvider;
pub use fs::FsProvider;
pub use process::{CommandRunner, ProcessError, ProcessOutput, RunOptions};
