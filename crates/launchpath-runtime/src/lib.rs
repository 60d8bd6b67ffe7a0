//! Operating system adapters for launchpath.
//!
//! This crate implements the ports defined in `launchpath-core`:
//!
//! - `TokioCommandRunner`: runs probes and lookups as tokio child processes
//!   under a hard timeout, killing them on expiry
//! - `SystemFs`: `std::fs` existence checks and directory listings
//! - `SystemEnv`: the real process environment
//!
//! It also detects the resource directory of a packaged desktop distribution.

mod env;
mod fs;
mod packaging;
mod process;

pub use env::SystemEnv;
pub use fs::SystemFs;
pub use packaging::{detect_resources_dir, resources_dir_for_exe};
pub use process::TokioCommandRunner;
