//! Core domain types and port definitions for launchpath.
//!
//! This crate holds everything the resolution engine needs to talk about
//! without touching the operating system:
//!
//! - `domain`: resolutions, bundled server entries, installation guidance
//! - `ports`: traits for process spawning, filesystem and environment access
//! - `platform`: OS model used to pick locate commands and path separators
//! - `config`: resolver configuration with environment overrides
//!
//! Concrete adapters live in `launchpath-runtime`. Enable the `test-utils`
//! feature for in-memory fakes of every port.

pub mod config;
pub mod domain;
pub mod platform;
pub mod ports;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use config::{ConfigError, ResolverConfig};
pub use domain::{
    BundledServerEntry, CommandResolution, FallbackUsed, InstallAction, InstallationInstructions,
    bundled_key, cache_key,
};
pub use platform::Platform;
pub use ports::{
    CommandRunner, EnvProvider, FsProvider, ProcessError, ProcessOutput, RunOptions,
};
