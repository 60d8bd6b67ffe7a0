//! Command resolution and fallback engine.
//!
//! Given a command and its arguments, [`Resolver`] decides whether the
//! command can be launched as is, through a locally bundled copy of the
//! package it runs, or from an install location missing from `PATH`.
//! Results are cached per `(command, args)` for the resolver's lifetime.
//!
//! ## Architecture
//!
//! - `probe`: does a command start and exit 0?
//! - `lookup`: `which`/`where` for the absolute path
//! - `fallback`: ordered search of PATH and well-known install locations
//! - `registry`: adapter packages shipped with the host
//! - `cache`: resolutions keyed by command and arguments
//! - `resolver`: orchestration
//! - `instructions`: guidance for commands that cannot be resolved
//! - `launch`: `PATH` for the launched child
//!
//! All OS access goes through the ports in `launchpath-core`, so the whole
//! engine runs against in-memory fakes in tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let resolver = Resolver::new(runner, fs, env, ResolverConfig::default());
//! let resolution = resolver
//!     .resolve_command("npx", &["-y".into(), "@modelcontextprotocol/server-memory".into()])
//!     .await;
//! if !resolution.available {
//!     let help = resolver.installation_instructions("npx");
//!     eprintln!("{}: {}", help.title, help.message);
//! }
//! ```

mod cache;
mod error;
pub mod fallback;
mod instructions;
mod launch;
mod lookup;
mod probe;
mod registry;
mod resolver;

pub use cache::ResolutionCache;
pub use error::ResolveError;
pub use fallback::{Attempt, AttemptOutcome, FallbackPathSearch, SearchReport};
pub use instructions::installation_instructions;
pub use launch::effective_path;
pub use lookup::{PathLookup, first_path_line};
pub use probe::AvailabilityProbe;
pub use registry::{BUNDLED_PACKAGES, BundledPackage, BundledRegistry, PackageIdentity};
pub use resolver::Resolver;
