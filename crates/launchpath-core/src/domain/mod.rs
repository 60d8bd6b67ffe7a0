//! Domain types shared by the resolver, adapters and the CLI.

mod bundled;
mod instructions;
mod resolution;

pub use bundled::{BundledServerEntry, bundled_key};
pub use instructions::{InstallAction, InstallationInstructions};
pub use resolution::{CommandResolution, FallbackUsed, cache_key};
