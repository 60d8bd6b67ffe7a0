//! Bundled server entries.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A known adapter package and, if one was found, its local entry point.
///
/// Created once while the bundled registry is built and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundledServerEntry {
    /// Logical command the package is normally launched with (e.g. "npx").
    pub command: String,
    /// Canonical arguments for launching the package through `command`.
    pub args: Vec<String>,
    /// Package name, including its scope (e.g. "@modelcontextprotocol/server-memory").
    pub package_name: String,
    /// Entry-point file of a local install, if any exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundled_path: Option<PathBuf>,
}

impl BundledServerEntry {
    /// Registry key for this entry.
    pub fn key(&self) -> String {
        bundled_key(&self.command, &self.package_name)
    }

    /// Whether a local entry point was found.
    pub const fn is_installed(&self) -> bool {
        self.bundled_path.is_some()
    }
}

/// Registry key for a logical command and package identity.
pub fn bundled_key(command: &str, package_name: &str) -> String {
    format!("{command}:{package_name}")
}
