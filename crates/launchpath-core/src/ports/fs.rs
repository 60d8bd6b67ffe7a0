//! Filesystem provider port.

use std::io;
use std::path::Path;

/// Filesystem queries used during resolution (injectable for testing).
pub trait FsProvider: Send + Sync {
    /// Whether `path` exists. Errors while checking count as "does not exist".
    fn exists(&self, path: &Path) -> bool;

    /// Names of the entries directly inside `path`.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>>;
}
