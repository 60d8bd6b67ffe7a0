//! Environment provider port.

use std::ffi::OsString;
use std::path::PathBuf;

/// Access to process environment state (injectable for testing).
pub trait EnvProvider: Send + Sync {
    /// Get an environment variable.
    fn get(&self, key: &str) -> Option<OsString>;

    /// The process working directory, if it can be determined.
    fn current_dir(&self) -> Option<PathBuf>;

    /// Get an environment variable as UTF-8, treating empty values as unset.
    fn get_str(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(|value| value.into_string().ok())
            .filter(|value| !value.is_empty())
    }
}
