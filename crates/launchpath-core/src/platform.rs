//! Operating system model.
//!
//! The resolver never branches on `cfg!` directly. It asks a `Platform`
//! value, so every platform's behavior can be exercised from any host.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Executable extensions tried on Windows, in priority order.
const WINDOWS_EXTENSIONS: &[&str] = &[".exe", ".cmd", ".bat"];

/// Operating system family the resolver is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    #[serde(rename = "macos")]
    MacOs,
    Linux,
    /// Any other Unix-like system (BSDs, ...).
    OtherUnix,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::OtherUnix
        }
    }

    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Separator between entries of `PATH`.
    pub const fn path_list_separator(self) -> char {
        if self.is_windows() { ';' } else { ':' }
    }

    /// Separator between path components.
    pub const fn dir_separator(self) -> char {
        if self.is_windows() { '\\' } else { '/' }
    }

    /// Shell facility that locates a command on `PATH`.
    pub const fn locate_command(self) -> &'static str {
        if self.is_windows() { "where" } else { "which" }
    }

    /// Executable extensions appended to bare command names.
    pub const fn executable_extensions(self) -> &'static [&'static str] {
        if self.is_windows() {
            WINDOWS_EXTENSIONS
        } else {
            &[]
        }
    }

    /// File names under which `command` may exist in a directory.
    ///
    /// On Windows a bare name expands to `name.exe`, `name.cmd`, `name.bat`;
    /// a name that already carries one of those extensions is kept as is.
    pub fn executable_names(self, command: &str) -> Vec<String> {
        let extensions = self.executable_extensions();
        if extensions.is_empty() {
            return vec![command.to_string()];
        }

        let lower = command.to_ascii_lowercase();
        if extensions.iter().any(|ext| lower.ends_with(ext)) {
            return vec![command.to_string()];
        }

        extensions
            .iter()
            .map(|ext| format!("{command}{ext}"))
            .collect()
    }

    /// Join a directory and a relative path with this platform's separator.
    pub fn join(self, dir: &str, name: &str) -> String {
        let sep = self.dir_separator();
        let trimmed = dir.trim_end_matches(|c: char| c == '/' || c == sep);
        if trimmed.is_empty() && dir.starts_with(sep) {
            return format!("{sep}{name}");
        }
        format!("{trimmed}{sep}{name}")
    }

    /// Whether `path` is absolute on this platform.
    ///
    /// Windows accepts drive paths (`C:\\x`, `C:/x`) and UNC paths.
    pub fn is_absolute(self, path: &str) -> bool {
        if !self.is_windows() {
            return path.starts_with('/');
        }
        let bytes = path.as_bytes();
        let is_sep = |b: u8| b == b'\\' || b == b'/';
        match bytes {
            [drive, b':', sep, ..] => drive.is_ascii_alphabetic() && is_sep(*sep),
            [first, second, ..] => is_sep(*first) && is_sep(*second),
            _ => false,
        }
    }

    /// Split a `PATH`-style list, skipping empty segments.
    pub fn split_path_list(self, value: &str) -> Vec<String> {
        value
            .split(self.path_list_separator())
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .collect()
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
            Self::OtherUnix => write!(f, "unix"),
        }
    }
}
