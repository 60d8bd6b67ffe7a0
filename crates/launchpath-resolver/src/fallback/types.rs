//! Types for the fallback path search.

use std::fmt;
use std::path::PathBuf;

use launchpath_core::Platform;

/// A location to try.
///
/// Literal candidates (from `PATH` and extra directories) are used exactly as
/// written. Template candidates come from the well-known install locations:
/// their directory may contain `${VAR}` references and at most one `*`
/// segment. The executable name is never expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackCandidate {
    /// Directory joined with the executable name, before any expansion.
    pub path_template: String,
    pub dir_template: String,
    pub file_name: String,
    pub expands_variables: bool,
    pub requires_glob_expansion: bool,
}

impl FallbackCandidate {
    /// A location taken verbatim.
    pub fn literal(dir: &str, file_name: &str, platform: Platform) -> Self {
        Self {
            path_template: platform.join(dir, file_name),
            dir_template: dir.to_string(),
            file_name: file_name.to_string(),
            expands_variables: false,
            requires_glob_expansion: false,
        }
    }

    /// A well-known location whose directory still needs expanding.
    pub fn template(dir_template: &str, file_name: &str, platform: Platform) -> Self {
        Self {
            path_template: platform.join(dir_template, file_name),
            dir_template: dir_template.to_string(),
            file_name: file_name.to_string(),
            expands_variables: true,
            requires_glob_expansion: dir_template.contains('*'),
        }
    }
}

/// A single candidate that was checked during a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// Concrete path when expansion got that far, otherwise the template.
    pub candidate: String,
    pub outcome: AttemptOutcome,
}

/// What happened when a candidate was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Exists and passed the probe.
    Ok,
    /// Path does not exist.
    NotFound,
    /// Path exists but the probe failed.
    ProbeFailed,
    /// The parent of a glob segment could not be listed.
    ListingFailed(String),
    /// No directory entry matched the glob segment.
    NoGlobMatch,
    /// The template references an unset environment variable.
    UnsetVariable(String),
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::NotFound => write!(f, "not found"),
            Self::ProbeFailed => write!(f, "probe failed"),
            Self::ListingFailed(reason) => write!(f, "listing failed: {reason}"),
            Self::NoGlobMatch => write!(f, "no glob match"),
            Self::UnsetVariable(name) => write!(f, "${{{name}}} is not set"),
        }
    }
}

/// Outcome of a full search: the winning path and everything tried on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchReport {
    pub found: Option<PathBuf>,
    pub attempts: Vec<Attempt>,
}

impl SearchReport {
    /// Render attempts as an indented list for terminal output.
    pub fn format_attempts(&self) -> String {
        if self.attempts.is_empty() {
            return "  (no candidates checked)".to_string();
        }
        self.attempts
            .iter()
            .map(|a| {
                let mark = if a.outcome == AttemptOutcome::Ok { '✓' } else { '✗' };
                format!("  {mark} {}: {}", a.candidate, a.outcome)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
