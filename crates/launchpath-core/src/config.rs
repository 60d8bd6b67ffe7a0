//! Resolver configuration.
//!
//! All fields have sensible defaults. Runtime overrides come from
//! `LAUNCHPATH_*` environment variables, read through an `EnvProvider` so
//! tests never touch the real process environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::platform::Platform;
use crate::ports::EnvProvider;

/// Default hard limit for a single probe.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;

/// Default hard limit for the `which`/`where` lookup.
pub const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 3_000;

/// Argument passed to a command to check that it runs.
pub const DEFAULT_PROBE_FLAG: &str = "--version";

/// Interpreter used to execute bundled entry points.
pub const DEFAULT_RUNTIME_COMMAND: &str = "node";

pub const ENV_PROBE_TIMEOUT_MS: &str = "LAUNCHPATH_PROBE_TIMEOUT_MS";
pub const ENV_LOOKUP_TIMEOUT_MS: &str = "LAUNCHPATH_LOOKUP_TIMEOUT_MS";
pub const ENV_RUNTIME_COMMAND: &str = "LAUNCHPATH_RUNTIME_COMMAND";
pub const ENV_EXTRA_PATHS: &str = "LAUNCHPATH_EXTRA_PATHS";
pub const ENV_RESOURCES_DIR: &str = "LAUNCHPATH_RESOURCES_DIR";

/// Errors raised while building a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a whole number of milliseconds, got '{value}'")]
    InvalidNumber { key: String, value: String },

    #[error("{key} must be greater than zero")]
    ZeroTimeout { key: String },
}

/// Configuration for a `Resolver`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Platform whose conventions drive lookups and candidate lists.
    pub platform: Platform,
    /// Hard limit for each probe, in milliseconds.
    pub probe_timeout_ms: u64,
    /// Hard limit for the locate-on-PATH call, in milliseconds.
    pub lookup_timeout_ms: u64,
    /// Argument used to probe a command.
    pub probe_flag: String,
    /// Interpreter command for bundled entry points.
    pub runtime_command: String,
    /// Extra directories searched after the well-known install locations.
    pub extra_search_dirs: Vec<String>,
    /// Resource directory of a packaged desktop distribution, when running in one.
    pub resources_dir: Option<PathBuf>,
    /// Base directory for local package installs. Defaults to the process cwd.
    pub working_dir: Option<PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            lookup_timeout_ms: DEFAULT_LOOKUP_TIMEOUT_MS,
            probe_flag: DEFAULT_PROBE_FLAG.to_string(),
            runtime_command: DEFAULT_RUNTIME_COMMAND.to_string(),
            extra_search_dirs: Vec::new(),
            resources_dir: None,
            working_dir: None,
        }
    }
}

impl ResolverConfig {
    /// Defaults with overrides from `LAUNCHPATH_*` variables.
    pub fn from_env(env: &dyn EnvProvider) -> Result<Self, ConfigError> {
        Self::default().apply_env(env)
    }

    /// Apply `LAUNCHPATH_*` overrides on top of this configuration.
    pub fn apply_env(mut self, env: &dyn EnvProvider) -> Result<Self, ConfigError> {
        if let Some(value) = env.get_str(ENV_PROBE_TIMEOUT_MS) {
            self.probe_timeout_ms = parse_timeout(ENV_PROBE_TIMEOUT_MS, &value)?;
        }
        if let Some(value) = env.get_str(ENV_LOOKUP_TIMEOUT_MS) {
            self.lookup_timeout_ms = parse_timeout(ENV_LOOKUP_TIMEOUT_MS, &value)?;
        }
        if let Some(value) = env.get_str(ENV_RUNTIME_COMMAND) {
            self.runtime_command = value.trim().to_string();
        }
        if let Some(value) = env.get_str(ENV_EXTRA_PATHS) {
            self.extra_search_dirs = self
                .platform
                .split_path_list(&value)
                .iter()
                .map(|dir| expand_home(dir))
                .collect();
        }
        if let Some(value) = env.get_str(ENV_RESOURCES_DIR) {
            self.resources_dir = Some(PathBuf::from(expand_home(value.trim())));
        }
        Ok(self)
    }

    /// Override the platform.
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the probe timeout.
    #[must_use]
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout_ms = duration_ms(timeout);
        self
    }

    /// Set the lookup timeout.
    #[must_use]
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout_ms = duration_ms(timeout);
        self
    }

    /// Set the runtime command for bundled entry points.
    #[must_use]
    pub fn with_runtime_command(mut self, command: impl Into<String>) -> Self {
        self.runtime_command = command.into();
        self
    }

    /// Set extra search directories.
    #[must_use]
    pub fn with_extra_search_dirs(mut self, dirs: Vec<String>) -> Self {
        self.extra_search_dirs = dirs;
        self
    }

    /// Set the packaged resources directory.
    #[must_use]
    pub fn with_resources_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.resources_dir = dir;
        self
    }

    /// Set the base directory for local package installs.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub const fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

fn parse_timeout(key: &str, value: &str) -> Result<u64, ConfigError> {
    let parsed: u64 = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })?;
    if parsed == 0 {
        return Err(ConfigError::ZeroTimeout {
            key: key.to_string(),
        });
    }
    Ok(parsed)
}

fn duration_ms(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}

/// Expand a leading `~` to the user's home directory.
fn expand_home(raw: &str) -> String {
    let Some(home) = dirs::home_dir() else {
        return raw.to_string();
    };
    if raw == "~" {
        return home.to_string_lossy().into_owned();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => home.join(rest).to_string_lossy().into_owned(),
        None => raw.to_string(),
    }
}
