//! CLI-specific error types and exit codes.

use launchpath_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid `LAUNCHPATH_*` configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The command could not be resolved by any strategy.
    #[error("'{0}' is not available")]
    Unavailable(String),
}

impl CliError {
    /// Process exit code (sysexits.h where one fits).
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 78, // EX_CONFIG
            Self::Unavailable(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let config = CliError::from(ConfigError::ZeroTimeout {
            key: "LAUNCHPATH_PROBE_TIMEOUT_MS".into(),
        });
        assert_eq!(config.exit_code(), 78);
        assert_eq!(CliError::Unavailable("uvx".into()).exit_code(), 1);
    }
}
