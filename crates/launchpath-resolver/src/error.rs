//! Resolver-internal errors.
//!
//! These never cross `Resolver::resolve_command`: the orchestrator logs them
//! and reports the command as unavailable.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Command is empty")]
    EmptyCommand,

    #[error("Invalid command '{command}': {reason}")]
    InvalidCommand { command: String, reason: String },
}

impl ResolveError {
    /// Reject command names that cannot be spawned or looked up.
    pub fn check_command(command: &str) -> Result<(), Self> {
        if command.trim().is_empty() {
            return Err(Self::EmptyCommand);
        }
        if command.contains('\0') {
            return Err(Self::InvalidCommand {
                command: command.replace('\0', "\\0"),
                reason: "contains a NUL byte".to_string(),
            });
        }
        if command.contains(['\n', '\r']) {
            return Err(Self::InvalidCommand {
                command: command.escape_debug().to_string(),
                reason: "contains a line break".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_command() {
        assert!(ResolveError::check_command("npx").is_ok());
        assert!(ResolveError::check_command(r"C:\Program Files\nodejs\node.exe").is_ok());
        assert_eq!(
            ResolveError::check_command("  "),
            Err(ResolveError::EmptyCommand)
        );
        assert!(matches!(
            ResolveError::check_command("npx\nrm"),
            Err(ResolveError::InvalidCommand { .. })
        ));
        assert!(matches!(
            ResolveError::check_command("np\0x"),
            Err(ResolveError::InvalidCommand { .. })
        ));
    }
}
