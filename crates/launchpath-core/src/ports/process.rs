//! Process runner port.
//!
//! Expresses the one thing the resolver needs from a process facility: run a
//! program to completion under a hard timeout, optionally capturing stdout.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// How a process should be run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Hard limit; the process is killed when it elapses.
    pub timeout: Duration,
    /// Whether stdout should be captured into `ProcessOutput::stdout`.
    pub capture_stdout: bool,
}

impl RunOptions {
    /// Options for a probe: output is discarded.
    #[must_use]
    pub const fn probe(timeout: Duration) -> Self {
        Self {
            timeout,
            capture_stdout: false,
        }
    }

    /// Options for a lookup whose stdout is parsed.
    #[must_use]
    pub const fn capture(timeout: Duration) -> Self {
        Self {
            timeout,
            capture_stdout: true,
        }
    }
}

/// Result of a process that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured stdout (lossy UTF-8), empty unless capture was requested.
    pub stdout: String,
}

impl ProcessOutput {
    /// Output of a process that exited with `code` and printed nothing.
    #[must_use]
    pub const fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            stdout: String::new(),
        }
    }

    /// Set the captured stdout.
    #[must_use]
    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    /// Whether the process exited with code 0.
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }
}

/// Errors raised while running a process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// The program could not be started (not found, permission denied, ...).
    #[error("Failed to spawn '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    /// The program did not finish in time and was killed.
    #[error("'{program}' timed out after {timeout_ms} ms")]
    TimedOut { program: String, timeout_ms: u64 },

    /// Waiting on the program or reading its output failed.
    #[error("I/O error while running '{program}': {reason}")]
    Io { program: String, reason: String },
}

impl ProcessError {
    /// Build a `TimedOut` error from the timeout that elapsed.
    pub fn timed_out(program: impl Into<String>, timeout: Duration) -> Self {
        Self::TimedOut {
            program: program.into(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Runs external programs on behalf of the resolver.
///
/// Implementations must never leave a child running once `run` returns: a
/// process that outlives `options.timeout` is killed and reaped before
/// `ProcessError::TimedOut` is returned.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` to completion, stdin closed.
    async fn run(
        &self,
        program: &str,
        args: &[String],
        options: RunOptions,
    ) -> Result<ProcessOutput, ProcessError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_requires_zero_exit() {
        assert!(ProcessOutput::exited(0).success());
        assert!(!ProcessOutput::exited(1).success());
        assert!(!ProcessOutput::default().success());
    }

    #[test]
    fn test_timed_out_records_millis() {
        let err = ProcessError::timed_out("npx", Duration::from_millis(1500));
        assert_eq!(
            err,
            ProcessError::TimedOut {
                program: "npx".to_string(),
                timeout_ms: 1500
            }
        );
        assert!(err.to_string().contains("1500 ms"));
    }
}
