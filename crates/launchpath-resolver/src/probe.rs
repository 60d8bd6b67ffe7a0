//! Availability probing.

use std::time::Duration;

use launchpath_core::{CommandRunner, RunOptions};

/// Checks that a command can actually be started.
///
/// A command is available only if it spawns and exits 0 within the timeout.
/// Every failure is folded into `false`.
pub struct AvailabilityProbe<'a> {
    runner: &'a dyn CommandRunner,
    flag: &'a str,
}

impl<'a> AvailabilityProbe<'a> {
    pub fn new(runner: &'a dyn CommandRunner, flag: &'a str) -> Self {
        Self { runner, flag }
    }

    /// Run `command <flag>` with stdin closed and output discarded.
    pub async fn probe(&self, command: &str, timeout: Duration) -> bool {
        let args = [self.flag.to_string()];
        match self
            .runner
            .run(command, &args, RunOptions::probe(timeout))
            .await
        {
            Ok(output) if output.success() => {
                tracing::debug!(command = %command, "Probe succeeded");
                true
            }
            Ok(output) => {
                tracing::debug!(
                    command = %command,
                    exit_code = ?output.exit_code,
                    "Probe exited unsuccessfully"
                );
                false
            }
            Err(e) => {
                tracing::debug!(command = %command, error = %e, "Probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpath_core::testing::ScriptedRunner;

    const TIMEOUT: Duration = Duration::from_millis(500);

    #[tokio::test]
    async fn test_probe_outcomes() {
        let runner = ScriptedRunner::new()
            .succeed("node")
            .exit("broken", 1)
            .hang("stuck");
        let probe = AvailabilityProbe::new(&runner, "--version");

        assert!(probe.probe("node", TIMEOUT).await);
        assert!(!probe.probe("broken", TIMEOUT).await);
        assert!(!probe.probe("stuck", TIMEOUT).await);
        assert!(!probe.probe("missing", TIMEOUT).await);
    }

    #[tokio::test]
    async fn test_probe_passes_flag_and_timeout() {
        let runner = ScriptedRunner::new().succeed("uvx");
        let probe = AvailabilityProbe::new(&runner, "--help");

        probe.probe("uvx", TIMEOUT).await;

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args, vec!["--help"]);
        assert_eq!(calls[0].options, RunOptions::probe(TIMEOUT));
    }
}
