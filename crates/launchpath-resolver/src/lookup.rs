//! Locating commands on `PATH` with the platform's own facility.

use std::time::Duration;

use launchpath_core::{CommandRunner, Platform, RunOptions};

/// Asks `which` (POSIX) or `where` (Windows) for a command's location.
pub struct PathLookup<'a> {
    runner: &'a dyn CommandRunner,
    platform: Platform,
}

impl<'a> PathLookup<'a> {
    pub fn new(runner: &'a dyn CommandRunner, platform: Platform) -> Self {
        Self { runner, platform }
    }

    /// Absolute path of `command`, or `None` when the lookup fails for any reason.
    pub async fn locate(&self, command: &str, timeout: Duration) -> Option<String> {
        let locator = self.platform.locate_command();
        let args = [command.to_string()];

        let output = match self
            .runner
            .run(locator, &args, RunOptions::capture(timeout))
            .await
        {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(command = %command, locator, error = %e, "Lookup failed");
                return None;
            }
        };

        if !output.success() {
            tracing::debug!(
                command = %command,
                locator,
                exit_code = ?output.exit_code,
                "Lookup found nothing"
            );
            return None;
        }

        let path = first_path_line(&output.stdout);
        if let Some(ref path) = path {
            tracing::debug!(command = %command, path = %path, "Located command");
        }
        path
    }
}

/// First non-blank line of locator output, trimmed.
///
/// `where` lists every match, one per line with CRLF endings.
pub fn first_path_line(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}
