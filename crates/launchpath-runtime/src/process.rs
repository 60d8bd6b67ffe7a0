//! Tokio-backed process runner.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tokio::time::timeout;

use launchpath_core::{CommandRunner, ProcessError, ProcessOutput, RunOptions};

/// Upper bound for reaping a child after it has been killed.
const REAP_TIMEOUT: Duration = Duration::from_secs(2);

/// Keeps console windows from flashing up for each probe on Windows.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Runs programs as tokio child processes.
///
/// Stdin is closed and stderr discarded, so a program waiting for input or
/// chatting on stderr cannot stall a probe. Children are spawned with
/// `kill_on_drop`, and a child that outlives its timeout is killed and reaped
/// before `run` returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        options: RunOptions,
    ) -> Result<ProcessOutput, ProcessError> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .stdout(if options.capture_stdout {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .kill_on_drop(true);

        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);

        let mut child = command.spawn().map_err(|e| ProcessError::SpawnFailed {
            program: program.to_string(),
            reason: e.to_string(),
        })?;
        let mut stdout = child.stdout.take();

        let waited = timeout(options.timeout, async {
            let mut buffer = Vec::new();
            if let Some(pipe) = stdout.as_mut() {
                pipe.read_to_end(&mut buffer).await?;
            }
            let status = child.wait().await?;
            Ok::<_, std::io::Error>((status, buffer))
        })
        .await;

        match waited {
            Ok(Ok((status, buffer))) => Ok(ProcessOutput {
                exit_code: status.code(),
                stdout: String::from_utf8_lossy(&buffer).into_owned(),
            }),
            Ok(Err(e)) => {
                terminate(&mut child, program).await;
                Err(ProcessError::Io {
                    program: program.to_string(),
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                terminate(&mut child, program).await;
                Err(ProcessError::timed_out(program, options.timeout))
            }
        }
    }
}

/// Kill a child and wait for it to be reaped so no zombie is left behind.
async fn terminate(child: &mut Child, program: &str) {
    if let Err(e) = child.start_kill() {
        // Already exited between the timeout firing and the kill
        tracing::debug!(program = %program, error = %e, "Kill after timeout failed");
    }
    match timeout(REAP_TIMEOUT, child.wait()).await {
        Ok(Ok(status)) => {
            tracing::debug!(program = %program, status = %status, "Reaped timed-out process");
        }
        Ok(Err(e)) => {
            tracing::warn!(program = %program, error = %e, "Failed to reap killed process");
        }
        Err(_) => {
            tracing::warn!(program = %program, "Killed process did not exit in time");
        }
    }
}
