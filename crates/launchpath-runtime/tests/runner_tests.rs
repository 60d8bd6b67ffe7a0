//! Integration tests for the tokio command runner against real processes.
//!
//! These rely on POSIX utilities (`sh`, `sleep`, `which`) and are skipped
//! on Windows.

#![cfg(unix)]

use std::time::{Duration, Instant};

use launchpath_core::{CommandRunner, ProcessError, RunOptions};
use launchpath_runtime::TokioCommandRunner;
use tokio_test::{assert_err, assert_ok};

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

#[tokio::test]
async fn which_locates_sh() {
    let runner = TokioCommandRunner::new();

    let output = assert_ok!(
        runner
            .run("which", &args(&["sh"]), RunOptions::capture(Duration::from_secs(5)))
            .await
    );

    assert!(output.success());
    let first = output.stdout.lines().find(|line| !line.trim().is_empty());
    assert!(first.is_some_and(|line| line.ends_with("/sh")));
}

#[tokio::test]
async fn timeout_bounds_total_latency() {
    let runner = TokioCommandRunner::new();
    let started = Instant::now();

    let err = assert_err!(
        runner
            .run(
                "sh",
                &args(&["-c", "sleep 30"]),
                RunOptions::capture(Duration::from_millis(300)),
            )
            .await
    );

    assert_eq!(
        err,
        ProcessError::TimedOut {
            program: "sh".to_string(),
            timeout_ms: 300
        }
    );
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn non_zero_exit_is_not_an_error() {
    let runner = TokioCommandRunner::new();

    let output = assert_ok!(
        runner
            .run(
                "sh",
                &args(&["-c", "exit 3"]),
                RunOptions::probe(Duration::from_secs(5)),
            )
            .await
    );

    assert_eq!(output.exit_code, Some(3));
    assert!(!output.success());
}

#[tokio::test]
async fn probes_do_not_wait_for_stdin() {
    let runner = TokioCommandRunner::new();

    // `cat` exits immediately because stdin is closed
    let output = assert_ok!(
        runner
            .run("cat", &[], RunOptions::probe(Duration::from_secs(5)))
            .await
    );

    assert!(output.success());
}
