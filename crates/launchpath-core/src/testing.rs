//! In-memory fakes of every port.
//!
//! Available in this crate's tests and, through the `test-utils` feature, in
//! downstream crates' tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::ports::{
    CommandRunner, EnvProvider, FsProvider, ProcessError, ProcessOutput, RunOptions,
};

/// Environment provider with predefined variables.
#[derive(Debug, Default)]
pub struct MockEnv {
    vars: HashMap<String, OsString>,
    current_dir: Option<PathBuf>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

impl EnvProvider for MockEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        self.vars.get(key).cloned()
    }

    fn current_dir(&self) -> Option<PathBuf> {
        self.current_dir.clone()
    }
}

/// Filesystem provider with predefined files and directory listings.
#[derive(Debug, Default)]
pub struct MockFs {
    files: HashSet<PathBuf>,
    dirs: HashMap<PathBuf, Vec<String>>,
    unreadable: HashSet<PathBuf>,
}

impl MockFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file that exists.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into());
        self
    }

    /// Register a directory and the names it lists.
    #[must_use]
    pub fn with_dir<I, S>(mut self, path: impl Into<PathBuf>, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs
            .insert(path.into(), entries.into_iter().map(Into::into).collect());
        self
    }

    /// Register a directory that exists but cannot be listed.
    #[must_use]
    pub fn with_unreadable_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.unreadable.insert(path.into());
        self
    }
}

impl FsProvider for MockFs {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains(path) || self.dirs.contains_key(path) || self.unreadable.contains(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        if self.unreadable.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        self.dirs.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", path.display()),
            )
        })
    }
}

/// A single recorded invocation of a `ScriptedRunner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub options: RunOptions,
}

#[derive(Debug, Clone)]
enum Scripted {
    Output(ProcessOutput),
    TimedOut,
}

#[derive(Debug, Clone)]
struct Rule {
    program: String,
    first_arg: Option<String>,
    response: Scripted,
}

/// Command runner that answers from a script and records every call.
///
/// Rules matching both the program and its first argument win over rules
/// matching the program alone. Unscripted programs fail to spawn, as a
/// missing executable would.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    rules: Vec<Rule>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner for which every spawn fails.
    pub fn failing() -> Self {
        Self::new()
    }

    fn rule(mut self, program: &str, first_arg: Option<&str>, response: Scripted) -> Self {
        self.rules.push(Rule {
            program: program.to_string(),
            first_arg: first_arg.map(String::from),
            response,
        });
        self
    }

    /// `program` exits 0 for any arguments.
    #[must_use]
    pub fn succeed(self, program: &str) -> Self {
        self.rule(program, None, Scripted::Output(ProcessOutput::exited(0)))
    }

    /// `program` exits with `code` for any arguments.
    #[must_use]
    pub fn exit(self, program: &str, code: i32) -> Self {
        self.rule(program, None, Scripted::Output(ProcessOutput::exited(code)))
    }

    /// `program` never finishes in time.
    #[must_use]
    pub fn hang(self, program: &str) -> Self {
        self.rule(program, None, Scripted::TimedOut)
    }

    /// `program first_arg ...` exits 0 printing `stdout`.
    #[must_use]
    pub fn stdout_for(self, program: &str, first_arg: &str, stdout: &str) -> Self {
        self.rule(
            program,
            Some(first_arg),
            Scripted::Output(ProcessOutput::exited(0).with_stdout(stdout)),
        )
    }

    /// `program first_arg ...` exits with `code`.
    #[must_use]
    pub fn exit_for(self, program: &str, first_arg: &str, code: i32) -> Self {
        self.rule(
            program,
            Some(first_arg),
            Scripted::Output(ProcessOutput::exited(code)),
        )
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls made to `program`.
    pub fn call_count(&self, program: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.program == program)
            .count()
    }

    fn lookup(&self, program: &str, args: &[String]) -> Option<&Scripted> {
        let first = args.first().map(String::as_str);
        self.rules
            .iter()
            .find(|rule| {
                rule.program == program && first.is_some() && rule.first_arg.as_deref() == first
            })
            .or_else(|| {
                self.rules
                    .iter()
                    .find(|rule| rule.program == program && rule.first_arg.is_none())
            })
            .map(|rule| &rule.response)
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        options: RunOptions,
    ) -> Result<ProcessOutput, ProcessError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                program: program.to_string(),
                args: args.to_vec(),
                options,
            });

        match self.lookup(program, args) {
            Some(Scripted::Output(output)) => Ok(output.clone()),
            Some(Scripted::TimedOut) => Err(ProcessError::timed_out(program, options.timeout)),
            None => Err(ProcessError::SpawnFailed {
                program: program.to_string(),
                reason: "No such file or directory (os error 2)".to_string(),
            }),
        }
    }
}
