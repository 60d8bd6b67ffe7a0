//! Fallback search for commands missing from the host's own lookup.
//!
//! Desktop hosts are often launched without the user's shell profile, so a
//! command installed by Homebrew, nvm or volta may be invisible to `which`.
//! This module walks an ordered list of candidate locations instead:
//!
//! - `candidates`: PATH directories, well-known install locations, extra dirs
//! - `glob`: single-segment glob expansion with version-aware selection
//! - `types`: candidates, attempts and the search report
//!
//! A candidate wins when it exists and passes the availability probe.

mod candidates;
mod glob;
mod types;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use launchpath_core::{CommandRunner, EnvProvider, FsProvider, ResolverConfig};

use crate::probe::AvailabilityProbe;

pub use candidates::{candidate_list, expand_vars, well_known_dirs};
pub use glob::{compare_versions, select_best_match, split_glob};
pub use types::{Attempt, AttemptOutcome, FallbackCandidate, SearchReport};

/// Walks candidate locations until one exists and runs.
pub struct FallbackPathSearch<'a> {
    runner: &'a dyn CommandRunner,
    fs: &'a dyn FsProvider,
    env: &'a dyn EnvProvider,
    config: &'a ResolverConfig,
}

impl<'a> FallbackPathSearch<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        fs: &'a dyn FsProvider,
        env: &'a dyn EnvProvider,
        config: &'a ResolverConfig,
    ) -> Self {
        Self {
            runner,
            fs,
            env,
            config,
        }
    }

    /// First working location of `command`.
    pub async fn search(&self, command: &str) -> Option<PathBuf> {
        self.search_with_attempts(command).await.found
    }

    /// Search and record every candidate checked on the way.
    pub async fn search_with_attempts(&self, command: &str) -> SearchReport {
        let platform = self.config.platform;
        let probe = AvailabilityProbe::new(self.runner, &self.config.probe_flag);
        let mut report = SearchReport::default();
        let mut seen = HashSet::new();

        let candidates = candidate_list(command, platform, self.env, &self.config.extra_search_dirs);
        for candidate in candidates {
            let path = match self.concretize(&candidate) {
                Ok(path) => path,
                Err(outcome) => {
                    tracing::debug!(
                        command = %command,
                        candidate = %candidate.path_template,
                        outcome = %outcome,
                        "Skipping candidate"
                    );
                    report.attempts.push(Attempt {
                        candidate: candidate.path_template,
                        outcome,
                    });
                    continue;
                }
            };

            // PATH and the well-known list overlap; probe each location once
            if !seen.insert(path.clone()) {
                continue;
            }

            let outcome = self.check(&probe, &path).await;
            tracing::debug!(command = %command, candidate = %path, outcome = %outcome, "Checked candidate");
            let found = outcome == AttemptOutcome::Ok;
            report.attempts.push(Attempt {
                candidate: path.clone(),
                outcome,
            });

            if found {
                tracing::info!(command = %command, path = %path, "Found command in fallback location");
                report.found = Some(PathBuf::from(path));
                return report;
            }
        }

        tracing::debug!(
            command = %command,
            checked = report.attempts.len(),
            "No fallback location found"
        );
        report
    }

    /// Turn a candidate into a concrete path.
    ///
    /// Literal candidates pass through untouched. Templates get their
    /// variables substituted and their one glob segment resolved; the
    /// substituted text is never scanned for further globs.
    fn concretize(&self, candidate: &FallbackCandidate) -> Result<String, AttemptOutcome> {
        if !candidate.expands_variables {
            return Ok(candidate.path_template.clone());
        }

        let dir = if candidate.requires_glob_expansion {
            self.expand_glob(&candidate.dir_template)?
        } else {
            expand_vars(&candidate.dir_template, self.env).map_err(AttemptOutcome::UnsetVariable)?
        };
        Ok(self.config.platform.join(&dir, &candidate.file_name))
    }

    fn expand_glob(&self, dir_template: &str) -> Result<String, AttemptOutcome> {
        let platform = self.config.platform;
        let Some(parts) = split_glob(dir_template, platform.is_windows()) else {
            return Err(AttemptOutcome::NoGlobMatch);
        };

        let parent = expand_vars(parts.parent, self.env).map_err(AttemptOutcome::UnsetVariable)?;
        let rest = expand_vars(parts.rest, self.env).map_err(AttemptOutcome::UnsetVariable)?;

        let entries = self
            .fs
            .list_dir(Path::new(&parent))
            .map_err(|e| AttemptOutcome::ListingFailed(e.to_string()))?;
        let selected = select_best_match(parts.pattern, &entries).ok_or(AttemptOutcome::NoGlobMatch)?;

        let mut expanded = platform.join(&parent, selected);
        expanded.push_str(&rest);
        Ok(expanded)
    }

    async fn check(&self, probe: &AvailabilityProbe<'_>, path: &str) -> AttemptOutcome {
        if !self.fs.exists(Path::new(path)) {
            return AttemptOutcome::NotFound;
        }
        if probe.probe(path, self.config.probe_timeout()).await {
            AttemptOutcome::Ok
        } else {
            AttemptOutcome::ProbeFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use launchpath_core::Platform;
    use launchpath_core::testing::{MockEnv, MockFs, ScriptedRunner};

    fn linux_config() -> ResolverConfig {
        ResolverConfig::default().with_platform(Platform::Linux)
    }

    #[tokio::test]
    async fn test_first_existing_and_working_candidate_wins() {
        let env = MockEnv::new().with_var("PATH", "/custom/bin:/usr/bin");
        let fs = MockFs::new()
            .with_file("/custom/bin/uvx")
            .with_file("/usr/bin/uvx");
        let runner = ScriptedRunner::new()
            .exit("/custom/bin/uvx", 127)
            .succeed("/usr/bin/uvx");
        let config = linux_config();
        let search = FallbackPathSearch::new(&runner, &fs, &env, &config);

        let report = search.search_with_attempts("uvx").await;

        assert_eq!(report.found, Some(PathBuf::from("/usr/bin/uvx")));
        assert_eq!(
            report.attempts,
            vec![
                Attempt {
                    candidate: "/custom/bin/uvx".into(),
                    outcome: AttemptOutcome::ProbeFailed,
                },
                Attempt {
                    candidate: "/usr/bin/uvx".into(),
                    outcome: AttemptOutcome::Ok,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_glob_selects_newest_version() {
        let env = MockEnv::new().with_var("HOME", "/home/dev");
        let fs = MockFs::new()
            .with_dir(
                "/home/dev/.nvm/versions/node",
                ["v18.19.0", "v20.11.1", "v9.11.2"],
            )
            .with_file("/home/dev/.nvm/versions/node/v18.19.0/bin/npx")
            .with_file("/home/dev/.nvm/versions/node/v20.11.1/bin/npx")
            .with_file("/home/dev/.nvm/versions/node/v9.11.2/bin/npx");
        let runner = ScriptedRunner::new()
            .succeed("/home/dev/.nvm/versions/node/v18.19.0/bin/npx")
            .succeed("/home/dev/.nvm/versions/node/v20.11.1/bin/npx")
            .succeed("/home/dev/.nvm/versions/node/v9.11.2/bin/npx");
        let config = linux_config();
        let search = FallbackPathSearch::new(&runner, &fs, &env, &config);

        assert_eq!(
            search.search("npx").await,
            Some(PathBuf::from("/home/dev/.nvm/versions/node/v20.11.1/bin/npx"))
        );
    }

    #[tokio::test]
    async fn test_unset_variables_and_listing_failures_are_skipped() {
        let env = MockEnv::new().with_var("HOME", "/home/dev");
        let fs = MockFs::new()
            .with_unreadable_dir("/home/dev/.nvm/versions/node")
            .with_file("/home/dev/.cargo/bin/tool");
        let runner = ScriptedRunner::new().succeed("/home/dev/.cargo/bin/tool");
        let config = linux_config();
        let search = FallbackPathSearch::new(&runner, &fs, &env, &config);

        let report = search.search_with_attempts("tool").await;

        assert_eq!(report.found, Some(PathBuf::from("/home/dev/.cargo/bin/tool")));
        assert!(report.attempts.iter().any(|a| {
            a.candidate == "${HOME}/.nvm/versions/node/*/bin/tool"
                && matches!(a.outcome, AttemptOutcome::ListingFailed(_))
        }));
        assert!(report.attempts.iter().any(|a| {
            a.candidate == "${HOME}/.local/share/fnm/node-versions/*/installation/bin/tool"
                && a.outcome == AttemptOutcome::ListingFailed("no such directory: /home/dev/.local/share/fnm/node-versions".into())
        }));

        let no_home = MockEnv::new();
        let search = FallbackPathSearch::new(&runner, &fs, &no_home, &config);
        let report = search.search_with_attempts("tool").await;
        assert_eq!(report.found, None);
        assert!(report.attempts.contains(&Attempt {
            candidate: "${HOME}/.volta/bin/tool".into(),
            outcome: AttemptOutcome::UnsetVariable("HOME".into()),
        }));
    }

    #[tokio::test]
    async fn test_duplicate_locations_are_probed_once() {
        let env = MockEnv::new().with_var("PATH", "/usr/local/bin:/usr/bin");
        let fs = MockFs::new().with_file("/usr/bin/git");
        let runner = ScriptedRunner::new().exit("/usr/bin/git", 1);
        let config = linux_config();
        let search = FallbackPathSearch::new(&runner, &fs, &env, &config);

        let report = search.search_with_attempts("git").await;

        assert_eq!(report.found, None);
        assert_eq!(runner.call_count("/usr/bin/git"), 1);
        let checked = report
            .attempts
            .iter()
            .filter(|a| a.candidate == "/usr/bin/git")
            .count();
        assert_eq!(checked, 1);
    }

    #[tokio::test]
    async fn test_windows_candidates_expand_with_backslashes() {
        let env = MockEnv::new().with_var("APPDATA", r"C:\Users\dev\AppData\Roaming");
        let fs = MockFs::new()
            .with_dir(r"C:\Users\dev\AppData\Roaming\nvm", ["v18.20.0", "v20.11.1", "settings.txt"])
            .with_file(r"C:\Users\dev\AppData\Roaming\nvm\v20.11.1\node.exe");
        let runner = ScriptedRunner::new().succeed(r"C:\Users\dev\AppData\Roaming\nvm\v20.11.1\node.exe");
        let config = ResolverConfig::default().with_platform(Platform::Windows);
        let search = FallbackPathSearch::new(&runner, &fs, &env, &config);

        assert_eq!(
            search.search("node").await,
            Some(PathBuf::from(r"C:\Users\dev\AppData\Roaming\nvm\v20.11.1\node.exe"))
        );
    }

    #[tokio::test]
    async fn test_star_in_command_or_path_entry_is_literal() {
        let env = MockEnv::new().with_var("PATH", "/odd*:/d");
        let fs = MockFs::new()
            .with_dir("/d", ["npx"])
            .with_file("/d/npx")
            .with_dir("/", ["odd-bin"])
            .with_file("/odd-bin/npx");
        let runner = ScriptedRunner::new()
            .succeed("/d/npx")
            .succeed("/odd-bin/npx");
        let config = linux_config();
        let search = FallbackPathSearch::new(&runner, &fs, &env, &config);

        let report = search.search_with_attempts("n*x").await;
        assert_eq!(report.found, None);
        assert!(report.attempts.contains(&Attempt {
            candidate: "/d/n*x".into(),
            outcome: AttemptOutcome::NotFound,
        }));
        assert_eq!(runner.call_count("/d/npx"), 0);

        assert_eq!(search.search("npx").await, Some(PathBuf::from("/d/npx")));
        assert_eq!(runner.call_count("/odd-bin/npx"), 0);
    }

    #[tokio::test]
    async fn test_listed_entry_containing_star_is_expanded_once() {
        let env = MockEnv::new().with_var("PATH", "/d").with_var("HOME", "/home/dev");
        let fs = MockFs::new()
            .with_dir("/d", ["a*"])
            .with_dir("/home/dev/.nvm/versions/node", ["v*"])
            .with_file("/home/dev/.nvm/versions/node/v*/bin/a*");
        let runner = ScriptedRunner::new().succeed("/home/dev/.nvm/versions/node/v*/bin/a*");
        let config = linux_config();
        let search = FallbackPathSearch::new(&runner, &fs, &env, &config);

        let report = tokio::time::timeout(Duration::from_secs(5), search.search_with_attempts("a*"))
            .await
            .expect("search finished");

        assert_eq!(
            report.found,
            Some(PathBuf::from("/home/dev/.nvm/versions/node/v*/bin/a*"))
        );
        assert!(report.attempts.contains(&Attempt {
            candidate: "/d/a*".into(),
            outcome: AttemptOutcome::NotFound,
        }));
    }

    #[tokio::test]
    async fn test_star_in_substituted_variable_is_not_a_glob() {
        let env = MockEnv::new().with_var("HOME", "/home/*");
        let fs = MockFs::new()
            .with_dir("/home", ["dev"])
            .with_file("/home/dev/.volta/bin/node")
            .with_file("/home/*/.volta/bin/node");
        let runner = ScriptedRunner::new()
            .succeed("/home/dev/.volta/bin/node")
            .succeed("/home/*/.volta/bin/node");
        let config = linux_config();
        let search = FallbackPathSearch::new(&runner, &fs, &env, &config);

        let report = search.search_with_attempts("node").await;

        assert_eq!(report.found, Some(PathBuf::from("/home/*/.volta/bin/node")));
        assert_eq!(runner.call_count("/home/dev/.volta/bin/node"), 0);
    }

    #[tokio::test]
    async fn test_relative_path_entries_never_win() {
        let env = MockEnv::new().with_var("PATH", ".:bin");
        let fs = MockFs::new().with_file("./npx").with_file("bin/npx");
        let runner = ScriptedRunner::new().succeed("./npx").succeed("bin/npx");
        let config = linux_config();
        let search = FallbackPathSearch::new(&runner, &fs, &env, &config);

        let report = search.search_with_attempts("npx").await;

        assert_eq!(report.found, None);
        assert!(report.attempts.iter().all(|a| !a.candidate.starts_with('.') && !a.candidate.starts_with("bin")));
        assert_eq!(runner.call_count("./npx"), 0);
    }

    #[tokio::test]
    async fn test_extra_dirs_are_searched_last() {
        let env = MockEnv::new();
        let fs = MockFs::new().with_file("/opt/tools/bin/uv");
        let runner = ScriptedRunner::new().succeed("/opt/tools/bin/uv");
        let config = linux_config().with_extra_search_dirs(vec!["/opt/tools/bin".into()]);
        let search = FallbackPathSearch::new(&runner, &fs, &env, &config);

        let report = search.search_with_attempts("uv").await;

        assert_eq!(report.found, Some(PathBuf::from("/opt/tools/bin/uv")));
        assert_eq!(
            report.attempts.last().map(|a| a.outcome.clone()),
            Some(AttemptOutcome::Ok)
        );
    }
}
