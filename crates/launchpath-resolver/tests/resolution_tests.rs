//! End-to-end resolution against a real filesystem layout.

use std::path::Path;
use std::sync::Arc;

use launchpath_core::testing::{MockEnv, ScriptedRunner};
use launchpath_core::{FallbackUsed, Platform, ResolverConfig};
use launchpath_resolver::{AttemptOutcome, Resolver, effective_path};
use launchpath_runtime::SystemFs;

const FILESYSTEM: &str = "@modelcontextprotocol/server-filesystem";

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
}

#[tokio::test]
async fn bundled_install_in_working_dir_is_launched_with_runtime() {
    let work = tempfile::tempdir().unwrap();
    let entry = work
        .path()
        .join("node_modules")
        .join("@modelcontextprotocol")
        .join("server-filesystem")
        .join("dist")
        .join("index.js");
    touch(&entry);

    let runner = ScriptedRunner::new().stdout_for("which", "node", "/usr/local/bin/node\n");
    let config = ResolverConfig::default()
        .with_platform(Platform::Linux)
        .with_working_dir(work.path());
    let resolver = Resolver::new(
        Arc::new(runner),
        Arc::new(SystemFs),
        Arc::new(MockEnv::new()),
        config,
    );

    assert!(resolver.bundled_servers()[&format!("npx:{FILESYSTEM}")].is_installed());

    let resolution = resolver
        .resolve_command("npx", &args(&["-y", FILESYSTEM, "/home/dev/projects"]))
        .await;

    assert!(resolution.available);
    assert_eq!(resolution.fallback_used, Some(FallbackUsed::BundledServer));
    assert_eq!(resolution.command, "/usr/local/bin/node");
    assert_eq!(
        resolution.args,
        vec![entry.to_string_lossy().into_owned(), "/home/dev/projects".to_string()]
    );
}

#[tokio::test]
async fn reload_picks_up_new_installs() {
    let work = tempfile::tempdir().unwrap();
    let config = ResolverConfig::default()
        .with_platform(Platform::Linux)
        .with_working_dir(work.path());
    let resolver = Resolver::new(
        Arc::new(ScriptedRunner::failing()),
        Arc::new(SystemFs),
        Arc::new(MockEnv::new()),
        config,
    );
    let key = format!("npx:{FILESYSTEM}");
    assert!(!resolver.bundled_servers()[&key].is_installed());

    touch(
        &work
            .path()
            .join("node_modules/@modelcontextprotocol/server-filesystem/lib/index.js"),
    );
    resolver.reload_bundled();

    assert!(resolver.bundled_servers()[&key].is_installed());
}

#[tokio::test]
async fn glob_directories_on_disk_pick_the_newest_version() {
    let home = tempfile::tempdir().unwrap();
    let versions = home.path().join(".nvm/versions/node");
    for version in ["v9.11.2", "v18.19.0", "v20.11.1"] {
        touch(&versions.join(version).join("bin/npx"));
    }
    let expected = versions.join("v20.11.1/bin/npx");

    let runner = ScriptedRunner::new().succeed(&expected.to_string_lossy());
    let env = MockEnv::new().with_var("HOME", home.path().as_os_str());
    let config = ResolverConfig::default().with_platform(Platform::Linux);
    let resolver = Resolver::new(Arc::new(runner), Arc::new(SystemFs), Arc::new(env), config);

    let report = resolver.fallback_attempts("npx").await;

    assert_eq!(report.found.as_deref(), Some(expected.as_path()));
    assert_eq!(
        report.attempts.last().map(|a| &a.outcome),
        Some(&AttemptOutcome::Ok)
    );
}

#[tokio::test]
async fn unresolvable_command_points_to_installation_guidance() {
    let resolver = Resolver::new(
        Arc::new(ScriptedRunner::failing()),
        Arc::new(SystemFs),
        Arc::new(MockEnv::new().with_var("PATH", "")),
        ResolverConfig::default().with_platform(Platform::Linux),
    );

    let resolution = resolver.resolve_command("uvx", &args(&["mcp-server-fetch"])).await;
    assert!(!resolution.available);

    let help = resolver.installation_instructions(&resolution.command);
    assert_eq!(help.title, "uv is required");
    assert!(!help.actions.is_empty());
}

#[cfg(unix)]
mod real_processes {
    use super::*;
    use launchpath_runtime::TokioCommandRunner;
    use std::os::unix::fs::PermissionsExt;

    fn write_script(path: &Path, body: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[tokio::test]
    async fn extra_search_dir_provides_working_executable() {
        let tools = tempfile::tempdir().unwrap();
        let name = "launchpath-test-tool-d41d8cd9";
        let tool = tools.path().join(name);
        write_script(&tool, "exit 0");

        let extra = vec![tools.path().to_string_lossy().into_owned()];
        let config = ResolverConfig::default()
            .with_platform(Platform::current())
            .with_extra_search_dirs(extra.clone());
        let env = Arc::new(MockEnv::new().with_var("PATH", "/usr/bin"));
        let resolver = Resolver::new(
            Arc::new(TokioCommandRunner::new()),
            Arc::new(SystemFs),
            env.clone(),
            config,
        );

        let resolution = resolver.resolve_command(name, &[]).await;

        assert!(resolution.available);
        assert_eq!(resolution.fallback_used, Some(FallbackUsed::SystemPath));
        assert_eq!(
            resolution.resolved_path.as_deref(),
            Some(tool.to_string_lossy().as_ref())
        );

        let path = effective_path(&resolution, env.as_ref(), Platform::current(), &extra);
        assert_eq!(path, format!("{}:/usr/bin", tools.path().display()));
    }

    #[tokio::test]
    async fn failing_probe_rejects_candidate() {
        let tools = tempfile::tempdir().unwrap();
        let name = "launchpath-test-broken-8f00b204";
        write_script(&tools.path().join(name), "exit 2");

        let config = ResolverConfig::default()
            .with_extra_search_dirs(vec![tools.path().to_string_lossy().into_owned()]);
        let resolver = Resolver::new(
            Arc::new(TokioCommandRunner::new()),
            Arc::new(SystemFs),
            Arc::new(MockEnv::new()),
            config,
        );

        let resolution = resolver.resolve_command(name, &[]).await;

        assert!(!resolution.available);
        let report = resolver.fallback_attempts(name).await;
        assert_eq!(
            report.attempts.last().map(|a| &a.outcome),
            Some(&AttemptOutcome::ProbeFailed)
        );
    }
}
