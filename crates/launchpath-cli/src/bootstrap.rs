//! CLI bootstrap - the composition root.
//!
//! This is the only place where concrete adapters are instantiated:
//! - Process runner, filesystem and environment (via launchpath-runtime)
//! - Resolver configuration (env, then CLI flags, then packaging detection)
//! - The resolver itself (via launchpath-resolver)

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use launchpath_core::{ConfigError, EnvProvider, ResolverConfig};
use launchpath_resolver::Resolver;
use launchpath_runtime::{SystemEnv, SystemFs, TokioCommandRunner, detect_resources_dir};

use crate::error::CliError;
use crate::parser::Cli;

/// Overrides taken from command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    pub probe_timeout_ms: Option<u64>,
    pub lookup_timeout_ms: Option<u64>,
    pub runtime_command: Option<String>,
    pub extra_search_dirs: Vec<String>,
    pub resources_dir: Option<PathBuf>,
}

impl CliConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            probe_timeout_ms: cli.probe_timeout_ms,
            lookup_timeout_ms: cli.lookup_timeout_ms,
            runtime_command: cli.runtime.clone(),
            extra_search_dirs: cli.search_dirs.clone(),
            resources_dir: cli.resources_dir.clone(),
        }
    }

    /// Resolver configuration: defaults, then `LAUNCHPATH_*`, then flags.
    pub fn resolver_config(&self, env: &dyn EnvProvider) -> Result<ResolverConfig, ConfigError> {
        let mut config = ResolverConfig::from_env(env)?;

        if let Some(ms) = self.probe_timeout_ms {
            config = config.with_probe_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = self.lookup_timeout_ms {
            config = config.with_lookup_timeout(Duration::from_millis(ms));
        }
        if let Some(ref runtime) = self.runtime_command {
            config = config.with_runtime_command(runtime.clone());
        }
        if !self.extra_search_dirs.is_empty() {
            config = config.with_extra_search_dirs(self.extra_search_dirs.clone());
        }
        if self.resources_dir.is_some() {
            config = config.with_resources_dir(self.resources_dir.clone());
        }
        Ok(config)
    }
}

/// Fully composed context for command handlers.
pub struct CliContext {
    pub resolver: Arc<Resolver>,
    /// Environment the resolver reads, also used to build child `PATH`s.
    pub env: Arc<dyn EnvProvider>,
}

impl CliContext {
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }
}

/// Build the resolver from the real process environment.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext> {
    let env: Arc<dyn EnvProvider> = Arc::new(SystemEnv);

    let mut resolver_config = config.resolver_config(env.as_ref()).map_err(CliError::from)?;
    if resolver_config.resources_dir.is_none() {
        resolver_config.resources_dir = detect_resources_dir();
    }
    tracing::debug!(
        platform = %resolver_config.platform,
        probe_timeout_ms = resolver_config.probe_timeout_ms,
        lookup_timeout_ms = resolver_config.lookup_timeout_ms,
        runtime = %resolver_config.runtime_command,
        "Resolver configured"
    );

    let resolver = Resolver::new(
        Arc::new(TokioCommandRunner::new()),
        Arc::new(SystemFs),
        Arc::clone(&env),
        resolver_config,
    );

    Ok(CliContext {
        resolver: Arc::new(resolver),
        env,
    })
}
