//! Resolution orchestration.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use launchpath_core::{
    BundledServerEntry, CommandResolution, CommandRunner, EnvProvider, FsProvider,
    InstallationInstructions, ResolverConfig, cache_key,
};

use crate::cache::ResolutionCache;
use crate::error::ResolveError;
use crate::fallback::{FallbackPathSearch, SearchReport};
use crate::instructions;
use crate::lookup::PathLookup;
use crate::probe::AvailabilityProbe;
use crate::registry::{BUNDLED_PACKAGES, BundledPackage, BundledRegistry, PackageIdentity};

/// Decides how a command can be launched, trying fallbacks when it cannot
/// be run directly.
///
/// Resolution order:
/// 1. Cached result for the same `(command, args)`
/// 2. Direct probe of `command`
/// 3. A bundled entry point for the requested package, run through the runtime
/// 4. Fallback search of PATH and well-known install locations
///
/// A `Resolver` is `Send + Sync` and meant to be shared (e.g. in an `Arc`).
pub struct Resolver {
    runner: Arc<dyn CommandRunner>,
    fs: Arc<dyn FsProvider>,
    env: Arc<dyn EnvProvider>,
    config: ResolverConfig,
    packages: Vec<BundledPackage>,
    cache: ResolutionCache,
    registry: RwLock<Arc<BundledRegistry>>,
}

impl Resolver {
    /// Create a resolver and discover bundled packages immediately.
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        fs: Arc<dyn FsProvider>,
        env: Arc<dyn EnvProvider>,
        config: ResolverConfig,
    ) -> Self {
        let mut resolver = Self {
            runner,
            fs,
            env,
            config,
            packages: BUNDLED_PACKAGES.to_vec(),
            cache: ResolutionCache::new(),
            registry: RwLock::new(Arc::default()),
        };
        resolver.registry = RwLock::new(Arc::new(resolver.discover_bundled()));
        resolver
    }

    /// Replace the bundled package catalog.
    #[must_use]
    pub fn with_bundled_packages(mut self, packages: &[BundledPackage]) -> Self {
        self.packages = packages.to_vec();
        self.registry = RwLock::new(Arc::new(self.discover_bundled()));
        self
    }

    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `command` launched with `args`.
    ///
    /// Never fails: anything that goes wrong yields `available: false`. The
    /// result is cached, so later calls with the same arguments spawn nothing.
    pub async fn resolve_command(&self, command: &str, args: &[String]) -> CommandResolution {
        let key = cache_key(command, args);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(command = %command, "Resolution cache hit");
            return cached;
        }

        let resolution = match self.resolve_uncached(command, args).await {
            Ok(resolution) => resolution,
            Err(e) => {
                tracing::error!(command = %command, error = %e, "Command resolution failed");
                CommandResolution::unavailable(command, args.to_vec())
            }
        };

        if !resolution.available {
            tracing::warn!(command = %command, "Command unavailable and no fallback found");
        }

        self.cache.put(key, resolution.clone());
        resolution
    }

    async fn resolve_uncached(
        &self,
        command: &str,
        args: &[String],
    ) -> Result<CommandResolution, ResolveError> {
        ResolveError::check_command(command)?;

        let probe = AvailabilityProbe::new(self.runner.as_ref(), &self.config.probe_flag);
        if probe.probe(command, self.config.probe_timeout()).await {
            let resolved_path = self
                .lookup()
                .locate(command, self.config.lookup_timeout())
                .await;
            return Ok(CommandResolution::direct(command, args.to_vec(), resolved_path));
        }

        if let Some(resolution) = self.resolve_bundled(command, args).await {
            return Ok(resolution);
        }

        if let Some(path) = self.search().search(command).await {
            return Ok(CommandResolution::system_path(
                command,
                args.to_vec(),
                path.to_string_lossy(),
            ));
        }

        Ok(CommandResolution::unavailable(command, args.to_vec()))
    }

    /// Launch a bundled copy of the requested package through the runtime.
    async fn resolve_bundled(&self, command: &str, args: &[String]) -> Option<CommandResolution> {
        let identity = PackageIdentity::from_args(args)?;
        let bundled_path = self
            .registry()
            .lookup_package(command, &identity.name)?
            .bundled_path
            .clone()?;

        let Some(runtime) = self.resolve_runtime().await else {
            tracing::warn!(
                command = %command,
                package = %identity.name,
                runtime = %self.config.runtime_command,
                "Bundled entry point found but the runtime is unavailable"
            );
            return None;
        };

        // Flags before the package belong to the package runner, not the package
        let mut launch_args = vec![bundled_path.to_string_lossy().into_owned()];
        launch_args.extend_from_slice(&args[identity.index + 1..]);

        tracing::info!(
            command = %command,
            package = %identity.name,
            runtime = %runtime,
            "Using bundled server"
        );
        Some(CommandResolution::bundled(runtime, launch_args))
    }

    async fn resolve_runtime(&self) -> Option<String> {
        let runtime = &self.config.runtime_command;
        if let Some(path) = self
            .lookup()
            .locate(runtime, self.config.lookup_timeout())
            .await
        {
            return Some(path);
        }
        self.search()
            .search(runtime)
            .await
            .map(|path| path.to_string_lossy().into_owned())
    }

    /// Every known bundled package, installed or not.
    pub fn bundled_servers(&self) -> BTreeMap<String, BundledServerEntry> {
        self.registry().all().clone()
    }

    /// Rediscover bundled packages, e.g. after an install into `node_modules`.
    pub fn reload_bundled(&self) {
        let registry = Arc::new(self.discover_bundled());
        *self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner) = registry;
    }

    pub fn installation_instructions(&self, command: &str) -> InstallationInstructions {
        instructions::installation_instructions(command)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        tracing::debug!("Resolution cache cleared");
    }

    /// Snapshot of cached resolutions keyed by `cache_key`.
    pub fn cached_resolutions(&self) -> HashMap<String, CommandResolution> {
        self.cache.entries()
    }

    /// Run the fallback search for `command` and report every candidate.
    ///
    /// Bypasses the cache and the direct probe.
    pub async fn fallback_attempts(&self, command: &str) -> SearchReport {
        self.search().search_with_attempts(command).await
    }

    fn registry(&self) -> Arc<BundledRegistry> {
        Arc::clone(&self.registry.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn discover_bundled(&self) -> BundledRegistry {
        let working_dir: Option<PathBuf> = self
            .config
            .working_dir
            .clone()
            .or_else(|| self.env.current_dir());
        let registry = BundledRegistry::discover(
            self.fs.as_ref(),
            &self.packages,
            working_dir.as_deref(),
            self.config.resources_dir.as_deref(),
        );
        tracing::debug!(
            packages = registry.len(),
            installed = registry.all().values().filter(|e| e.is_installed()).count(),
            "Bundled registry initialized"
        );
        registry
    }

    fn lookup(&self) -> PathLookup<'_> {
        PathLookup::new(self.runner.as_ref(), self.config.platform)
    }

    fn search(&self) -> FallbackPathSearch<'_> {
        FallbackPathSearch::new(
            self.runner.as_ref(),
            self.fs.as_ref(),
            self.env.as_ref(),
            &self.config,
        )
    }
}
