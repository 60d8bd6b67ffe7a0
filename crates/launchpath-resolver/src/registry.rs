//! Registry of adapter packages that may ship with the host.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use launchpath_core::{BundledServerEntry, FsProvider, bundled_key};

/// A package the registry knows how to find locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundledPackage {
    /// Logical command the package is normally launched through.
    pub command: &'static str,
    pub package_name: &'static str,
}

impl BundledPackage {
    pub const fn npx(package_name: &'static str) -> Self {
        Self {
            command: "npx",
            package_name,
        }
    }
}

/// Adapter packages shipped with desktop distributions.
pub const BUNDLED_PACKAGES: &[BundledPackage] = &[
    BundledPackage::npx("@modelcontextprotocol/server-filesystem"),
    BundledPackage::npx("@modelcontextprotocol/server-memory"),
    BundledPackage::npx("@modelcontextprotocol/server-sequential-thinking"),
    BundledPackage::npx("@modelcontextprotocol/server-everything"),
    BundledPackage::npx("@modelcontextprotocol/server-brave-search"),
];

/// Entry-point files tried inside a package directory, in order.
const ENTRY_POINT_SUFFIXES: &[&str] = &["dist/index.js", "build/index.js", "lib/index.js"];

/// Known packages and their local entry points, keyed by `<command>:<package>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundledRegistry {
    entries: BTreeMap<String, BundledServerEntry>,
}

impl BundledRegistry {
    /// Look for each package under the working directory and, in a packaged
    /// app, under the resources directory.
    pub fn discover(
        fs: &dyn FsProvider,
        packages: &[BundledPackage],
        working_dir: Option<&Path>,
        resources_dir: Option<&Path>,
    ) -> Self {
        let entries = packages
            .iter()
            .map(|package| {
                let bundled_path = install_roots(package.package_name, working_dir, resources_dir)
                    .iter()
                    .find_map(|root| find_entry_point(fs, root));

                match bundled_path {
                    Some(ref path) => tracing::debug!(
                        package = %package.package_name,
                        path = %path.display(),
                        "Found bundled entry point"
                    ),
                    None => tracing::debug!(
                        package = %package.package_name,
                        "No bundled entry point"
                    ),
                }

                let entry = BundledServerEntry {
                    command: package.command.to_string(),
                    args: vec!["-y".to_string(), package.package_name.to_string()],
                    package_name: package.package_name.to_string(),
                    bundled_path,
                };
                (entry.key(), entry)
            })
            .collect();

        Self { entries }
    }

    pub fn lookup(&self, key: &str) -> Option<&BundledServerEntry> {
        self.entries.get(key)
    }

    /// Entry for `command` launching `package_name`.
    pub fn lookup_package(&self, command: &str, package_name: &str) -> Option<&BundledServerEntry> {
        self.lookup(&bundled_key(command, package_name))
    }

    pub const fn all(&self) -> &BTreeMap<String, BundledServerEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Package directories to check, in priority order.
fn install_roots(
    package_name: &str,
    working_dir: Option<&Path>,
    resources_dir: Option<&Path>,
) -> Vec<PathBuf> {
    let mut roots = Vec::with_capacity(3);
    if let Some(cwd) = working_dir {
        roots.push(join_relative(&cwd.join("node_modules"), package_name));
    }
    if let Some(resources) = resources_dir {
        roots.push(join_relative(
            &resources.join("app.asar.unpacked").join("node_modules"),
            package_name,
        ));
        roots.push(join_relative(&resources.join("node_modules"), package_name));
    }
    roots
}

fn find_entry_point(fs: &dyn FsProvider, root: &Path) -> Option<PathBuf> {
    ENTRY_POINT_SUFFIXES
        .iter()
        .map(|suffix| join_relative(root, suffix))
        .find(|candidate| fs.exists(candidate))
}

/// Join a `/`-separated relative path component by component.
fn join_relative(base: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(base.to_path_buf(), |path, part| path.join(part))
}

/// The package a runner command line refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentity {
    /// Position of the package argument in the original args.
    pub index: usize,
    /// Package name with any `@version` suffix removed.
    pub name: String,
}

impl PackageIdentity {
    /// First non-flag argument, normalized.
    ///
    /// `["-y", "@scope/pkg@1.2.0", "/tmp"]` gives `@scope/pkg` at index 1.
    pub fn from_args(args: &[String]) -> Option<Self> {
        let (index, raw) = args
            .iter()
            .enumerate()
            .find(|(_, arg)| !arg.starts_with('-'))?;
        let name = strip_version(raw);
        if name.is_empty() {
            return None;
        }
        Some(Self {
            index,
            name: name.to_string(),
        })
    }
}

/// `pkg@latest` -> `pkg`, `@scope/pkg@1.0.0` -> `@scope/pkg`.
fn strip_version(package: &str) -> &str {
    // A leading '@' marks a scope, not a version
    package.char_indices()
        .skip(1)
        .find(|&(_, c)| c == '@')
        .map_or(package, |(at, _)| &package[..at])
}
