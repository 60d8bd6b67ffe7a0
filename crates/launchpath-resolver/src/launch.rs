//! Environment for launching a resolved command.

use std::collections::HashSet;

use launchpath_core::{CommandResolution, EnvProvider, Platform};

/// `PATH` value for a child launched from `resolution`.
///
/// The resolved executable's directory goes first so tools that shell out to
/// siblings (`npx` calling `node`) find the same installation. The current
/// `PATH` and `extra_dirs` follow; duplicates keep their first position.
pub fn effective_path(
    resolution: &CommandResolution,
    env: &dyn EnvProvider,
    platform: Platform,
    extra_dirs: &[String],
) -> String {
    let exe_dir = resolution
        .resolved_path
        .as_deref()
        .and_then(|path| parent_dir(path, platform));

    let current = env
        .get_str("PATH")
        .map(|value| platform.split_path_list(&value))
        .unwrap_or_default();

    let mut seen = HashSet::new();
    let dirs: Vec<&str> = exe_dir
        .into_iter()
        .chain(current.iter().map(String::as_str))
        .chain(extra_dirs.iter().map(String::as_str))
        .filter(|dir| seen.insert(*dir))
        .collect();

    let separator = platform.path_list_separator().to_string();
    dirs.join(separator.as_str())
}

fn parent_dir(path: &str, platform: Platform) -> Option<&str> {
    let windows = platform.is_windows();
    let index = path.rfind(|c: char| c == '/' || (windows && c == '\\'))?;
    if index == 0 {
        return Some(&path[..1]);
    }
    Some(&path[..index])
}
