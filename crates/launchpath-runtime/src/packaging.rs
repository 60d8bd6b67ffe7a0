//! Detection of packaged desktop distributions.
//!
//! When the host runs from a packaged app, bundled adapter packages ship in a
//! resource directory next to the executable rather than in the working
//! directory. Outside a packaged app there is no such directory and detection
//! yields `None`.

use launchpath_core::FsProvider;
use std::path::{Path, PathBuf};

use crate::fs::SystemFs;

/// Resource directory of the running executable's distribution, if any.
pub fn detect_resources_dir() -> Option<PathBuf> {
    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            tracing::debug!(error = %e, "Cannot determine current executable");
            return None;
        }
    };
    let resources = resources_dir_for_exe(&exe, &SystemFs);
    if let Some(ref dir) = resources {
        tracing::debug!(resources_dir = %dir.display(), "Detected packaged resources directory");
    }
    resources
}

/// Resource directory for an executable at `exe`.
///
/// Recognized layouts, in order:
/// 1. macOS bundle: `<App>.app/Contents/MacOS/<exe>` -> `<App>.app/Contents/Resources`
/// 2. `resources` directory beside the executable (Windows/Linux installers)
pub fn resources_dir_for_exe(exe: &Path, fs: &dyn FsProvider) -> Option<PathBuf> {
    let exe_dir = exe.parent()?;

    let in_macos_bundle = exe_dir.file_name().is_some_and(|name| name == "MacOS")
        && exe_dir
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|name| name == "Contents");
    if in_macos_bundle {
        if let Some(contents) = exe_dir.parent() {
            let resources = contents.join("Resources");
            if fs.exists(&resources) {
                return Some(resources);
            }
        }
    }

    let beside = exe_dir.join("resources");
    fs.exists(&beside).then_some(beside)
}
