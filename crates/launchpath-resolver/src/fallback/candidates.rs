//! Ordered candidate locations for a command.

use launchpath_core::{EnvProvider, Platform};

use super::types::FallbackCandidate;

/// Well-known install locations on macOS.
const MACOS_DIRS: &[&str] = &[
    "/opt/homebrew/bin",
    "/usr/local/bin",
    "/usr/bin",
    "/bin",
    "${HOME}/.volta/bin",
    "${HOME}/.asdf/shims",
    "${HOME}/.nvm/versions/node/*/bin",
    "${HOME}/.local/share/fnm/node-versions/*/installation/bin",
    "${HOME}/.bun/bin",
    "${HOME}/.local/bin",
    "${HOME}/.cargo/bin",
    "/Library/Frameworks/Python.framework/Versions/*/bin",
];

/// Well-known install locations on Linux and other Unix systems.
const UNIX_DIRS: &[&str] = &[
    "/usr/local/bin",
    "/usr/bin",
    "/bin",
    "/snap/bin",
    "${HOME}/.volta/bin",
    "${HOME}/.asdf/shims",
    "${HOME}/.nvm/versions/node/*/bin",
    "${HOME}/.local/share/fnm/node-versions/*/installation/bin",
    "${HOME}/.bun/bin",
    "${HOME}/.local/bin",
    "${HOME}/.cargo/bin",
];

/// Well-known install locations on Windows.
const WINDOWS_DIRS: &[&str] = &[
    r"${ProgramFiles}\nodejs",
    r"${ProgramFiles(x86)}\nodejs",
    r"${APPDATA}\npm",
    r"${LOCALAPPDATA}\Volta\bin",
    r"${NVM_SYMLINK}",
    r"${APPDATA}\nvm\*",
    r"${LOCALAPPDATA}\Programs\Python\Python*",
    r"${LOCALAPPDATA}\Programs\Python\Python*\Scripts",
    r"${USERPROFILE}\.local\bin",
    r"${USERPROFILE}\.cargo\bin",
    r"${ProgramFiles}\Docker\Docker\resources\bin",
    r"${ProgramFiles}\Git\cmd",
];

/// Directory templates searched after `PATH` on `platform`.
pub const fn well_known_dirs(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Windows => WINDOWS_DIRS,
        Platform::MacOs => MACOS_DIRS,
        Platform::Linux | Platform::OtherUnix => UNIX_DIRS,
    }
}

/// Every location to try for `command`, in search order.
///
/// `PATH` directories come first, then the well-known install locations,
/// then `extra_dirs`. Each directory contributes one candidate per
/// executable name the platform accepts. Relative `PATH` and extra entries
/// are skipped; the rest are taken literally.
pub fn candidate_list(
    command: &str,
    platform: Platform,
    env: &dyn EnvProvider,
    extra_dirs: &[String],
) -> Vec<FallbackCandidate> {
    let names = platform.executable_names(command);

    let path_dirs = env
        .get_str("PATH")
        .map(|value| platform.split_path_list(&value))
        .unwrap_or_default();

    let mut candidates = Vec::new();
    for dir in path_dirs.iter().filter(|dir| is_searchable(platform, dir)) {
        candidates.extend(names.iter().map(|name| FallbackCandidate::literal(dir, name, platform)));
    }
    for dir in well_known_dirs(platform) {
        candidates.extend(names.iter().map(|name| FallbackCandidate::template(dir, name, platform)));
    }
    for dir in extra_dirs.iter().filter(|dir| is_searchable(platform, dir)) {
        candidates.extend(names.iter().map(|name| FallbackCandidate::literal(dir, name, platform)));
    }
    candidates
}

fn is_searchable(platform: Platform, dir: &str) -> bool {
    let absolute = platform.is_absolute(dir);
    if !absolute {
        tracing::debug!(dir = %dir, "Skipping relative search directory");
    }
    absolute
}

/// Substitute every `${NAME}` in `template` from `env`.
///
/// Returns the name of the first unset variable as the error. An unterminated
/// `${` is kept literally.
pub fn expand_vars(template: &str, env: &dyn EnvProvider) -> Result<String, String> {
    let mut expanded = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        expanded.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            expanded.push_str(&rest[start..]);
            return Ok(expanded);
        };

        let name = &after[..end];
        match env.get_str(name) {
            Some(value) => expanded.push_str(&value),
            None => return Err(name.to_string()),
        }
        rest = &after[end + 1..];
    }

    expanded.push_str(rest);
    Ok(expanded)
}
