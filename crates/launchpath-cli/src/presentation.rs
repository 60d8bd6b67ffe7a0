//! Terminal formatting for resolver output.

use std::collections::BTreeMap;
use std::fmt::Write;

use launchpath_core::{BundledServerEntry, CommandResolution, InstallationInstructions};

/// Multi-line summary of a resolution and the `PATH` it would launch with.
pub fn format_resolution(resolution: &CommandResolution, effective_path: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "command:   {}", resolution.command);
    let _ = writeln!(out, "args:      {}", resolution.args.join(" "));
    let _ = writeln!(
        out,
        "available: {}",
        if resolution.available { "yes" } else { "no" }
    );
    if let Some(ref path) = resolution.resolved_path {
        let _ = writeln!(out, "resolved:  {path}");
    }
    if let Some(fallback) = resolution.fallback_used {
        let _ = writeln!(out, "fallback:  {fallback}");
    }
    if resolution.available {
        let _ = writeln!(out, "PATH:      {effective_path}");
    }
    out
}

pub fn format_instructions(instructions: &InstallationInstructions) -> String {
    let mut out = format!("{}\n{}\n", instructions.title, instructions.message);
    for action in &instructions.actions {
        let _ = write!(out, "  - {}", action.label);
        if let Some(ref url) = action.url {
            let _ = write!(out, ": {url}");
        }
        if let Some(ref command) = action.command {
            let _ = write!(out, ": {command}");
        }
        out.push('\n');
    }
    out
}

/// One line per bundled package: status, key and entry point.
pub fn format_bundled(entries: &BTreeMap<String, BundledServerEntry>) -> String {
    if entries.is_empty() {
        return "No bundled packages are known.\n".to_string();
    }
    let width = entries.keys().map(String::len).max().unwrap_or(0);
    let mut out = String::new();
    for (key, entry) in entries {
        match entry.bundled_path {
            Some(ref path) => {
                let _ = writeln!(out, "installed  {key:<width$}  {}", path.display());
            }
            None => {
                let _ = writeln!(out, "missing    {key}");
            }
        }
    }
    out
}
