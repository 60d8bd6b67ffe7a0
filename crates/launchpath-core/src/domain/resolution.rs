//! Command resolution results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which fallback produced a resolution, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackUsed {
    /// A locally bundled package entry point, run through the runtime executable.
    BundledServer,
    /// The command was found in a PATH directory or a well-known install location.
    SystemPath,
}

impl fmt::Display for FallbackUsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BundledServer => write!(f, "bundled-server"),
            Self::SystemPath => write!(f, "system-path"),
        }
    }
}

/// Outcome of resolving a `(command, args)` pair.
///
/// Immutable once produced. Absent optionals are omitted when serialized, so
/// a total failure serializes to exactly `{ command, args, available }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResolution {
    /// Program to launch. For bundled fallbacks this is the runtime executable.
    pub command: String,
    /// Arguments to launch with.
    pub args: Vec<String>,
    /// Whether the command can be launched at all.
    pub available: bool,
    /// Absolute path of the executable, when one was determined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_path: Option<String>,
    /// Fallback strategy that produced this resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_used: Option<FallbackUsed>,
}

impl CommandResolution {
    /// The command could not be resolved by any strategy.
    pub fn unavailable(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            available: false,
            resolved_path: None,
            fallback_used: None,
        }
    }

    /// The command ran directly. `resolved_path` is best-effort.
    pub fn direct(
        command: impl Into<String>,
        args: Vec<String>,
        resolved_path: Option<String>,
    ) -> Self {
        Self {
            command: command.into(),
            args,
            available: true,
            resolved_path,
            fallback_used: None,
        }
    }

    /// The command was found by the fallback path search.
    pub fn system_path(
        command: impl Into<String>,
        args: Vec<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            args,
            available: true,
            resolved_path: Some(path.into()),
            fallback_used: Some(FallbackUsed::SystemPath),
        }
    }

    /// A bundled entry point launched through a runtime executable.
    ///
    /// `args` must already start with the bundled entry-point path.
    pub fn bundled(runtime_path: impl Into<String>, args: Vec<String>) -> Self {
        let runtime_path = runtime_path.into();
        Self {
            command: runtime_path.clone(),
            args,
            available: true,
            resolved_path: Some(runtime_path),
            fallback_used: Some(FallbackUsed::BundledServer),
        }
    }

    /// Program to hand to a process spawner: the resolved path when known.
    pub fn program(&self) -> &str {
        self.resolved_path.as_deref().unwrap_or(&self.command)
    }
}

/// Canonical cache key for a `(command, args)` pair.
///
/// Different argument sets for the same command give different keys.
pub fn cache_key(command: &str, args: &[String]) -> String {
    format!("{command} {}", args.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_cache_key_distinguishes_arguments() {
        assert_eq!(cache_key("npx", &args(&["-y", "pkg"])), "npx -y pkg");
        assert_ne!(cache_key("x", &args(&["a"])), cache_key("x", &args(&["b"])));
        assert_eq!(cache_key("x", &[]), "x ");
    }

    #[test]
    fn test_unavailable_serializes_without_optionals() {
        let resolution = CommandResolution::unavailable("uvx", args(&["mcp-server-fetch"]));
        let json = serde_json::to_value(&resolution).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "command": "uvx",
                "args": ["mcp-server-fetch"],
                "available": false
            })
        );
    }

    #[test]
    fn test_bundled_uses_runtime_as_command() {
        let resolution = CommandResolution::bundled(
            "/usr/bin/node",
            args(&["/app/node_modules/pkg/dist/index.js", "/tmp"]),
        );

        assert_eq!(resolution.command, "/usr/bin/node");
        assert_eq!(resolution.resolved_path.as_deref(), Some("/usr/bin/node"));
        assert_eq!(resolution.fallback_used, Some(FallbackUsed::BundledServer));
        assert_eq!(
            serde_json::to_value(resolution.fallback_used).unwrap(),
            "bundled-server"
        );
    }

    #[test]
    fn test_program_prefers_resolved_path() {
        let direct = CommandResolution::direct("npx", vec![], None);
        assert_eq!(direct.program(), "npx");

        let found = CommandResolution::system_path("npx", vec![], "/opt/homebrew/bin/npx");
        assert_eq!(found.program(), "/opt/homebrew/bin/npx");
    }
}
