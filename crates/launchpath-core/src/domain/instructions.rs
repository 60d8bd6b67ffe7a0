//! Installation guidance for missing commands.

use serde::{Deserialize, Serialize};

/// Descriptive guidance shown when a command cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationInstructions {
    pub title: String,
    pub message: String,
    pub actions: Vec<InstallAction>,
}

/// A single suggested step: a download link, a shell snippet, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallAction {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl InstallAction {
    /// An action that points at a download page.
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: Some(url.into()),
            command: None,
        }
    }

    /// An action that suggests a shell command.
    pub fn command(label: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: None,
            command: Some(command.into()),
        }
    }
}
