//! Installation guidance for commands that could not be resolved.

use launchpath_core::{InstallAction, InstallationInstructions};

/// Guidance for installing `command`.
///
/// Accepts bare names and paths; a trailing Windows executable extension is
/// ignored. Unknown commands get a generic message with no actions.
pub fn installation_instructions(command: &str) -> InstallationInstructions {
    match normalize(command).as_str() {
        "node" | "npm" | "npx" => InstallationInstructions {
            title: "Node.js is required".to_string(),
            message: format!(
                "'{command}' ships with Node.js. Install Node.js 18 or newer, then restart the application so the new PATH is picked up."
            ),
            actions: vec![
                InstallAction::link("Download Node.js", "https://nodejs.org/en/download"),
                InstallAction::command("Install with Homebrew (macOS)", "brew install node"),
                InstallAction::command("Install with winget (Windows)", "winget install OpenJS.NodeJS.LTS"),
            ],
        },
        "uv" | "uvx" => InstallationInstructions {
            title: "uv is required".to_string(),
            message: format!(
                "'{command}' is part of uv, the Python package manager used to run Python-based servers."
            ),
            actions: vec![
                InstallAction::link("Installation guide", "https://docs.astral.sh/uv/getting-started/installation/"),
                InstallAction::command(
                    "Install script (macOS/Linux)",
                    "curl -LsSf https://astral.sh/uv/install.sh | sh",
                ),
                InstallAction::command(
                    "Install script (Windows)",
                    "powershell -ExecutionPolicy ByPass -c \"irm https://astral.sh/uv/install.ps1 | iex\"",
                ),
            ],
        },
        "python" | "python3" => InstallationInstructions {
            title: "Python is required".to_string(),
            message: format!("'{command}' was not found. Install Python 3.10 or newer."),
            actions: vec![
                InstallAction::link("Download Python", "https://www.python.org/downloads/"),
                InstallAction::command("Install with Homebrew (macOS)", "brew install python"),
            ],
        },
        "docker" => InstallationInstructions {
            title: "Docker is required".to_string(),
            message: "Docker was not found. Install Docker Desktop and make sure it is running.".to_string(),
            actions: vec![InstallAction::link(
                "Get Docker Desktop",
                "https://www.docker.com/products/docker-desktop/",
            )],
        },
        "git" => InstallationInstructions {
            title: "Git is required".to_string(),
            message: "Git was not found on this system.".to_string(),
            actions: vec![
                InstallAction::link("Download Git", "https://git-scm.com/downloads"),
                InstallAction::command("Install with Xcode tools (macOS)", "xcode-select --install"),
            ],
        },
        _ => InstallationInstructions {
            title: format!("'{command}' not found"),
            message: format!(
                "The command '{command}' could not be found. Install it and make sure it is on your PATH, then try again."
            ),
            actions: Vec::new(),
        },
    }
}

/// Bare lowercase command name: `C:\nodejs\NPX.cmd` -> `npx`.
fn normalize(command: &str) -> String {
    let name = command
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(command)
        .to_ascii_lowercase();
    for ext in [".exe", ".cmd", ".bat"] {
        if let Some(stem) = name.strip_suffix(ext) {
            return stem.to_string();
        }
    }
    name
}
