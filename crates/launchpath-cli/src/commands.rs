//! Available subcommands.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve how a command would be launched
    ///
    /// Options go before the command: everything after it is passed through
    /// as the command's own arguments.
    Resolve {
        /// Print the resolution as JSON
        #[arg(long)]
        json: bool,
        /// Command to resolve (e.g. "npx")
        command: String,
        /// Arguments the command would be launched with
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List bundled adapter packages and where they were found
    Bundled {
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show installation guidance for a command
    Instructions {
        /// Print the guidance as JSON
        #[arg(long)]
        json: bool,
        /// Command that could not be found
        command: String,
    },

    /// Show every fallback location checked for a command
    Candidates {
        /// Command to search for
        command: String,
    },
}
