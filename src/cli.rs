use clap::{ArgAction, CommandFactory, Parser, Subcommand};

/// cura-sync command-line interface
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cura-sync",
    version,
    about = "Sync the Cura configuration directory with a remote git repository",
    long_about = None,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv). `RUST_LOG` overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show this help
    Help,

    /// Turn the configuration directory into a repository and push it to URL
    Init {
        /// Remote repository URL
        #[arg(value_name = "URL")]
        url: Option<String>,
    },

    /// Replace the configuration directory with a clone of URL (the old one is backed up)
    Clone {
        /// Remote repository URL
        #[arg(value_name = "URL")]
        url: Option<String>,
    },

    /// Pull remote changes into the configuration directory
    Pull,

    /// Commit local changes and push them to the remote
    Push,

    /// Print the configuration directory path
    Cwd,

    #[command(external_subcommand)]
    Unrecognized(Vec<String>),
}

/// Rendered help text.
#[must_use]
pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}
