//! Main commands enum for the supervisor CLI.

use clap::Subcommand;

/// Available commands for the site worker supervisor.
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the site worker (fails if an instance is already claimed)
    Start,

    /// Terminate the site worker and clean up its state files
    Stop,

    /// Report whether the site worker is currently running
    Status,

    /// Show the resolved configuration and state file paths
    Paths,
}
