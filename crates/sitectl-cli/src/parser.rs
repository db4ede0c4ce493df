//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for the site worker supervisor.
///
/// This is the top-level parser that handles global options and
/// dispatches to subcommands.
#[derive(Parser)]
#[command(name = "sitectl")]
#[command(about = "Start, stop and inspect the personal-site worker")]
#[command(version)]
pub struct Cli {
    /// Path to the site config file
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        env = "SITECTL_CONFIG",
        default_value = "sitectl.json"
    )]
    pub config: PathBuf,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
