//! Paths command handler.
//!
//! Displays the resolved configuration for diagnostics: where the config
//! came from, what will be launched and where the state files live.

use std::path::Path;

use anyhow::Result;

use sitectl_core::SiteConfig;

/// Execute the paths command.
///
/// Prints the resolved values in `key = value` format.
pub fn execute(config_path: &Path, config: &SiteConfig) -> Result<()> {
    println!("config = {}", config_path.display());
    println!("command = {}", config.command);
    if !config.args.is_empty() {
        println!("args = {}", config.args.join(" "));
    }
    println!("workdir = {}", config.effective_working_dir().display());
    println!("{}", config.state_paths());
    Ok(())
}
