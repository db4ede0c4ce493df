//! Site worker configuration.
//!
//! The config file describes the one worker this tool supervises: the
//! launch command, where it runs, and where the supervisor keeps its lock
//! and PID bookkeeping.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::StatePaths;

/// Default startup grace period before the launcher re-checks the worker.
pub const DEFAULT_STARTUP_GRACE_MS: u64 = 1000;

/// Configuration for the supervised site worker.
///
/// All optional fields fall back to documented defaults, so a minimal
/// config only names the launch command.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    /// Program to launch (resolved against PATH and the working directory).
    pub command: String,

    /// Arguments passed to the worker.
    pub args: Vec<String>,

    /// Working directory for the worker (defaults to the current directory).
    pub working_dir: Option<PathBuf>,

    /// Directory holding the lock marker and PID record (defaults to the
    /// effective working directory, so state lives next to the site).
    pub state_dir: Option<PathBuf>,

    /// Startup grace period in milliseconds before the launcher re-checks
    /// whether the worker already exited.
    pub startup_grace_ms: Option<u64>,
}

impl SiteConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command.trim().is_empty() {
            return Err(ConfigError::MissingCommand);
        }
        Ok(())
    }

    /// Working directory with the default applied.
    #[must_use]
    pub fn effective_working_dir(&self) -> PathBuf {
        self.working_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// State directory with the default applied.
    #[must_use]
    pub fn effective_state_dir(&self) -> PathBuf {
        self.state_dir
            .clone()
            .unwrap_or_else(|| self.effective_working_dir())
    }

    /// Startup grace with the default applied.
    #[must_use]
    pub fn startup_grace(&self) -> Duration {
        Duration::from_millis(self.startup_grace_ms.unwrap_or(DEFAULT_STARTUP_GRACE_MS))
    }

    /// Lock and PID file locations for this config.
    #[must_use]
    pub fn state_paths(&self) -> StatePaths {
        StatePaths::under(&self.effective_state_dir())
    }

    /// Tokens that identify the worker in a process command line.
    ///
    /// The command's file name plus every argument; a process matches the
    /// launch signature when its command line contains all of them.
    #[must_use]
    pub fn signature_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.args.len() + 1);
        let name = Path::new(&self.command)
            .file_name()
            .map_or_else(|| self.command.clone(), |n| n.to_string_lossy().into_owned());
        if !name.trim().is_empty() {
            tokens.push(name);
        }
        tokens.extend(self.args.iter().filter(|a| !a.is_empty()).cloned());
        tokens
    }
}

/// Errors raised while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("config file {path} could not be read: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid JSON for [`SiteConfig`].
    #[error("config file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The config does not name a worker command.
    #[error("worker command must not be empty")]
    MissingCommand,
}
