//! State file locations backing a supervisor instance.
//!
//! The lock marker and PID record live side by side in the state
//! directory, next to the site by default, so independent invocations
//! agree on where to look.

use std::fmt;
use std::path::{Path, PathBuf};

/// File name of the exclusive instance lock marker.
pub const LOCK_FILE_NAME: &str = "site.lock";

/// File name of the PID record.
pub const PID_FILE_NAME: &str = "site.pid";

/// Resolved locations of the lock marker and PID record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    /// Exclusive instance lock marker.
    pub lock: PathBuf,
    /// PID record of the most recently launched worker.
    pub pid: PathBuf,
}

impl StatePaths {
    /// Place both state files directly under `state_dir`.
    #[must_use]
    pub fn under(state_dir: &Path) -> Self {
        Self {
            lock: state_dir.join(LOCK_FILE_NAME),
            pid: state_dir.join(PID_FILE_NAME),
        }
    }
}

impl fmt::Display for StatePaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "lock = {}", self.lock.display())?;
        write!(f, "pid  = {}", self.pid.display())
    }
}
