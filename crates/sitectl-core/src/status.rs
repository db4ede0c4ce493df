//! Observable worker state.

use std::fmt;

/// Liveness of the supervised worker as reported by `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStatus {
    /// No instance lock is present, or stale state was just reconciled.
    Stopped,
    /// A live worker was found.
    Running {
        /// PID of the live process.
        pid: u32,
        /// `true` when the PID came from the PID record; `false` when the
        /// record was missing or dead and the worker was recovered by a
        /// process-table scan.
        recorded: bool,
    },
}

impl WorkerStatus {
    /// Whether this status reports a live worker.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

impl fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => write!(f, "site worker is not running"),
            Self::Running {
                pid,
                recorded: true,
            } => {
                write!(f, "site worker is running (pid {pid})")
            }
            Self::Running {
                pid,
                recorded: false,
            } => {
                write!(
                    f,
                    "site worker is running (pid {pid}, recovered by process scan)"
                )
            }
        }
    }
}
