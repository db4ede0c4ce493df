//! Supervisor error taxonomy.
//!
//! Every variant is recovered at the supervisor boundary into an
//! [`Outcome`](crate::outcome::Outcome) pair; none of them abort the
//! calling process.

use std::io;

use thiserror::Error;

/// Errors surfaced by supervisor operations.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// `start` was requested while a worker is already up.
    #[error("site worker is already running (pid {0})")]
    AlreadyRunning(u32),

    /// `stop` found nothing to act on.
    #[error("site worker is not running")]
    NotRunning,

    /// The instance lock is held by another invocation (a concurrent
    /// start may be mid-flight).
    #[error("another invocation holds the instance lock")]
    LockContention,

    /// The worker command could not be resolved to an executable.
    #[error("worker command not found: {0}")]
    WorkerNotFound(String),

    /// The worker exited during the startup grace period; the payload is
    /// its captured stderr, or its exit status when stderr was empty.
    #[error("worker failed to start: {0}")]
    Launch(String),

    /// The terminate request could not be delivered. Lock and PID
    /// bookkeeping is cleaned up before this is reported.
    #[error("failed to terminate worker (pid {pid}): {reason}")]
    Termination { pid: u32, reason: String },

    /// Lock or PID file access failed at the filesystem level.
    #[error(transparent)]
    Io(#[from] io::Error),
}
