//! Process runtime for the sitectl supervisor.
//!
//! Implements the [`sitectl_core::WorkerSupervisor`] port on top of real
//! OS facilities: an exclusive lock marker and atomic PID record on the
//! filesystem, null-signal/process-table liveness probes, detached
//! worker launches and fire-and-forget termination.

#![deny(unsafe_code)]

pub mod launch;
pub mod lockfile;
pub mod pidfile;
pub mod probe;
pub mod shutdown;
pub mod supervisor;

pub use launch::WorkerHandle;
pub use lockfile::{LockFile, LockState};
pub use pidfile::PidFile;
pub use probe::{find_worker, is_worker_process, pid_alive};
pub use shutdown::terminate_pid;
pub use supervisor::Supervisor;
