//! Supervisor orchestration: start, stop and status with reconciliation.
//!
//! The filesystem pair (lock marker + PID record) is the entire shared
//! state between invocations. Every path through here leaves the pair
//! either consistent or deleted; stale bookkeeping does not outlive the
//! next status or stop call.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use sitectl_core::{SiteConfig, SupervisorError, WorkerStatus, WorkerSupervisor};

use crate::launch;
use crate::lockfile::{LockFile, LockState};
use crate::pidfile::PidFile;
use crate::probe;
use crate::shutdown::terminate_pid;

/// Filesystem-backed supervisor for the configured site worker.
pub struct Supervisor {
    config: SiteConfig,
    lock: LockFile,
    pid_file: PidFile,
}

impl Supervisor {
    /// Build a supervisor; state file locations are derived from the
    /// config's state directory.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        let paths = config.state_paths();
        Self {
            lock: LockFile::new(paths.lock),
            pid_file: PidFile::new(paths.pid),
            config,
        }
    }

    /// The configuration this supervisor runs with.
    #[must_use]
    pub const fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Synchronous status core; reconciles stale state as a side effect.
    fn probe_status(&self) -> WorkerStatus {
        if !self.lock.is_held() {
            return WorkerStatus::Stopped;
        }

        match self.pid_file.read() {
            Ok(pid) if probe::pid_alive(pid) => {
                return WorkerStatus::Running {
                    pid,
                    recorded: true,
                };
            }
            Ok(pid) => debug!(pid, "recorded pid is not alive"),
            Err(e) => debug!(error = %e, "pid record unavailable"),
        }

        // Record missing or dead: the worker itself may still be out there
        if let Some(pid) = probe::find_worker(&self.config) {
            // Report only; the record is deliberately not rewritten
            return WorkerStatus::Running {
                pid,
                recorded: false,
            };
        }

        self.reconcile();
        WorkerStatus::Stopped
    }

    /// Delete both state files after confirming nothing is alive.
    fn reconcile(&self) {
        info!("no live worker behind the instance lock; clearing stale state");
        if let Err(e) = self.pid_file.clear() {
            warn!(error = %e, "could not clear stale pid record");
        }
        if let Err(e) = self.lock.release() {
            warn!(error = %e, "could not release stale instance lock");
        }
    }

    /// Decide whether a held lock blocks a new start.
    ///
    /// A lock with no usable record is left untouched: it may belong to a
    /// start in flight that has not written its record yet, and deleting
    /// it here would let two workers through. A record naming a dead
    /// process is unambiguous leftovers and is reclaimed.
    fn preflight(&self) -> Result<(), SupervisorError> {
        if !self.lock.is_held() {
            return Ok(());
        }

        match self.pid_file.read() {
            Ok(pid) if probe::pid_alive(pid) => Err(SupervisorError::AlreadyRunning(pid)),
            Ok(dead_pid) => {
                if let Some(pid) = probe::find_worker(&self.config) {
                    return Err(SupervisorError::AlreadyRunning(pid));
                }
                info!(pid = dead_pid, "reclaiming stale lock from a dead worker");
                self.reconcile();
                Ok(())
            }
            Err(e) => {
                if let Some(pid) = probe::find_worker(&self.config) {
                    return Err(SupervisorError::AlreadyRunning(pid));
                }
                debug!(error = %e, "lock held without a usable record; refusing to reclaim");
                Err(SupervisorError::LockContention)
            }
        }
    }

    /// Pick the terminate target and send the request.
    ///
    /// The recorded PID is signalled only when it is alive and still
    /// matches the launch signature; a dead, reused, absent or unreadable
    /// record routes to the signature scan instead.
    fn terminate_worker(&self) -> Result<(), SupervisorError> {
        match self.pid_file.read() {
            Ok(pid) if probe::pid_alive(pid) && probe::is_worker_process(pid, &self.config) => {
                terminate_pid(pid).map_err(|e| SupervisorError::Termination {
                    pid,
                    reason: e.to_string(),
                })
            }
            Ok(pid) if probe::pid_alive(pid) => {
                // PID reuse: something else lives at this pid now
                warn!(
                    pid,
                    "recorded pid no longer matches the worker; scanning instead"
                );
                self.terminate_by_signature()
            }
            Ok(pid) => {
                debug!(pid, "recorded pid is dead; falling back to a process scan");
                self.terminate_by_signature()
            }
            Err(e) => {
                debug!(error = %e, "pid record unavailable; falling back to a process scan");
                self.terminate_by_signature()
            }
        }
    }

    fn terminate_by_signature(&self) -> Result<(), SupervisorError> {
        match probe::find_worker(&self.config) {
            Some(pid) => {
                info!(pid, "terminating worker found by process scan");
                terminate_pid(pid).map_err(|e| SupervisorError::Termination {
                    pid,
                    reason: e.to_string(),
                })
            }
            None => {
                debug!("no process matches the worker signature; nothing to terminate");
                Ok(())
            }
        }
    }
}

#[async_trait]
impl WorkerSupervisor for Supervisor {
    async fn start(&self) -> Result<u32, SupervisorError> {
        self.preflight()?;

        match self.lock.acquire()? {
            LockState::AlreadyHeld => return Err(SupervisorError::LockContention),
            LockState::Acquired => {}
        }

        let handle = match launch::launch(&self.config).await {
            Ok(handle) => handle,
            Err(e) => {
                // A failed launch must not leave the claim behind
                if let Err(release_err) = self.lock.release() {
                    warn!(error = %release_err, "could not release lock after a failed launch");
                }
                return Err(e);
            }
        };

        if let Err(e) = self.pid_file.write(handle.pid) {
            // The worker is up; a lost record is recoverable by scan
            warn!(error = %e, pid = handle.pid, "could not write the pid record");
        }

        info!(pid = handle.pid, "site worker started");
        Ok(handle.pid)
    }

    async fn stop(&self) -> Result<(), SupervisorError> {
        if self.probe_status() == WorkerStatus::Stopped {
            return Err(SupervisorError::NotRunning);
        }

        let termination = self.terminate_worker();

        // Bookkeeping is cleared no matter how termination went; stale
        // supervisory state is worse than an orphaned process
        let mut cleanup: Option<std::io::Error> = None;
        if let Err(e) = self.pid_file.clear() {
            warn!(error = %e, "could not clear the pid record during stop");
            cleanup = Some(e);
        }
        if let Err(e) = self.lock.release() {
            warn!(error = %e, "could not release the instance lock during stop");
            cleanup = Some(e);
        }

        termination?;
        if let Some(e) = cleanup {
            return Err(SupervisorError::Io(e));
        }

        info!("site worker stopped");
        Ok(())
    }

    async fn status(&self) -> WorkerStatus {
        self.probe_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker_config(dir: &std::path::Path, marker: &str) -> SiteConfig {
        SiteConfig {
            command: "sleep".into(),
            args: vec![marker.into()],
            working_dir: Some(dir.to_path_buf()),
            startup_grace_ms: Some(100),
            ..SiteConfig::default()
        }
    }

    #[tokio::test]
    async fn start_contends_on_a_bare_foreign_lock() {
        let dir = tempfile::tempdir().expect("tempdir");
        let supervisor = Supervisor::new(worker_config(dir.path(), "6001"));

        // A lock with no pid record looks like a start in flight
        std::fs::write(supervisor.config().state_paths().lock, "").expect("seed lock");

        let err = supervisor.start().await.expect_err("start must contend");
        assert!(matches!(err, SupervisorError::LockContention));
        assert!(supervisor.config().state_paths().lock.exists());
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn start_reclaims_a_stale_lock_with_a_dead_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let supervisor = Supervisor::new(worker_config(dir.path(), "6002"));
        let paths = supervisor.config().state_paths();

        std::fs::write(&paths.lock, "").expect("seed lock");
        std::fs::write(&paths.pid, "999999\n").expect("seed record");

        let pid = supervisor.start().await.expect("start must reclaim");
        assert!(probe::pid_alive(pid));

        supervisor.stop().await.expect("stop");
    }

    #[tokio::test]
    async fn stop_without_any_state_reports_not_running() {
        let dir = tempfile::tempdir().expect("tempdir");
        let supervisor = Supervisor::new(worker_config(dir.path(), "6003"));

        let err = supervisor.stop().await.expect_err("stop must fail");
        assert!(matches!(err, SupervisorError::NotRunning));
    }

    #[tokio::test]
    async fn status_without_a_lock_is_stopped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let supervisor = Supervisor::new(worker_config(dir.path(), "6004"));

        assert_eq!(supervisor.status().await, WorkerStatus::Stopped);
    }
}
