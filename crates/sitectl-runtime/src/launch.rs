//! Detached worker launch with startup verification.
//!
//! The worker must outlive the supervising invocation: it gets its own
//! process group on Unix and its own console on Windows, stdin closed and
//! both output streams piped so an immediate crash can be diagnosed. The
//! bounded startup grace narrows (but cannot eliminate) the window
//! between "spawned" and "crashed right away".

use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::Child;
use tracing::debug;

use sitectl_core::{SiteConfig, SupervisorError};

/// In-memory reference to a freshly launched worker.
///
/// Holds the child only for startup verification; nothing beyond the PID
/// is ever persisted.
#[derive(Debug)]
pub struct WorkerHandle {
    /// PID of the spawned worker.
    pub pid: u32,
    pub(crate) child: Child,
}

/// Spawn the configured worker fully detached and verify it survives the
/// startup grace period.
///
/// # Errors
///
/// [`SupervisorError::WorkerNotFound`] when the command cannot be
/// resolved, [`SupervisorError::Launch`] when the spawn fails or the
/// worker exits during the grace period (captured stderr included).
pub async fn launch(config: &SiteConfig) -> Result<WorkerHandle, SupervisorError> {
    let workdir = config.effective_working_dir();
    let program = which::which_in(&config.command, std::env::var_os("PATH"), &workdir)
        .map_err(|_| SupervisorError::WorkerNotFound(config.command.clone()))?;

    let mut command = std::process::Command::new(&program);
    command
        .args(&config.args)
        .current_dir(&workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    // Detach: the worker must survive this process exiting
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        use windows::Win32::System::Threading::CREATE_NEW_CONSOLE;
        command.creation_flags(CREATE_NEW_CONSOLE.0);
    }

    let mut child = tokio::process::Command::from(command).spawn().map_err(|e| {
        SupervisorError::Launch(format!("failed to spawn {}: {e}", program.display()))
    })?;

    let Some(pid) = child.id() else {
        return Err(SupervisorError::Launch(
            "exited before a pid could be observed".into(),
        ));
    };
    debug!(pid, program = %program.display(), "worker spawned, verifying startup");

    // Bounded delay, then re-check: an immediate crash is a launch failure
    tokio::time::sleep(config.startup_grace()).await;

    match child.try_wait() {
        Ok(Some(status)) => Err(SupervisorError::Launch(
            startup_failure_message(&mut child, status).await,
        )),
        Ok(None) => Ok(WorkerHandle { pid, child }),
        Err(e) => Err(SupervisorError::Launch(format!(
            "could not verify startup: {e}"
        ))),
    }
}

/// Render the captured stderr of a worker that died during startup.
async fn startup_failure_message(child: &mut Child, status: std::process::ExitStatus) -> String {
    let mut stderr = String::new();
    if let Some(mut pipe) = child.stderr.take() {
        let _ = pipe.read_to_string(&mut stderr).await;
    }
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("exited during startup ({status})")
    } else {
        format!("exited during startup ({status}): {stderr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(command: &str, args: &[&str], dir: &std::path::Path) -> SiteConfig {
        SiteConfig {
            command: command.into(),
            args: args.iter().map(ToString::to_string).collect(),
            working_dir: Some(dir.to_path_buf()),
            startup_grace_ms: Some(200),
            ..SiteConfig::default()
        }
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn launch_detaches_a_surviving_worker() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = test_config("sleep", &["60"], dir.path());

        let mut handle = launch(&config).await.expect("launch failed");
        assert!(crate::probe::pid_alive(handle.pid));

        // Reap so the worker does not linger past the test
        handle.child.start_kill().expect("kill");
        let _ = handle.child.wait().await;
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn launch_surfaces_stderr_on_an_immediate_exit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = test_config("sh", &["-c", "echo boom >&2; exit 3"], dir.path());

        let err = launch(&config).await.expect_err("launch must fail");
        match err {
            SupervisorError::Launch(message) => {
                assert!(message.contains("boom"), "stderr missing from: {message}");
            }
            other => panic!("expected a launch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn launch_rejects_an_unresolvable_command() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = test_config("definitely-not-a-real-binary", &[], dir.path());

        let err = launch(&config).await.expect_err("launch must fail");
        assert!(matches!(err, SupervisorError::WorkerNotFound(_)));
    }
}
