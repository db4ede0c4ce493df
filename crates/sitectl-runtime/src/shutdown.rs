//! Fire-and-forget worker termination.
//!
//! The supervisor never waits for exit: one terminate request, then
//! bookkeeping cleanup. A worker that ignores the request becomes the
//! operator's concern; stuck supervisory state would be worse.

use std::io;

/// Ask the OS to terminate `pid`.
///
/// Unix sends SIGTERM and treats an already-gone PID (`ESRCH`) as
/// success. Windows forces termination through the process table, again
/// treating an absent PID as success. Other platforms are unsupported.
pub fn terminate_pid(pid: u32) -> io::Result<()> {
    #[cfg(unix)]
    {
        terminate_unix(pid)
    }

    #[cfg(windows)]
    {
        terminate_windows(pid)
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = pid;
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "process termination is not supported on this platform",
        ))
    }
}

#[cfg(unix)]
fn terminate_unix(pid: u32) -> io::Result<()> {
    use nix::errno::Errno;
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid;

    let raw = i32::try_from(pid)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "pid out of range"))?;

    match signal::kill(Pid::from_raw(raw), Signal::SIGTERM) {
        Ok(()) => Ok(()),
        Err(Errno::ESRCH) => Ok(()), // Already gone
        Err(e) => Err(io::Error::other(e)),
    }
}

#[cfg(windows)]
fn terminate_windows(pid: u32) -> io::Result<()> {
    use sysinfo::System;

    let sys = System::new_all();
    let Some(process) = sys.process(sysinfo::Pid::from_u32(pid)) else {
        return Ok(()); // Already gone
    };

    if process.kill() {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "termination request for pid {pid} was rejected"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[test]
    #[cfg(unix)]
    fn terminate_succeeds_for_an_already_gone_pid() {
        assert_ok!(terminate_pid(999_999));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn terminate_stops_a_live_process() {
        use std::time::Duration;

        let mut child = tokio::process::Command::new("sleep")
            .arg("60")
            .spawn()
            .expect("failed to spawn sleep");
        let pid = child.id().expect("no pid for spawned sleep");

        assert_ok!(terminate_pid(pid));

        // Fire-and-forget: give the signal a moment to land, then reap
        let status = tokio::time::timeout(Duration::from_secs(5), child.wait())
            .await
            .expect("sleep did not exit after SIGTERM")
            .expect("wait failed");
        assert!(!status.success());
    }
}
