//! Platform liveness and discovery probes.
//!
//! `pid_alive` answers "does this PID exist right now" and nothing more;
//! PID reuse makes it a best-effort signal. `find_worker` and
//! `is_worker_process` corroborate against the process table using the
//! launch signature, and fail closed when in doubt.

use sysinfo::System;

use sitectl_core::SiteConfig;

/// Check whether a PID currently exists.
///
/// Unix sends the null signal: `ESRCH` means gone, while a permission
/// error still means alive. Windows does a process-table lookup. PID 0
/// and PIDs that do not fit the platform PID type report `false`.
#[cfg(unix)]
#[must_use]
pub fn pid_alive(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal;
    use nix::unistd::Pid;

    if pid == 0 {
        return false;
    }
    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };

    // Signal None is the null signal: existence check without delivery
    match signal::kill(Pid::from_raw(raw), None) {
        Ok(()) => true,
        Err(Errno::ESRCH) => false, // No such process
        Err(_) => true,             // Exists, but owned by someone else
    }
}

#[cfg(windows)]
#[must_use]
pub fn pid_alive(pid: u32) -> bool {
    if pid == 0 {
        return false;
    }
    let sys = System::new_all();
    sys.process(sysinfo::Pid::from_u32(pid)).is_some()
}

#[cfg(not(any(unix, windows)))]
#[must_use]
pub fn pid_alive(_pid: u32) -> bool {
    false
}

/// Scan the process table for a live process matching the worker launch
/// signature.
///
/// Returns the first match, skipping the current process. This is the
/// recovery path for a lost PID record: bookkeeping can disappear while
/// the worker itself survives.
#[must_use]
pub fn find_worker(config: &SiteConfig) -> Option<u32> {
    let tokens = config.signature_tokens();
    if tokens.is_empty() {
        return None;
    }

    let own_pid = std::process::id();
    let sys = System::new_all();
    for (pid, process) in sys.processes() {
        let pid = pid.as_u32();
        if pid == own_pid {
            continue;
        }
        if matches_tokens(&cmdline(process), &tokens) {
            return Some(pid);
        }
    }
    None
}

/// Corroborate that `pid` still looks like the supervised worker.
///
/// Returns `false` if the process is gone, its command line is empty, or
/// the signature does not match. This keeps a reused PID from being
/// treated (and terminated) as the worker.
#[must_use]
pub fn is_worker_process(pid: u32, config: &SiteConfig) -> bool {
    let tokens = config.signature_tokens();
    if tokens.is_empty() {
        return false;
    }

    let sys = System::new_all();
    sys.process(sysinfo::Pid::from_u32(pid))
        .is_some_and(|process| matches_tokens(&cmdline(process), &tokens))
}

fn cmdline(process: &sysinfo::Process) -> String {
    process
        .cmd()
        .iter()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

fn matches_tokens(cmdline: &str, tokens: &[String]) -> bool {
    !cmdline.is_empty() && tokens.iter().all(|token| cmdline.contains(token.as_str()))
}
