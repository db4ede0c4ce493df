//! Exclusive instance lock marker.
//!
//! The marker file is the only mutex between independent invocations:
//! creation is an atomic create-exclusive, presence alone means the
//! instance is claimed, and release is an idempotent delete. Nothing is
//! written into the file; the filesystem entry itself is the claim.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Result of a lock acquisition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// The marker was created by this call.
    Acquired,
    /// The marker already existed; another invocation holds the claim.
    AlreadyHeld,
}

/// Exclusive marker file guarding the single-instance invariant.
#[derive(Debug, Clone)]
pub struct LockFile {
    path: PathBuf,
}

impl LockFile {
    /// Wrap a marker file location.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the marker file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Attempt an atomic create-exclusive of the marker.
    ///
    /// Never blocks or retries; callers decide how to report
    /// [`LockState::AlreadyHeld`].
    pub fn acquire(&self) -> io::Result<LockState> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => {
                debug!(path = %self.path.display(), "instance lock acquired");
                Ok(LockState::Acquired)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(LockState::AlreadyHeld),
            Err(e) => Err(e),
        }
    }

    /// Delete the marker (idempotent - no error if missing).
    pub fn release(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "instance lock released");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Whether the marker currently exists.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[test]
    fn acquire_release_cycle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let lock = LockFile::new(dir.path().join("site.lock"));

        assert_eq!(lock.acquire().expect("acquire"), LockState::Acquired);
        assert!(lock.is_held());
        assert_eq!(
            lock.acquire().expect("second acquire"),
            LockState::AlreadyHeld
        );

        assert_ok!(lock.release());
        assert!(!lock.is_held());
        assert_eq!(lock.acquire().expect("reacquire"), LockState::Acquired);
        assert_ok!(lock.release());
    }

    #[test]
    fn release_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let lock = LockFile::new(dir.path().join("site.lock"));

        assert_ok!(lock.release());
        assert_eq!(lock.acquire().expect("acquire"), LockState::Acquired);
        assert_ok!(lock.release());
        assert_ok!(lock.release());
    }

    #[test]
    fn acquire_creates_the_state_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let lock = LockFile::new(dir.path().join("state").join("site.lock"));

        assert_eq!(lock.acquire().expect("acquire"), LockState::Acquired);
        assert!(lock.path().exists());
    }
}
