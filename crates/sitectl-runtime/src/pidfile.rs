//! Atomic PID record I/O.
//!
//! Format: a single line containing the worker PID. Writes go through a
//! sibling temp file plus rename so a crash mid-write never leaves a torn
//! record behind.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// PID record of the most recently launched worker.
#[derive(Debug, Clone)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// Wrap a record file location.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the record file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the record with `pid`, creating the file if absent.
    ///
    /// # Atomicity
    /// 1. Write to a `.tmp` sibling
    /// 2. Rename over the record
    pub fn write(&self, pid: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, format!("{pid}\n"))?;
        fs::rename(&temp_path, &self.path)?;
        debug!(path = %self.path.display(), pid, "pid record written");
        Ok(())
    }

    /// Read the recorded PID.
    ///
    /// An absent file surfaces as `NotFound`; content that is not a
    /// non-negative integer surfaces as `InvalidData`. Callers treat both
    /// as "no usable record".
    pub fn read(&self) -> io::Result<u32> {
        let content = fs::read_to_string(&self.path)?;
        content
            .trim()
            .parse::<u32>()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "malformed pid record"))
    }

    /// Delete the record (idempotent - no error if missing).
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "pid record cleared");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("pid"), OsStr::to_os_string);
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_pid_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let record = PidFile::new(dir.path().join("site.pid"));

        record.write(98765).expect("write failed");
        assert!(record.path().exists());
        assert_eq!(record.read().expect("read failed"), 98765);

        record.clear().expect("clear failed");
        assert!(!record.path().exists());

        // Second clear should be a no-op
        record.clear().expect("second clear failed");
    }

    #[test]
    fn read_reports_missing_records_as_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let record = PidFile::new(dir.path().join("site.pid"));

        let err = record.read().expect_err("absent record must fail");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn read_rejects_garbage_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let record = PidFile::new(dir.path().join("site.pid"));
        fs::write(record.path(), "not a pid\n").expect("seed file");

        let err = record.read().expect_err("garbage must fail");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn write_replaces_previous_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let record = PidFile::new(dir.path().join("site.pid"));

        record.write(100).expect("first write");
        record.write(200).expect("second write");
        assert_eq!(record.read().expect("read"), 200);
        assert!(!record.path().with_file_name("site.pid.tmp").exists());
    }
}
