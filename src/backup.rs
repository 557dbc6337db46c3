//! One-time backup of the hosts file.
//!
//! The first backup is kept forever: it may be the last known-good state
//! before any edit, so later runs never overwrite it.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{HostpinError, Result};

pub const BACKUP_SUFFIX: &str = ".bak";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    Created { path: PathBuf, bytes: u64 },
    AlreadyPresent { path: PathBuf },
}

impl BackupOutcome {
    pub fn path(&self) -> &Path {
        match self {
            BackupOutcome::Created { path, .. } | BackupOutcome::AlreadyPresent { path } => path,
        }
    }
}

/// `hosts` with the backup suffix appended to its file name.
pub fn backup_path(hosts: &Path) -> PathBuf {
    let mut s: OsString = hosts.as_os_str().to_owned();
    s.push(BACKUP_SUFFIX);
    PathBuf::from(s)
}

/// Copy `hosts` to its `.bak` sibling unless that backup already exists.
pub fn backup(hosts: &Path) -> Result<BackupOutcome> {
    let bak = backup_path(hosts);
    if bak.exists() {
        tracing::debug!(path = %bak.display(), "backup already present");
        return Ok(BackupOutcome::AlreadyPresent { path: bak });
    }
    let bytes = copy_exact(hosts, &bak).map_err(|source| HostpinError::Backup {
        path: bak.clone(),
        source,
    })?;
    Ok(BackupOutcome::Created { path: bak, bytes })
}

fn copy_exact(src: &Path, dst: &Path) -> io::Result<u64> {
    let tmp = temp_path(dst);
    let result = copy_into(src, &tmp).and_then(|bytes| {
        fs::rename(&tmp, dst)?;
        Ok(bytes)
    });
    if result.is_err() {
        // A leftover would never be promoted, but keep the directory clean.
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// Sibling the copy is staged in; `dst` only appears once complete.
fn temp_path(dst: &Path) -> PathBuf {
    let mut s: OsString = dst.as_os_str().to_owned();
    s.push(".tmp");
    PathBuf::from(s)
}

fn copy_into(src: &Path, tmp: &Path) -> io::Result<u64> {
    let mut input = File::open(src)?;
    let expected = input.metadata()?.len();
    let mut output = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(tmp)?;
    let written = io::copy(&mut input, &mut output)?;
    if written != expected {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("short copy: {written} of {expected} bytes"),
        ));
    }
    output.sync_all()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_is_appended_to_full_name() {
        assert_eq!(backup_path(Path::new("/etc/hosts")), PathBuf::from("/etc/hosts.bak"));
        assert_eq!(
            backup_path(Path::new("/tmp/hosts.txt")),
            PathBuf::from("/tmp/hosts.txt.bak")
        );
    }

    #[test]
    fn missing_source_is_a_backup_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = backup(&dir.path().join("hosts")).unwrap_err();
        assert!(matches!(err, HostpinError::Backup { .. }));
        assert!(!dir.path().join("hosts.bak").exists());
    }

    #[test]
    fn failed_copy_leaves_no_backup_behind() {
        let dir = tempfile::tempdir().unwrap();
        let hosts = dir.path().join("hosts");
        // Opening a directory succeeds on unix, reading it does not.
        fs::create_dir(&hosts).unwrap();

        let err = backup(&hosts).unwrap_err();
        assert!(matches!(err, HostpinError::Backup { .. }));
        assert!(!dir.path().join("hosts.bak").exists());
        assert!(!dir.path().join("hosts.bak.tmp").exists());

        fs::remove_dir(&hosts).unwrap();
        fs::write(&hosts, "1.1.1.1 real.test\n").unwrap();
        let outcome = backup(&hosts).unwrap();
        assert!(matches!(outcome, BackupOutcome::Created { bytes: 18, .. }));
        assert_eq!(
            fs::read_to_string(dir.path().join("hosts.bak")).unwrap(),
            "1.1.1.1 real.test\n"
        );
    }
}
