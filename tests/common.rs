//! Shared test helpers.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temp directory for use as HOSTPIN_HOME / hosts location.
/// Uses current dir (workspace) so sandbox allows full access.
pub fn temp_hostpin_home() -> TempDir {
    tempfile::Builder::new()
        .prefix("hostpin_test_")
        .tempdir_in(std::env::current_dir().unwrap_or_else(|_| Path::new(".").into()))
        .expect("temp dir")
}

/// Write a hosts file with `content` into `dir` and return its path.
pub fn write_hosts(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("hosts");
    std::fs::write(&path, content).unwrap();
    path
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

/// Non-comment lines whose hostname field is `host`.
pub fn entries_for<'a>(content: &'a str, host: &str) -> Vec<&'a str> {
    content
        .lines()
        .filter(|l| !l.trim_start().starts_with('#'))
        .filter(|l| l.split_whitespace().nth(1) == Some(host))
        .collect()
}
