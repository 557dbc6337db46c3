//! Hosts file location per platform.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{HostpinError, Result};
use crate::platform::Platform;

pub const UNIX_HOSTS: &str = "/etc/hosts";

/// Resolve the hosts file for `platform`, reading the system root from the
/// environment on Windows. `Ok(None)` means the platform is unsupported.
pub fn resolve_hosts_path(platform: Platform) -> Result<Option<PathBuf>> {
    let root = std::env::var_os("SystemRoot").or_else(|| std::env::var_os("windir"));
    resolve_with_root(platform, root)
}

/// Same as [`resolve_hosts_path`] with an explicit system root.
pub fn resolve_with_root(platform: Platform, system_root: Option<OsString>) -> Result<Option<PathBuf>> {
    let path = match platform {
        Platform::WindowsLike => {
            let root = system_root.ok_or(HostpinError::SystemRootMissing)?;
            PathBuf::from(root)
                .join("System32")
                .join("drivers")
                .join("etc")
                .join("hosts")
        }
        Platform::UnixLike => PathBuf::from(UNIX_HOSTS),
        Platform::Unsupported => return Ok(None),
    };
    ensure_exists(&path)?;
    Ok(Some(path))
}

/// Check that `path` can be stat'ed.
pub fn ensure_exists(path: &Path) -> Result<()> {
    std::fs::metadata(path).map_err(|source| HostpinError::PathLookup {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
