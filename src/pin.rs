//! Resolve, back up, then rewrite the hosts file.

use std::path::PathBuf;

use crate::backup::{self, BackupOutcome};
use crate::error::{HostpinError, Result};
use crate::hosts::{self, EditOutcome, MalformedLinePolicy};
use crate::paths;
use crate::platform::Platform;

/// Inputs for one pin run.
#[derive(Debug, Clone)]
pub struct PinRequest {
    pub hostname: String,
    pub address: String,
    pub platform: Platform,
    /// Bypass platform lookup (tests, custom setups).
    pub hosts_file: Option<PathBuf>,
    pub malformed_lines: MalformedLinePolicy,
}

impl PinRequest {
    pub fn new(hostname: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            address: address.into(),
            platform: Platform::current(),
            hosts_file: None,
            malformed_lines: MalformedLinePolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PinReport {
    pub hosts_file: PathBuf,
    pub backup: BackupOutcome,
    pub edit: EditOutcome,
}

fn locate(request: &PinRequest) -> Result<PathBuf> {
    if let Some(path) = &request.hosts_file {
        paths::ensure_exists(path)?;
        return Ok(path.clone());
    }
    paths::resolve_hosts_path(request.platform)?.ok_or(HostpinError::PlatformUnsupported)
}

/// Point `request.hostname` at `request.address`. Stops at the first failure.
pub fn pin_host(request: &PinRequest) -> Result<PinReport> {
    let hosts_file = locate(request)?;
    tracing::debug!(path = %hosts_file.display(), "hosts file located");

    let backup = backup::backup(&hosts_file)?;
    match &backup {
        BackupOutcome::Created { path, bytes } => {
            tracing::info!(path = %path.display(), bytes, "backed up hosts file")
        }
        BackupOutcome::AlreadyPresent { path } => {
            tracing::info!(path = %path.display(), "keeping existing backup")
        }
    }

    let edit = hosts::hijack(
        &hosts_file,
        &request.address,
        &request.hostname,
        request.platform,
        request.malformed_lines,
    )?;
    tracing::info!(
        host = %request.hostname,
        address = %request.address,
        action = ?edit.action,
        "hosts file updated"
    );

    Ok(PinReport {
        hosts_file,
        backup,
        edit,
    })
}
