//! Windows platform implementations.

use anyhow::{Context, Result};
use std::process::{Command, Stdio};

use super::{describe, SystemOps};
use crate::error::HostpinError;

pub struct WindowsSystemOps;

impl SystemOps for WindowsSystemOps {
    fn ensure_elevated(&self) -> Result<()> {
        // `net session` only succeeds in an elevated session.
        let status = Command::new("net")
            .arg("session")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .context("net session")?;
        if !status.success() {
            return Err(HostpinError::Privilege("Please start hostpin as administrator".into()).into());
        }
        Ok(())
    }

    fn open_url(&self, url: &str) -> Result<()> {
        let mut cmd = Command::new("cmd");
        cmd.args(["/c", "start", url]);
        tracing::info!(command = %describe(&cmd), "executing");
        cmd.spawn().with_context(|| format!("open browser at {url}"))?;
        Ok(())
    }

    fn refresh_name_cache(&self) -> Result<()> {
        Ok(())
    }
}
