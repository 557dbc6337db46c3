//! Unix (macOS, Linux) platform implementations.

use anyhow::{Context, Result};
use std::process::Command;

use super::{describe, run_checked, SystemOps};
use crate::error::HostpinError;

pub struct UnixSystemOps;

impl SystemOps for UnixSystemOps {
    fn ensure_elevated(&self) -> Result<()> {
        // SAFETY: geteuid has no preconditions and cannot fail.
        let euid = unsafe { libc::geteuid() };
        if euid != 0 {
            return Err(
                HostpinError::Privilege("Please start hostpin as root or with sudo".into()).into(),
            );
        }
        Ok(())
    }

    fn open_url(&self, url: &str) -> Result<()> {
        #[cfg(target_os = "macos")]
        let mut cmd = Command::new("open");
        #[cfg(not(target_os = "macos"))]
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        tracing::info!(command = %describe(&cmd), "executing");
        cmd.spawn().with_context(|| format!("open browser at {url}"))?;
        Ok(())
    }

    fn refresh_name_cache(&self) -> Result<()> {
        #[cfg(target_os = "macos")]
        {
            let mut cmd = Command::new("sudo");
            cmd.args(["killall", "-9", "mDNSResponder", "mDNSResponderHelper"]);
            run_checked(cmd)
        }

        #[cfg(not(target_os = "macos"))]
        {
            let mut cmd = Command::new("resolvectl");
            cmd.arg("flush-caches");
            run_checked(cmd)
        }
    }
}
