//! Platform policy (hosts location, line endings) and OS glue.

use std::process::Command;

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

use anyhow::Result;

/// Host platform family, selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    WindowsLike,
    UnixLike,
    Unsupported,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::WindowsLike
        } else if cfg!(unix) {
            Platform::UnixLike
        } else {
            Platform::Unsupported
        }
    }

    /// Line terminator used when writing the hosts file back.
    pub fn line_ending(self) -> &'static str {
        match self {
            Platform::WindowsLike => "\r\n",
            Platform::UnixLike | Platform::Unsupported => "\n",
        }
    }
}

/// Thin OS glue around the hosts edit: privilege check, browser, name cache.
pub trait SystemOps: Send + Sync {
    /// Fail unless running as administrator / root.
    fn ensure_elevated(&self) -> Result<()>;
    /// Open a URL in the default browser without waiting for it.
    fn open_url(&self, url: &str) -> Result<()>;
    /// Make the resolver pick up the new hosts mapping.
    fn refresh_name_cache(&self) -> Result<()>;
}

/// Get platform SystemOps implementation.
/// If HOSTPIN_SKIP_SYSTEM_COMMANDS is set (e.g. in tests), nothing is executed.
pub fn default_system_ops() -> Box<dyn SystemOps> {
    if std::env::var_os("HOSTPIN_SKIP_SYSTEM_COMMANDS").is_some() {
        return Box::new(InertSystemOps);
    }
    #[cfg(unix)]
    return Box::new(unix::UnixSystemOps);

    #[cfg(windows)]
    return Box::new(windows::WindowsSystemOps);

    #[cfg(not(any(unix, windows)))]
    return Box::new(InertSystemOps);
}

/// SystemOps that only logs what it would have done.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertSystemOps;

impl SystemOps for InertSystemOps {
    fn ensure_elevated(&self) -> Result<()> {
        tracing::debug!("privilege check skipped");
        Ok(())
    }

    fn open_url(&self, url: &str) -> Result<()> {
        tracing::debug!(url, "browser launch skipped");
        Ok(())
    }

    fn refresh_name_cache(&self) -> Result<()> {
        tracing::debug!("name cache refresh skipped");
        Ok(())
    }
}

/// Render a command line for logging.
pub(crate) fn describe(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Run a command to completion; non-zero exit is an error.
pub(crate) fn run_checked(mut cmd: Command) -> Result<()> {
    let line = describe(&cmd);
    tracing::info!(command = %line, "executing");
    let status = cmd
        .status()
        .map_err(|e| anyhow::anyhow!("{line}: {e}"))?;
    if !status.success() {
        match status.code() {
            Some(code) => anyhow::bail!("{line} failed with exit code {code}"),
            None => anyhow::bail!("{line} terminated by signal"),
        }
    }
    Ok(())
}
