//! Configuration loading and path resolution.
//!
//! Supports HOSTPIN_HOME env var override for testing.

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::candidates::{Candidate, CandidateList};
use crate::hosts::MalformedLinePolicy;

pub const DEFAULT_TARGET_HOST: &str = "github.com";
pub const DEFAULT_HELP_URL: &str = "https://tool.chinaz.com/speedworld/github.com";

/// Paths for hostpin's own files.
#[derive(Debug, Clone)]
pub struct HostpinPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl HostpinPaths {
    /// Build paths from base directory (e.g. ProjectDirs config dir or HOSTPIN_HOME).
    pub fn from_base(base: PathBuf) -> Self {
        let config_file = base.join("config.toml");
        Self {
            config_dir: base,
            config_file,
        }
    }

    /// Get default hostpin paths (respects HOSTPIN_HOME).
    pub fn default_paths() -> Self {
        let base = if let Ok(home) = std::env::var("HOSTPIN_HOME") {
            PathBuf::from(home)
        } else if let Some(dirs) = directories::ProjectDirs::from("", "", "hostpin") {
            dirs.config_dir().to_path_buf()
        } else {
            PathBuf::from(".hostpin")
        };
        Self::from_base(base)
    }
}

/// config.toml structure. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Hostname pinned when an address is given on the command line.
    pub target_host: String,
    /// Page opened alongside a direct address, for checking latencies.
    pub help_url: String,
    /// Use this hosts file instead of the platform one.
    pub hosts_file: Option<PathBuf>,
    pub malformed_lines: MalformedLinePolicy,
    /// Empty means the built-in table.
    pub candidates: Vec<Candidate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_host: DEFAULT_TARGET_HOST.to_string(),
            help_url: DEFAULT_HELP_URL.to_string(),
            hosts_file: None,
            malformed_lines: MalformedLinePolicy::default(),
            candidates: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from `path` (with shared lock). Missing file means defaults.
    pub fn load(path: &Path) -> Result<Config> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let mut file = fs::OpenOptions::new()
            .read(true)
            .open(path)
            .with_context(|| format!("open config {}", path.display()))?;
        fs2::FileExt::lock_shared(&file)?;
        let mut s = String::new();
        file.read_to_string(&mut s)?;
        let cfg: Config =
            toml::from_str(&s).with_context(|| format!("parse config {}", path.display()))?;
        if cfg.target_host.trim().is_empty() {
            anyhow::bail!("target_host in {} is empty", path.display());
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Candidate list: configured entries, or the built-in table.
    pub fn candidate_list(&self) -> Result<CandidateList> {
        if self.candidates.is_empty() {
            return Ok(CandidateList::builtin());
        }
        Ok(CandidateList::new(self.candidates.clone())?)
    }
}

/// Config file to use: explicit path, else the default location.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(p) => p.to_path_buf(),
        None => HostpinPaths::default_paths().config_file,
    }
}

/// Load the config for this run. A missing file at the default location
/// means defaults; a missing file the user named explicitly is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = config_path(explicit);
    if explicit.is_some() && !path.is_file() {
        anyhow::bail!("config file {} not found", path.display());
    }
    Config::load(&path)
}

/// Hosts file override: HOSTPIN_HOSTS_FILE wins over the config's `hosts_file`.
pub fn hosts_override(config: &Config) -> Option<PathBuf> {
    std::env::var_os("HOSTPIN_HOSTS_FILE")
        .map(PathBuf::from)
        .or_else(|| config.hosts_file.clone())
}
