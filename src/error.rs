//! Error taxonomy for the pin pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostpinError {
    /// No hosts file location is known for this platform.
    #[error("unsupported platform: no hosts file location known")]
    PlatformUnsupported,

    #[error("cannot locate hosts file {}", .path.display())]
    PathLookup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("system root not set: neither SystemRoot nor windir is defined")]
    SystemRootMissing,

    #[error("backup of {} failed", .path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot edit {}", .path.display())]
    EditIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed entry at line {line}: {text:?}")]
    MalformedEntry { line: usize, text: String },

    #[error("invalid index selected: {token:?}")]
    Selection { token: String },

    #[error("{0}")]
    Privilege(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot read selection")]
    Input(#[source] io::Error),
}

impl HostpinError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type Result<T> = std::result::Result<T, HostpinError>;
