//! Hosts file parsing and rewriting.
//!
//! Comment lines are kept as opaque text, blank lines are dropped, and only
//! the entry whose hostname field matches the target is rewritten. Every
//! other line is written back as it was read (minus surrounding whitespace).
//! Lines are handled as bytes, so comments in legacy encodings survive.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HostpinError, Result};
use crate::platform::Platform;

const COMMENT_MARKER: u8 = b'#';

/// What to do with a non-comment line that has no hostname field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Keep the line verbatim as opaque text.
    #[default]
    Preserve,
    /// Abort the edit.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Layout {
    /// Untouched since parsing.
    Verbatim(Vec<u8>),
    /// Rewritten: fields joined by single spaces.
    Spaced,
    /// Newly appended: `address<TAB>hostname`.
    Tabbed,
}

/// One `address hostname [aliases...]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsEntry {
    pub address: String,
    pub hostname: String,
    pub aliases: Vec<String>,
    layout: Layout,
}

impl HostsEntry {
    fn parse(line: &[u8]) -> Option<Self> {
        let mut fields = line
            .split(u8::is_ascii_whitespace)
            .filter(|f| !f.is_empty())
            .map(|f| String::from_utf8_lossy(f).into_owned());
        let address = fields.next()?;
        let hostname = fields.next()?;
        Some(Self {
            address,
            hostname,
            aliases: fields.collect(),
            layout: Layout::Verbatim(line.to_vec()),
        })
    }

    fn appended(address: &str, hostname: &str) -> Self {
        Self {
            address: address.to_string(),
            hostname: hostname.to_string(),
            aliases: Vec::new(),
            layout: Layout::Tabbed,
        }
    }

    /// Point the entry at `address`. An entry already there is left as is.
    fn retarget(&mut self, address: &str) {
        if self.address != address {
            self.address = address.to_string();
            self.layout = Layout::Spaced;
        }
    }

    fn render_into(&self, out: &mut Vec<u8>) {
        match &self.layout {
            Layout::Verbatim(bytes) => out.extend_from_slice(bytes),
            Layout::Spaced => {
                let mut fields = vec![self.address.as_str(), self.hostname.as_str()];
                fields.extend(self.aliases.iter().map(String::as_str));
                out.extend_from_slice(fields.join(" ").as_bytes());
            }
            Layout::Tabbed => {
                out.extend_from_slice(format!("{}\t{}", self.address, self.hostname).as_bytes())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostsLine {
    /// Comment, or a malformed line kept under [`MalformedLinePolicy::Preserve`].
    Text(Vec<u8>),
    Entry(HostsEntry),
}

/// How the target hostname ended up in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinAction {
    Replaced,
    Appended,
}

/// Hosts file as an ordered list of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostsFile {
    lines: Vec<HostsLine>,
}

impl HostsFile {
    /// Parse hosts content. Accepts LF and CRLF line endings and any encoding
    /// that keeps ASCII intact.
    pub fn parse(content: impl AsRef<[u8]>, policy: MalformedLinePolicy) -> Result<Self> {
        let mut lines = Vec::new();
        for (idx, raw) in content.as_ref().split(|&b| b == b'\n').enumerate() {
            let line = raw.trim_ascii();
            if line.is_empty() {
                continue;
            }
            if line.starts_with(&[COMMENT_MARKER]) {
                lines.push(HostsLine::Text(line.to_vec()));
                continue;
            }
            match HostsEntry::parse(line) {
                Some(entry) => lines.push(HostsLine::Entry(entry)),
                None => match policy {
                    MalformedLinePolicy::Preserve => {
                        tracing::warn!(
                            line = idx + 1,
                            text = %String::from_utf8_lossy(line),
                            "keeping entry without hostname"
                        );
                        lines.push(HostsLine::Text(line.to_vec()));
                    }
                    MalformedLinePolicy::Fail => {
                        return Err(HostpinError::MalformedEntry {
                            line: idx + 1,
                            text: String::from_utf8_lossy(line).into_owned(),
                        });
                    }
                },
            }
        }
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[HostsLine] {
        &self.lines
    }

    /// Point `hostname` at `address`: rewrite the first matching entry, drop
    /// any later duplicates, or append a new entry when there is none.
    pub fn pin(&mut self, address: &str, hostname: &str) -> PinAction {
        let mut found = false;
        self.lines.retain_mut(|line| match line {
            HostsLine::Entry(entry) if entry.hostname == hostname => {
                if found {
                    return false;
                }
                found = true;
                entry.retarget(address);
                true
            }
            _ => true,
        });
        if found {
            PinAction::Replaced
        } else {
            self.lines
                .push(HostsLine::Entry(HostsEntry::appended(address, hostname)));
            PinAction::Appended
        }
    }

    /// Render every line followed by `line_ending`.
    pub fn render(&self, line_ending: &str) -> Vec<u8> {
        let mut out = Vec::new();
        for line in &self.lines {
            match line {
                HostsLine::Text(bytes) => out.extend_from_slice(bytes),
                HostsLine::Entry(entry) => entry.render_into(&mut out),
            }
            out.extend_from_slice(line_ending.as_bytes());
        }
        out
    }
}

/// Result of [`hijack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOutcome {
    pub action: PinAction,
    pub lines: usize,
}

/// Rewrite the hosts file at `path` so that `hostname` resolves to `address`.
pub fn hijack(
    path: &Path,
    address: &str,
    hostname: &str,
    platform: Platform,
    policy: MalformedLinePolicy,
) -> Result<EditOutcome> {
    let io_err = |source: std::io::Error| HostpinError::EditIo {
        path: path.to_path_buf(),
        source,
    };

    let content = fs::read(path).map_err(io_err)?;
    let mut hosts = HostsFile::parse(&content, policy)?;
    let action = hosts.pin(address, hostname);
    let rendered = hosts.render(platform.line_ending());

    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&rendered).map_err(io_err)?;
    let file = writer.into_inner().map_err(|e| io_err(e.into_error()))?;
    file.sync_all().map_err(io_err)?;

    Ok(EditOutcome {
        action,
        lines: hosts.lines.len(),
    })
}
