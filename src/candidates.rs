//! Ranked candidate addresses for the pinned hostname.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HostpinError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub address: String,
    pub priority: u32,
}

impl Candidate {
    pub fn new(address: impl Into<String>, priority: u32) -> Self {
        Self {
            address: address.into(),
            priority,
        }
    }
}

/// Built-in addresses for github.com, in display order.
const BUILTIN: &[(&str, u32)] = &[
    ("140.82.121.4", 1),
    ("20.205.243.166", 2),
    ("20.248.137.48", 3),
    ("140.82.121.4", 4),
    ("20.27.177.113", 5),
];

/// Ordered list of candidates with unique, positive priorities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList {
    candidates: Vec<Candidate>,
}

impl CandidateList {
    pub fn new(candidates: Vec<Candidate>) -> Result<Self> {
        let mut seen = HashSet::new();
        for c in &candidates {
            if c.priority == 0 {
                return Err(HostpinError::config(format!(
                    "candidate {} has priority 0; priorities start at 1",
                    c.address
                )));
            }
            if !seen.insert(c.priority) {
                return Err(HostpinError::config(format!(
                    "duplicate candidate priority {}",
                    c.priority
                )));
            }
        }
        Ok(Self { candidates })
    }

    pub fn builtin() -> Self {
        Self {
            candidates: BUILTIN
                .iter()
                .map(|&(address, priority)| Candidate::new(address, priority))
                .collect(),
        }
    }

    pub fn list_all(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Find the address whose priority, written in decimal, equals `token`.
    pub fn select_by_priority(&self, token: &str) -> Result<&str> {
        self.candidates
            .iter()
            .find(|c| c.priority.to_string() == token)
            .map(|c| c.address.as_str())
            .filter(|address| !address.is_empty())
            .ok_or_else(|| HostpinError::Selection {
                token: token.to_string(),
            })
    }
}

impl Default for CandidateList {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Display for CandidateList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IP address\tIndex priority")?;
        for c in &self.candidates {
            writeln!(f, "\t{}\t{}", c.address, c.priority)?;
        }
        Ok(())
    }
}
