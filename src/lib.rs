//! Hostpin - pin a hostname to a chosen address in the system hosts file.

pub mod backup;
pub mod candidates;
pub mod cli;
pub mod config;
pub mod error;
pub mod hosts;
pub mod logging;
pub mod paths;
pub mod pin;
pub mod platform;

pub use error::{HostpinError, Result};
