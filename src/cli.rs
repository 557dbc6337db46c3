//! CLI definitions and command routing.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::candidates::CandidateList;
use crate::config::{hosts_override, load_config, Config};
use crate::error::HostpinError;
use crate::pin::{self, PinRequest};
use crate::platform::{self, Platform, SystemOps};

pub const PROMPT: &str = "Please enter an index: ";

#[derive(Parser, Debug)]
#[command(name = "hostpin", version)]
#[command(about = "Pin a hostname to a chosen IP address in the system hosts file")]
pub struct Cli {
    /// Address to pin directly; without it, pick one from the candidate list
    pub ip: Option<String>,

    /// Config file (default: <config dir>/hostpin/config.toml)
    #[arg(short, long, env = "HOSTPIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Hostname to pin instead of the configured target
    #[arg(long)]
    pub host: Option<String>,

    /// Print the candidate addresses and exit
    #[arg(long)]
    pub list: bool,

    /// Do not open the latency help page when an address is given
    #[arg(long)]
    pub no_browser: bool,

    /// Do not restart the local name cache after editing
    #[arg(long)]
    pub no_flush: bool,

    /// More log output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Parse arguments, set up logging and config, then execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose, cli.quiet);

    let config = load_config(cli.config.as_deref())?;
    let system = platform::default_system_ops();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    execute(&cli, &config, system.as_ref(), &mut input, &mut output)
}

/// Run one invocation against the given OS glue and terminal streams.
pub fn execute(
    cli: &Cli,
    config: &Config,
    system: &dyn SystemOps,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<()> {
    let candidates = config.candidate_list()?;
    if cli.list {
        write!(output, "{candidates}")?;
        return Ok(());
    }

    if let Some(host) = &cli.host {
        require_token("--host", host)?;
    }
    if let Some(ip) = &cli.ip {
        require_token("address", ip)?;
    }

    system.ensure_elevated().context("privilege check")?;

    let hostname = cli
        .host
        .clone()
        .unwrap_or_else(|| config.target_host.clone());

    let address = match &cli.ip {
        Some(ip) => {
            if !cli.no_browser {
                match system.open_url(&config.help_url) {
                    Ok(()) => tracing::info!(url = %config.help_url, "opened help page"),
                    Err(e) => tracing::warn!(error = %format!("{e:#}"), "could not open browser"),
                }
            }
            ip.clone()
        }
        None => {
            let token = prompt_selection(&candidates, input, output)?;
            let address = candidates
                .select_by_priority(&token)
                .context("select candidate")?
                .to_string();
            tracing::info!(address = %address, "selected address");
            address
        }
    };

    let mut request = PinRequest::new(hostname, address);
    request.hosts_file = hosts_override(config);
    request.malformed_lines = config.malformed_lines;

    let report = pin::pin_host(&request).with_context(|| format!("pin {}", request.hostname))?;
    writeln!(
        output,
        "Pinned {} -> {} in {} (backup: {})",
        request.hostname,
        request.address,
        report.hosts_file.display(),
        report.backup.path().display()
    )?;

    if !cli.no_flush && request.platform != Platform::WindowsLike {
        if let Err(e) = system.refresh_name_cache() {
            tracing::warn!(
                error = %format!("{e:#}"),
                "name cache refresh failed; hosts file change is kept"
            );
        }
    }
    Ok(())
}

/// A hosts field must be one non-empty, whitespace-free token.
fn require_token(what: &str, value: &str) -> Result<()> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        anyhow::bail!("{what} must be a single non-empty word, got {value:?}");
    }
    Ok(())
}

/// Show the candidates, prompt, and return the first token typed.
pub fn prompt_selection(
    candidates: &CandidateList,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<String> {
    write!(output, "{candidates}{PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    let n = input.read_line(&mut line).map_err(HostpinError::Input)?;
    if n == 0 {
        return Err(HostpinError::Input(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no selection entered",
        ))
        .into());
    }
    Ok(line.split_whitespace().next().unwrap_or_default().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::Candidate;

    fn list() -> CandidateList {
        CandidateList::new(vec![Candidate::new("10.0.0.1", 1), Candidate::new("10.0.0.2", 2)]).unwrap()
    }

    #[test]
    fn prompt_reads_first_token() {
        let mut input = io::Cursor::new("2 trailing\n");
        let mut output = Vec::new();
        let token = prompt_selection(&list(), &mut input, &mut output).unwrap();
        assert_eq!(token, "2");
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("\t10.0.0.2\t2"));
        assert!(shown.ends_with(PROMPT));
    }

    #[test]
    fn prompt_fails_on_eof() {
        let mut input = io::Cursor::new("");
        let mut output = Vec::new();
        let err = prompt_selection(&list(), &mut input, &mut output).unwrap_err();
        assert!(format!("{err:#}").contains("no selection entered"));
    }

    #[test]
    fn extra_positional_is_a_usage_error() {
        let err = Cli::try_parse_from(["hostpin", "1.1.1.1", "2.2.2.2"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn single_positional_is_the_address() {
        let cli = Cli::try_parse_from(["hostpin", "1.1.1.1"]).unwrap();
        assert_eq!(cli.ip.as_deref(), Some("1.1.1.1"));
    }
}
