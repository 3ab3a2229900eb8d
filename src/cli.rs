//! # CLI
//!
//! Command-line surface for the `sops-audit` binary.
//!
//! The discovery regex is validated by the value parser, so a malformed
//! `--config-regex` is rejected with a usage error before any scanning
//! begins; content failures use a separate exit status.

use clap::Parser;
use regex::Regex;
use std::path::PathBuf;

/// Ensure your SOPS secrets are encrypted
#[derive(Debug, Parser)]
#[command(name = "sops-audit", version, about = "Ensure your SOPS secrets are encrypted", long_about = None)]
pub struct Cli {
    /// Root directory to audit
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// The regex that matches all the config files to use
    #[arg(short = 'r', long = "config-regex", value_parser = parse_regex)]
    pub config_regex: Regex,

    /// Print a summary at the end of the checks
    #[arg(short, long)]
    pub summary: bool,

    /// Keep scanning the remaining files after a broken YAML file
    #[arg(long)]
    pub keep_scanning: bool,
}

fn parse_regex(value: &str) -> Result<Regex, String> {
    Regex::new(value).map_err(|_| format!("{value} is not a valid regex."))
}
