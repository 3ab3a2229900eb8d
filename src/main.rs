//! # sops-audit
//!
//! Binary entry point: parses the CLI, initializes tracing, runs the scan,
//! prints the report, and maps the outcome to the process exit status.
//!
//! Exit status: 0 when every checked value is encrypted and every file
//! parsed; 1 on any unsafe value, broken YAML file, or configuration error;
//! clap's usage status for malformed command-line input.

use clap::Parser;
use std::process::ExitCode;

use sops_audit::cli::Cli;
use sops_audit::scanner::{run_scan, BrokenYamlPolicy, RunResult, ScanOptions};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Diagnostics go to stderr so the report on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sops_audit=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = ScanOptions {
        broken_yaml: if cli.keep_scanning {
            BrokenYamlPolicy::Continue
        } else {
            BrokenYamlPolicy::Abort
        },
    };

    let mut run = RunResult::new();
    let outcome = run_scan(&cli.path, &cli.config_regex, options, &mut run);

    for line in run.lines() {
        println!("{line}");
    }

    if let Err(err) = outcome {
        println!("{err}");
        return ExitCode::from(1);
    }

    if cli.summary {
        for line in run.summary_lines() {
            println!("{line}");
        }
    }

    if run.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
