//! # Report Aggregation
//!
//! Collects per-key verdicts and diagnostics into a deterministic report.
//!
//! A [`RunResult`] is created empty, appended to as rules and files are
//! processed, and read out once the scan completes. Lines render to the
//! exact strings the presentation layer prints.

use std::fmt;
use std::path::{Path, PathBuf};

use super::classify::Verdict;

/// One line of the audit report, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    /// A configuration document contributed rules.
    FoundConfig(PathBuf),
    /// A configuration document lacked `creation_rules` (warning, not error).
    SkippedConfig(PathBuf),
    /// Separator between config discovery and scan results.
    Separator,
    /// Verdict for one flattened key of one file.
    Record {
        file: PathBuf,
        key: String,
        verdict: Verdict,
    },
    /// A file could not be parsed as YAML.
    BrokenYaml(PathBuf),
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLine::FoundConfig(path) => write!(f, "Found config file: {}", path.display()),
            ReportLine::SkippedConfig(path) => write!(f, "WARNING: skipping '{}'", path.display()),
            ReportLine::Separator => f.write_str("---"),
            ReportLine::Record { file, key, verdict } => {
                write!(f, "{}::{} [{}]", file.display(), key, verdict)
            }
            ReportLine::BrokenYaml(path) => write!(f, "{} is not a valid YAML!", path.display()),
        }
    }
}

/// Aggregated outcome of one scan. Append-only while the scan runs.
#[derive(Debug, Default)]
pub struct RunResult {
    lines: Vec<ReportLine>,
    safe_count: usize,
    unsafe_count: usize,
    unsafe_records: Vec<(String, PathBuf)>,
    broken_yaml: Option<PathBuf>,
}

impl RunResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a non-record line (config discovery, separator).
    pub fn push(&mut self, line: ReportLine) {
        self.lines.push(line);
    }

    /// Record the verdict for one flattened key of `file`.
    pub fn record(&mut self, file: &Path, key: String, verdict: Verdict) {
        match verdict {
            Verdict::Safe => self.safe_count += 1,
            Verdict::Unsafe => {
                self.unsafe_count += 1;
                self.unsafe_records.push((key.clone(), file.to_path_buf()));
            }
        }
        self.lines.push(ReportLine::Record {
            file: file.to_path_buf(),
            key,
            verdict,
        });
    }

    /// Record that `file` failed to parse. The first broken file drives the
    /// summary and the final verdict.
    pub fn mark_broken(&mut self, file: PathBuf) {
        self.lines.push(ReportLine::BrokenYaml(file.clone()));
        if self.broken_yaml.is_none() {
            self.broken_yaml = Some(file);
        }
    }

    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    pub fn safe_count(&self) -> usize {
        self.safe_count
    }

    pub fn unsafe_count(&self) -> usize {
        self.unsafe_count
    }

    pub fn broken_yaml(&self) -> Option<&Path> {
        self.broken_yaml.as_deref()
    }

    /// True when every checked value was encrypted and every file parsed.
    pub fn passed(&self) -> bool {
        self.unsafe_count == 0 && self.broken_yaml.is_none()
    }

    /// Render the summary block: each unsafe occurrence plus final counts,
    /// or the broken-file notice when the checks were cut short.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![String::from("---"), String::from("Summary:")];
        if let Some(broken) = &self.broken_yaml {
            lines.push(format!(
                "The yaml '{}' is broken, checks incomplete!",
                broken.display()
            ));
        } else {
            for (key, file) in &self.unsafe_records {
                lines.push(format!("UNSAFE secret '{}' in '{}'", key, file.display()));
            }
            lines.push(format!(
                "{} safe {} unsafe",
                self.safe_count, self.unsafe_count
            ));
        }
        lines
    }
}
