//! # Scanner
//!
//! Single-pass audit pipeline: resolve rules, enumerate target files per
//! rule, load documents, locate matching keys, classify their leaf values.
//!
//! ## Module Structure
//!
//! - `document.rs` - encoding detection and multi-document YAML loading
//! - `walker.rs` - regex-filtered, ignore-aware directory traversal
//! - `rules.rs` - rule-configuration discovery and merging
//! - `matcher.rs` - structural key matching and subtree flattening
//! - `classify.rs` - SAFE/UNSAFE value classification
//! - `report.rs` - report lines and run aggregation
//! - `error.rs` - fatal configuration errors

pub mod classify;
pub mod document;
pub mod error;
pub mod matcher;
pub mod report;
pub mod rules;
pub mod walker;

// Re-export public API
pub use classify::{classify, Verdict};
pub use error::AuditError;
pub use matcher::{find_by_key, flatten};
pub use report::{ReportLine, RunResult};
pub use rules::{resolve_rules, Rule};

use regex::Regex;
use serde_yaml::Value;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::constants::SOPS_METADATA_KEY;

/// What to do with the rest of the scan once a broken YAML file is found.
///
/// `Abort` reproduces the historical behavior: the broken file is reported
/// and no further files are scanned, but the report and summary still
/// emit. `Continue` records the breakage and keeps scanning. Either way
/// the run fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrokenYamlPolicy {
    #[default]
    Abort,
    Continue,
}

/// Scan knobs carried from the CLI into the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    pub broken_yaml: BrokenYamlPolicy,
}

/// Run the full audit under `root`.
///
/// Rule-configuration files are discovered with `config_regex`, merged, and
/// validated upfront; each resolved rule is then applied in order. Report
/// lines accumulate in `run` as the scan progresses, so callers can emit a
/// partial report even when rule resolution fails.
pub fn run_scan(
    root: &Path,
    config_regex: &Regex,
    options: ScanOptions,
    run: &mut RunResult,
) -> Result<(), AuditError> {
    let rules = resolve_rules(root, config_regex, run)?;
    info!("resolved {} rule(s) under {}", rules.len(), root.display());

    for rule in &rules {
        if run.broken_yaml().is_some() && options.broken_yaml == BrokenYamlPolicy::Abort {
            break;
        }
        scan_rule(rule, root, options, run);
    }
    Ok(())
}

/// Apply one rule: enumerate its target files and audit each in turn.
fn scan_rule(rule: &Rule, root: &Path, options: ScanOptions, run: &mut RunResult) {
    debug!(
        "scanning files matching '{}' for keys matching '{}'",
        rule.path_regex, rule.encrypted_regex
    );
    for file in walker::find_files(&rule.path_regex, root) {
        match document::load_documents(&file) {
            Ok(documents) if !documents.is_empty() => {
                audit_file(&file, documents, &rule.encrypted_regex, run);
            }
            // A file with no documents fails the audit the same way a
            // malformed one does: a rule said it must hold encrypted values.
            Ok(_) => {
                warn!("{} contains no YAML documents", file.display());
                run.mark_broken(file);
                if options.broken_yaml == BrokenYamlPolicy::Abort {
                    return;
                }
            }
            Err(err) => {
                warn!("failed to load {}: {}", file.display(), err);
                run.mark_broken(file);
                if options.broken_yaml == BrokenYamlPolicy::Abort {
                    return;
                }
            }
        }
    }
}

/// Audit every document of one file and record the sorted verdicts.
fn audit_file(file: &Path, documents: Vec<Value>, encrypted_regex: &Regex, run: &mut RunResult) {
    let mut records: Vec<(String, Verdict)> = Vec::new();
    for mut doc in documents {
        strip_sops_metadata(&mut doc);
        for matched in find_by_key(&doc, encrypted_regex) {
            for (key, value) in flatten(&matched) {
                records.push((key.to_string(), classify(&value)));
            }
        }
    }
    // Emission is ordered by key name so reports are reproducible
    // regardless of document layout.
    records.sort_by(|a, b| a.0.cmp(&b.0));
    for (key, verdict) in records {
        run.record(file, key, verdict);
    }
}

/// Remove the reserved top-level `sops` metadata block before matching.
/// It carries the tool's own bookkeeping and is never user content.
fn strip_sops_metadata(doc: &mut Value) {
    if let Value::Mapping(map) = doc {
        map.remove(SOPS_METADATA_KEY);
    }
}
