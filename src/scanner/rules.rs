//! # Rule Resolution
//!
//! Discovers rule-configuration files, merges their `creation_rules` lists
//! in discovery order, fills per-rule defaults, and compiles both patterns
//! upfront so no scanning starts with an unusable rule.

use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::constants::{DEFAULT_ENCRYPTED_REGEX, DEFAULT_PATH_REGEX};

use super::document::load_documents;
use super::error::AuditError;
use super::report::{ReportLine, RunResult};
use super::walker::find_files;

/// One entry of a `creation_rules` list, as written in a config file.
/// Real SOPS rules also carry key-material fields (`pgp`, `age`, `kms`,
/// ...); those are accepted and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRule {
    #[serde(default)]
    pub path_regex: Option<String>,
    #[serde(default)]
    pub encrypted_regex: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    creation_rules: Option<Vec<RawRule>>,
}

/// A resolved audit rule: which files to scan and which keys within them
/// must hold encrypted values. Both patterns are compiled and valid.
#[derive(Debug, Clone)]
pub struct Rule {
    pub path_regex: Regex,
    pub encrypted_regex: Regex,
}

/// Discover and merge every rule under `root`.
///
/// Each file matching `config_regex` is parsed into documents; documents
/// with a `creation_rules` list contribute their entries (and a found
/// line), documents without one produce a skip warning. An empty merged
/// set is fatal, as is any rule pattern that fails to compile.
pub fn resolve_rules(
    root: &Path,
    config_regex: &Regex,
    run: &mut RunResult,
) -> Result<Vec<Rule>, AuditError> {
    let mut raw_rules = Vec::new();
    for config_path in find_files(config_regex, root) {
        let documents = match load_documents(&config_path) {
            Ok(documents) => documents,
            Err(err) => {
                debug!(
                    "skipping config candidate {}: {}",
                    config_path.display(),
                    err
                );
                continue;
            }
        };
        for document in documents {
            match serde_yaml::from_value::<ConfigDocument>(document) {
                Ok(ConfigDocument {
                    creation_rules: Some(rules),
                }) => {
                    run.push(ReportLine::FoundConfig(config_path.clone()));
                    raw_rules.extend(rules);
                }
                _ => run.push(ReportLine::SkippedConfig(config_path.clone())),
            }
        }
    }

    if raw_rules.is_empty() {
        return Err(AuditError::NoConfigFile);
    }
    // Discovery is done; the separator precedes any validation diagnostics.
    run.push(ReportLine::Separator);
    raw_rules.into_iter().map(compile_rule).collect()
}

/// Fill defaults for missing fields and compile both patterns. A compile
/// failure is a fatal configuration error naming the field and pattern.
fn compile_rule(raw: RawRule) -> Result<Rule, AuditError> {
    let path_pattern = raw
        .path_regex
        .unwrap_or_else(|| DEFAULT_PATH_REGEX.to_string());
    let encrypted_pattern = raw
        .encrypted_regex
        .unwrap_or_else(|| DEFAULT_ENCRYPTED_REGEX.to_string());

    let path_regex = Regex::new(&path_pattern).map_err(|source| AuditError::InvalidRuleRegex {
        field: "path_regex",
        pattern: path_pattern.clone(),
        source,
    })?;
    let encrypted_regex =
        Regex::new(&encrypted_pattern).map_err(|source| AuditError::InvalidRuleRegex {
            field: "encrypted_regex",
            pattern: encrypted_pattern.clone(),
            source,
        })?;

    Ok(Rule {
        path_regex,
        encrypted_regex,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_rule_fills_defaults() {
        let rule = compile_rule(RawRule::default()).unwrap();
        assert!(rule.path_regex.is_match("secrets/app.yaml"));
        assert!(rule.path_regex.is_match("secrets/app.yml"));
        assert!(!rule.path_regex.is_match("secrets/app.json"));
        // The default encrypted pattern matches every key name.
        assert!(rule.encrypted_regex.is_match("anything"));
        assert!(rule.encrypted_regex.is_match(""));
    }

    #[test]
    fn test_compile_rule_reports_offending_field() {
        let err = compile_rule(RawRule {
            path_regex: Some(String::from("[")),
            encrypted_regex: None,
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid regex for 'path_regex': [");

        let err = compile_rule(RawRule {
            path_regex: None,
            encrypted_regex: Some(String::from("(")),
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid regex for 'encrypted_regex': (");
    }

    #[test]
    fn test_raw_rule_ignores_key_material_fields() {
        let raw: RawRule = serde_yaml::from_str(
            "path_regex: secrets/.*\npgp: 85D77543B3D624B63CEA9E6DBC17301B491B3F21\n",
        )
        .unwrap();
        assert_eq!(raw.path_regex.as_deref(), Some("secrets/.*"));
        assert!(raw.encrypted_regex.is_none());
    }
}
