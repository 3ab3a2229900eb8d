//! # Audit Errors
//!
//! Fatal configuration errors. These abort the run before (or during) rule
//! resolution; their `Display` forms are the exact diagnostic lines the
//! reporter emits, so the binary prints them verbatim.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    /// No discovered configuration document carried a `creation_rules` list.
    #[error("No valid config file found.")]
    NoConfigFile,

    /// A rule's pattern failed to compile. `field` names the offending
    /// rule field (`path_regex` or `encrypted_regex`).
    #[error("Invalid regex for '{field}': {pattern}")]
    InvalidRuleRegex {
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
