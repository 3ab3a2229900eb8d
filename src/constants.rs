//! # Constants
//!
//! Fixed names and default patterns used across the audit.

/// Default `path_regex` for rules that omit it: any YAML-like file.
pub const DEFAULT_PATH_REGEX: &str = r".ya?ml$";

/// Default `encrypted_regex` for rules that omit it: matches every key name.
pub const DEFAULT_ENCRYPTED_REGEX: &str = "";

/// Version-control metadata directory excluded from every walk.
pub const GIT_DIR: &str = ".git";

/// Ignore file consulted once at the root of a walk.
pub const IGNORE_FILE: &str = ".gitignore";

/// Reserved top-level key carrying SOPS bookkeeping metadata.
pub const SOPS_METADATA_KEY: &str = "sops";
