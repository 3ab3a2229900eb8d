//! # SOPS Audit
//!
//! Audits a directory tree of YAML documents (Kubernetes-style manifests,
//! SOPS-managed secrets) to verify that values under certain keys are
//! encrypted, according to per-path rule sets.
//!
//! ## Overview
//!
//! The audit runs in a single synchronous pass:
//!
//! 1. **Rule discovery** - Rule-configuration files are located with a
//!    caller-supplied regex and their `creation_rules` lists are merged in
//!    discovery order
//! 2. **File enumeration** - Each rule's `path_regex` selects target files
//!    via an ignore-aware directory walk
//! 3. **Document loading** - Files are decoded (UTF-8, or UTF-16 when a BOM
//!    is present) and parsed into one or more YAML documents
//! 4. **Key matching** - The shallowest keys matching a rule's
//!    `encrypted_regex` are located and their subtrees flattened to leaves
//! 5. **Classification** - Every leaf value is checked against the SOPS
//!    `ENC[AES256_GCM,...]` shape and reported as `[SAFE]` or `[UNSAFE]`
//!
//! No decryption is ever attempted; only the structural shape of an
//! encrypted value is recognized.
//!
//! ## Usage
//!
//! See the [README.md](../README.md) for CLI usage and examples.

pub mod cli;
pub mod constants;
pub mod scanner;
