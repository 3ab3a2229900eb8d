//! # Value Classification
//!
//! Decides whether a stringified leaf value has the shape of a SOPS
//! encrypted blob. Purely structural: the payload is never decrypted or
//! otherwise validated.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// The fixed shape of a SOPS-encrypted value. All four fields are required
/// in this exact order and the match must cover the entire string.
static ENCRYPTED_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ENC\[AES256_GCM,data:(.+),iv:(.+),tag:(.+),type:(.+)\]$")
        .expect("encrypted-value pattern is valid")
});

/// Classification outcome for a single leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Safe,
    Unsafe,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Safe => f.write_str("SAFE"),
            Verdict::Unsafe => f.write_str("UNSAFE"),
        }
    }
}

/// Classify one stringified value. Anything that is not a full-string
/// `ENC[AES256_GCM,data:...,iv:...,tag:...,type:...]` marker - including
/// the empty string - is unsafe. Never errors.
pub fn classify(value: &str) -> Verdict {
    if ENCRYPTED_VALUE.is_match(value) {
        Verdict::Safe
    } else {
        Verdict::Unsafe
    }
}
