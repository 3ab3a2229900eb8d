//! # Document Loading
//!
//! Reads a file's bytes, decodes them to text using a BOM-detected encoding
//! (UTF-8 default, UTF-16 LE/BE when marked), and parses the text into zero
//! or more YAML documents.
//!
//! Malformed input is reported as a [`DocumentError`], never a panic; the
//! file handle is scoped to the read call and released on both success and
//! failure.

use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Why a file could not be turned into YAML documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unreadable file: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid encoding: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
    #[error("invalid YAML: {0}")]
    Parse(#[source] serde_yaml::Error),
}

/// Text encoding detected from a file's leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

/// Detect the encoding of a file from its BOM. Files without a UTF-16 BOM
/// are assumed to be UTF-8.
pub fn detect_encoding(bytes: &[u8]) -> Encoding {
    match bytes {
        [0xFE, 0xFF, ..] => Encoding::Utf16Be,
        [0xFF, 0xFE, ..] => Encoding::Utf16Le,
        _ => Encoding::Utf8,
    }
}

/// Decode a file to text using its detected encoding.
pub fn decode_file_to_text(path: &Path) -> Result<String, DocumentError> {
    let bytes = fs::read(path)?;
    let text = match detect_encoding(&bytes) {
        Encoding::Utf16Le => decode_utf16(&bytes[2..], true),
        Encoding::Utf16Be => decode_utf16(&bytes[2..], false),
        Encoding::Utf8 => String::from_utf8(bytes)?,
    };
    // A UTF-8 BOM survives decoding; the YAML parser must not see it.
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

fn decode_utf16(payload: &[u8], le: bool) -> String {
    // A trailing odd byte cannot form a full UTF-16 code unit; ignore it.
    let units = (0..payload.len() / 2).map(|i| {
        let pair = [payload[2 * i], payload[2 * i + 1]];
        if le {
            u16::from_le_bytes(pair)
        } else {
            u16::from_be_bytes(pair)
        }
    });
    std::char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Load every YAML document in a file, in order.
///
/// A file may contain multiple blocks separated by `---` markers; each
/// parses to one [`Value`]. An empty file yields an empty vec, which is
/// distinct from a parse failure.
pub fn load_documents(path: &Path) -> Result<Vec<Value>, DocumentError> {
    let text = decode_file_to_text(path)?;
    let mut documents = Vec::new();
    for block in serde_yaml::Deserializer::from_str(&text) {
        let value = Value::deserialize(block).map_err(DocumentError::Parse)?;
        documents.push(value);
    }
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_encoding_boms() {
        assert_eq!(detect_encoding(&[0xFE, 0xFF, 0x00, 0x61]), Encoding::Utf16Be);
        assert_eq!(detect_encoding(&[0xFF, 0xFE, 0x61, 0x00]), Encoding::Utf16Le);
        assert_eq!(detect_encoding(b"key: value"), Encoding::Utf8);
        assert_eq!(detect_encoding(&[]), Encoding::Utf8);
        assert_eq!(detect_encoding(&[0xFE]), Encoding::Utf8);
    }

    #[test]
    fn test_decode_utf16_le_roundtrip() {
        let text = "user: alice";
        let mut bytes = Vec::new();
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_utf16(&bytes, true), text);
    }

    #[test]
    fn test_decode_utf16_be_ignores_trailing_odd_byte() {
        let mut bytes = Vec::new();
        for unit in "ab".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        bytes.push(0x00);
        assert_eq!(decode_utf16(&bytes, false), "ab");
    }
}
