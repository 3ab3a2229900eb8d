//! # Structural Matching
//!
//! Locates keys in parsed YAML documents and flattens matched subtrees to
//! their leaf values.
//!
//! [`find_by_key`] yields the shallowest mapping entries whose key matches
//! a pattern; a matched subtree is never re-scanned, so two matches can
//! never nest. [`flatten`] walks a matched subtree down to every scalar
//! leaf. The two walks treat sequences differently: key matching only
//! descends into sequence elements that are themselves mappings (nothing
//! else can hold a keyed match), while flattening descends into every
//! element.

use regex::Regex;
use serde_yaml::Value;
use std::fmt;

/// A single matched mapping entry: a key that satisfied the pattern and
/// the subtree stored under it.
#[derive(Debug, Clone, Copy)]
pub struct KeyMatch<'a> {
    pub key: &'a str,
    pub value: &'a Value,
}

/// Lazily find every shallowest key in `doc` matching `pattern`.
///
/// The pattern is applied as an unanchored search, so a partial match
/// counts. Non-mapping documents and subtrees with no match yield an empty
/// sequence. Mapping keys that are not strings are skipped.
pub fn find_by_key<'a>(doc: &'a Value, pattern: &'a Regex) -> KeyMatches<'a> {
    let mut stack = Vec::new();
    if let Value::Mapping(map) = doc {
        stack.push(map.iter());
    }
    KeyMatches { stack, pattern }
}

/// Iterator over key matches, produced by [`find_by_key`].
pub struct KeyMatches<'a> {
    stack: Vec<serde_yaml::mapping::Iter<'a>>,
    pattern: &'a Regex,
}

impl fmt::Debug for KeyMatches<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMatches")
            .field("pattern", &self.pattern)
            .field("depth", &self.stack.len())
            .finish()
    }
}

impl<'a> Iterator for KeyMatches<'a> {
    type Item = KeyMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(entries) = self.stack.last_mut() {
            let Some((key, value)) = entries.next() else {
                self.stack.pop();
                continue;
            };
            let Some(key) = key.as_str() else {
                continue;
            };
            if self.pattern.is_match(key) {
                // Matched: the subtree belongs to this match and is not
                // searched again.
                return Some(KeyMatch { key, value });
            }
            match value {
                Value::Mapping(map) => self.stack.push(map.iter()),
                Value::Sequence(elements) => {
                    // Reversed so the stack pops elements in document order.
                    for element in elements.iter().rev() {
                        if let Value::Mapping(map) = element {
                            self.stack.push(map.iter());
                        }
                    }
                }
                _ => {}
            }
        }
        None
    }
}

/// Lazily flatten a match's subtree into `(key, stringified-value)` pairs.
///
/// Every mapping value and every sequence element is visited; scalars are
/// yielded under their containing key, sequence elements under the key of
/// the sequence itself.
pub fn flatten<'a>(matched: &KeyMatch<'a>) -> FlattenedLeaves<'a> {
    FlattenedLeaves {
        stack: vec![(matched.key, matched.value)],
    }
}

/// Iterator over a match's scalar leaves, produced by [`flatten`].
#[derive(Debug)]
pub struct FlattenedLeaves<'a> {
    stack: Vec<(&'a str, &'a Value)>,
}

impl<'a> Iterator for FlattenedLeaves<'a> {
    type Item = (&'a str, String);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((key, value)) = self.stack.pop() {
            match value {
                Value::Mapping(map) => {
                    let entries: Vec<_> = map.iter().collect();
                    for (entry_key, entry_value) in entries.into_iter().rev() {
                        if let Some(entry_key) = entry_key.as_str() {
                            self.stack.push((entry_key, entry_value));
                        }
                    }
                }
                Value::Sequence(elements) => {
                    for element in elements.iter().rev() {
                        self.stack.push((key, element));
                    }
                }
                Value::Tagged(tagged) => self.stack.push((key, &tagged.value)),
                // Scalars stringify in a stable canonical form, since the
                // text is compared against a pattern downstream.
                Value::Null => return Some((key, String::from("null"))),
                Value::Bool(flag) => return Some((key, flag.to_string())),
                Value::Number(number) => return Some((key, number.to_string())),
                Value::String(text) => return Some((key, text.clone())),
            }
        }
        None
    }
}
