//! # Structural Matcher Unit Tests
//!
//! Verifies key matching (shallowest match wins, matched subtrees are
//! never re-scanned) and subtree flattening to scalar leaves.

use regex::Regex;
use serde_yaml::Value;
use sops_audit::scanner::{find_by_key, flatten};

fn doc(yaml: &str) -> Value {
    serde_yaml::from_str(yaml).expect("test document parses")
}

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("test pattern compiles")
}

fn leaves(yaml: &str, key_pattern: &str) -> Vec<(String, String)> {
    let document = doc(yaml);
    let re = pattern(key_pattern);
    find_by_key(&document, &re)
        .flat_map(|matched| {
            flatten(&matched)
                .map(|(key, value)| (key.to_string(), value))
                .collect::<Vec<_>>()
        })
        .collect()
}

#[test]
fn test_matches_never_nest() {
    // The outer `data` wins; the inner one belongs to its subtree and is
    // not re-scanned.
    let document = doc("data:\n  data:\n    user: alice\n");
    let re = pattern("^data$");
    let matches: Vec<_> = find_by_key(&document, &re).collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].key, "data");
}

#[test]
fn test_partial_key_match_counts() {
    let document = doc("password: hunter2\nuser: alice\n");
    let re = pattern("pass");
    let matches: Vec<_> = find_by_key(&document, &re).collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].key, "password");
}

#[test]
fn test_recurses_into_unmatched_mappings() {
    let document = doc("spec:\n  template:\n    data:\n      token: t\n");
    let re = pattern("^data$");
    let matches: Vec<_> = find_by_key(&document, &re).collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].key, "data");
}

#[test]
fn test_recurses_only_into_mapping_sequence_elements() {
    // Scalar elements cannot hold a keyed match and are ignored; mapping
    // elements are searched.
    let document = doc("items:\n  - plain\n  - data:\n      user: alice\n  - 42\n");
    let re = pattern("^data$");
    let matches: Vec<_> = find_by_key(&document, &re).collect();
    assert_eq!(matches.len(), 1);
}

#[test]
fn test_no_match_yields_empty_sequence() {
    let document = doc("user: alice\n");
    let re = pattern("^data$");
    assert_eq!(find_by_key(&document, &re).count(), 0);
}

#[test]
fn test_non_mapping_document_yields_nothing() {
    let document = doc("- a\n- b\n");
    let re = pattern(".*");
    assert_eq!(find_by_key(&document, &re).count(), 0);

    let scalar = doc("just a string");
    assert_eq!(find_by_key(&scalar, &re).count(), 0);
}

#[test]
fn test_empty_pattern_matches_every_key() {
    let document = doc("user: alice\npass: hunter2\n");
    let re = pattern("");
    assert_eq!(find_by_key(&document, &re).count(), 2);
}

#[test]
fn test_flatten_scalar_match() {
    assert_eq!(
        leaves("data: secret\n", "^data$"),
        vec![(String::from("data"), String::from("secret"))]
    );
}

#[test]
fn test_flatten_nested_mapping_yields_leaf_keys() {
    assert_eq!(
        leaves("data:\n  user: alice\n  pass: hunter2\n", "^data$"),
        vec![
            (String::from("user"), String::from("alice")),
            (String::from("pass"), String::from("hunter2")),
        ]
    );
}

#[test]
fn test_flatten_descends_into_every_sequence_element() {
    // Unlike key matching, flattening visits scalar elements too, under
    // the key of the containing sequence.
    assert_eq!(
        leaves("data:\n  list:\n    - 1\n    - true\n    - item\n", "^data$"),
        vec![
            (String::from("list"), String::from("1")),
            (String::from("list"), String::from("true")),
            (String::from("list"), String::from("item")),
        ]
    );
}

#[test]
fn test_flatten_stringifies_scalars_canonically() {
    assert_eq!(
        leaves(
            "data:\n  count: 42\n  ratio: 0.5\n  enabled: true\n  missing: null\n",
            "^data$"
        ),
        vec![
            (String::from("count"), String::from("42")),
            (String::from("ratio"), String::from("0.5")),
            (String::from("enabled"), String::from("true")),
            (String::from("missing"), String::from("null")),
        ]
    );
}

#[test]
fn test_flatten_mixed_nesting() {
    let yaml = "data:\n  users:\n    - name: alice\n      token: t1\n    - name: bob\n      token: t2\n";
    assert_eq!(
        leaves(yaml, "^data$"),
        vec![
            (String::from("name"), String::from("alice")),
            (String::from("token"), String::from("t1")),
            (String::from("name"), String::from("bob")),
            (String::from("token"), String::from("t2")),
        ]
    );
}
