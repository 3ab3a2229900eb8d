//! # Directory Walker
//!
//! Regex-filtered, ignore-aware traversal of a directory tree.
//!
//! The walk is depth-first and sorted by file name for reproducible
//! discovery order. The `.git` directory is always excluded; a `.gitignore`
//! at the root, when present, excludes any matched entry (directories are
//! pruned so their contents are never visited). Each call performs a fresh
//! walk.

use ignore::gitignore::Gitignore;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::constants::{GIT_DIR, IGNORE_FILE};

/// Load the root's ignore file, if one exists.
fn load_ignore_spec(root: &Path) -> Option<Gitignore> {
    let ignore_path = root.join(IGNORE_FILE);
    if !ignore_path.is_file() {
        return None;
    }
    let (spec, err) = Gitignore::new(&ignore_path);
    if let Some(err) = err {
        debug!("partially unparseable {}: {}", IGNORE_FILE, err);
    }
    Some(spec)
}

fn is_excluded(entry: &DirEntry, root: &Path, spec: Option<&Gitignore>) -> bool {
    // The root itself is never excluded, even when its name matches.
    if entry.depth() == 0 {
        return false;
    }
    let is_dir = entry.file_type().is_dir();
    if is_dir && entry.file_name().to_str() == Some(GIT_DIR) {
        return true;
    }
    let Some(spec) = spec else {
        return false;
    };
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    spec.matched(relative, is_dir).is_ignore()
}

/// Find all files under `root` whose full path string matches `pattern`.
///
/// The regex is applied to the path's lossy-UTF-8 string form with an
/// unanchored search, not to the bare file name. The returned iterator is
/// lazy; consuming it again requires a fresh call, which performs a fresh
/// walk. Unreadable directories are skipped silently so partially
/// restricted trees can still be audited.
pub fn find_files<'a>(pattern: &'a Regex, root: &'a Path) -> impl Iterator<Item = PathBuf> + 'a {
    let spec = load_ignore_spec(root);
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| !is_excluded(entry, root, spec.as_ref()))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(DirEntry::into_path)
        .filter(move |path| pattern.is_match(&path.to_string_lossy()))
}
