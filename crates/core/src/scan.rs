// Copyright 2025 Test Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Input file discovery.
//!
//! Result, benchmark, and coverage files live in fixed directories under the
//! project root and are keyed by filename: `<package>_tests.log`,
//! `<package>_bench.log`, `<package>_coverage.out`. A missing directory is
//! "no data for this category", never an error.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Filename suffix for test-run logs.
pub const TESTS_SUFFIX: &str = "_tests.log";
/// Filename suffix for benchmark logs.
pub const BENCH_SUFFIX: &str = "_bench.log";
/// Filename suffix for coverage profiles.
pub const COVERAGE_SUFFIX: &str = "_coverage.out";

/// Files in `dir` whose name ends with `suffix`, as `(package, path)` pairs
/// sorted by package name.
///
/// The package name is the filename with the suffix stripped. Unreadable
/// directories or entries are logged and treated as absent.
pub fn packages_with_suffix(dir: &Path, suffix: &str) -> Vec<(String, PathBuf)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut found = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(package) = name.strip_suffix(suffix) {
            found.push((package.to_string(), entry.path()));
        }
    }
    found.sort();
    found
}

/// Read a discovered file, logging and returning `None` on failure so the
/// package is simply absent from the results.
pub fn read_log(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "skipping unreadable log file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("nope");
        assert!(packages_with_suffix(&absent, TESTS_SUFFIX).is_empty());
    }

    #[test]
    fn strips_suffix_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("beta_tests.log"), "").unwrap();
        fs::write(dir.path().join("alpha_tests.log"), "").unwrap();
        fs::write(dir.path().join("alpha_bench.log"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let found = packages_with_suffix(dir.path(), TESTS_SUFFIX);
        let names: Vec<&str> = found.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn read_log_returns_none_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_log(&dir.path().join("gone_tests.log")).is_none());
    }
}
