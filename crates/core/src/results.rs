// Copyright 2025 Test Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Test-run log parsing.
//!
//! A test log is unstructured text emitted by the harness, one file per
//! package. Parsing is marker counting: each test prints a `=== RUN` line
//! when it starts and exactly one `--- PASS` / `--- FAIL` / `--- SKIP` line
//! when it finishes. Whether a skipped test also produced a `=== RUN` line
//! is a property of the harness, so `test_count >= passed + failed + skipped`
//! is not something this module enforces.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DURATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+\.?\d*)s").unwrap());

/// Marker substrings recognized at line granularity.
const RUN_MARKER: &str = "=== RUN";
const PASS_MARKER: &str = "--- PASS";
const FAIL_MARKER: &str = "--- FAIL";
const SKIP_MARKER: &str = "--- SKIP";

/// Aggregated outcome of one package's test log.
///
/// Immutable after parsing; one instance per `<package>_tests.log` per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageResult {
    /// Number of `=== RUN` markers.
    pub test_count: u64,
    /// Number of `--- PASS` markers.
    pub passed: u64,
    /// Number of `--- FAIL` markers.
    pub failed: u64,
    /// Number of `--- SKIP` markers.
    pub skipped: u64,
    /// Total duration in seconds, 0 when no time-like token was found.
    pub duration: f64,
    /// `passed / test_count * 100`, 0 when `test_count` is 0.
    pub success_rate: f64,
}

impl PackageResult {
    fn from_counts(test_count: u64, passed: u64, failed: u64, skipped: u64, duration: f64) -> Self {
        let success_rate = if test_count > 0 {
            passed as f64 / test_count as f64 * 100.0
        } else {
            0.0
        };
        PackageResult {
            test_count,
            passed,
            failed,
            skipped,
            duration,
            success_rate,
        }
    }
}

/// Parse one test log into a [`PackageResult`].
///
/// Best-effort and infallible: malformed or empty input yields all-zero
/// counts rather than an error.
pub fn parse_test_log(content: &str) -> PackageResult {
    let count = |marker: &str| content.matches(marker).count() as u64;

    PackageResult::from_counts(
        count(RUN_MARKER),
        count(PASS_MARKER),
        count(FAIL_MARKER),
        count(SKIP_MARKER),
        extract_duration(content),
    )
}

/// First `<number>s` token anywhere in the log, 0 when absent.
///
/// Heuristic: the harness prints the package elapsed time on its final
/// `ok <package> <seconds>s` line, but an earlier unrelated number suffixed
/// with `s` will be captured instead. Kept isolated here so a dedicated
/// total-duration marker can replace it if the log format grows one.
fn extract_duration(content: &str) -> f64 {
    DURATION_RE
        .captures(content)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_all_marker_kinds() {
        let log = "\
=== RUN   TestAlpha
--- PASS: TestAlpha (0.01s)
=== RUN   TestBeta
--- FAIL: TestBeta (0.02s)
=== RUN   TestGamma
--- SKIP: TestGamma (0.00s)
FAIL
exit status 1
";
        let result = parse_test_log(log);
        assert_eq!(result.test_count, 3);
        assert_eq!(result.passed, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn success_rate_is_passed_over_run_count() {
        let log = "=== RUN a\n=== RUN b\n=== RUN c\n--- PASS: a\n--- PASS: b\n";
        let result = parse_test_log(log);
        assert_eq!(result.test_count, 3);
        assert_eq!(result.passed, 2);
        assert!((result.success_rate - 66.666).abs() < 0.01);
    }

    #[test]
    fn empty_log_is_all_zero() {
        let result = parse_test_log("");
        assert_eq!(result.test_count, 0);
        assert_eq!(result.passed, 0);
        assert_eq!(result.failed, 0);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.duration, 0.0);
        assert_eq!(result.success_rate, 0.0);
    }

    #[test]
    fn duration_takes_first_time_like_token() {
        let result = parse_test_log("--- PASS: TestX (0.31s)\nok  pkg/foo  2.54s\n");
        assert_eq!(result.duration, 0.31);
    }

    #[test]
    fn duration_defaults_to_zero() {
        assert_eq!(parse_test_log("no timings here").duration, 0.0);
    }

    #[test]
    fn integer_duration_parses() {
        assert_eq!(parse_test_log("ok pkg 30s").duration, 30.0);
    }
}
