// Copyright 2025 Test Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Coverage profile aggregation.
//!
//! Coverage data arrives as one profile per package. The first line of a
//! profile declares the instrumentation mode; the remaining lines are the
//! external tool's native records and are opaque here. Multiple profiles are
//! merged into a single combined file, then `go tool cover -func` is invoked
//! to compute the total percentage.
//!
//! Everything in this module is recoverable: a missing or failing `go`
//! binary leaves `total` unset and records an error string, and the rest of
//! the analysis proceeds without coverage.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

use crate::scan::{self, COVERAGE_SUFFIX};

/// Mode declaration written at the top of a merged profile.
const COMBINED_MODE: &str = "mode: atomic";
/// Filename of the merged profile inside the coverage directory.
pub const COMBINED_FILE: &str = "combined_coverage.out";

static PERCENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+\.?\d*)%").unwrap());

/// Aggregated coverage for one analysis run.
///
/// `total` absent means "no coverage data", which is distinct from 0%.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// Total coverage percentage in `[0, 100]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    /// The profile the percentage was computed from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_file: Option<PathBuf>,
    /// Recorded failure from merging or the external tool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Merge and summarize every `*_coverage.out` under `coverage_dir`.
///
/// The external command runs with `project_root` as working directory, the
/// same place the profiles were produced from.
pub fn collect_coverage(project_root: &Path, coverage_dir: &Path) -> CoverageSummary {
    let profiles = scan::packages_with_suffix(coverage_dir, COVERAGE_SUFFIX);
    if profiles.is_empty() {
        return CoverageSummary::default();
    }

    let paths: Vec<PathBuf> = profiles.into_iter().map(|(_, path)| path).collect();
    let combined = match paths.as_slice() {
        [single] => single.clone(),
        _ => {
            let target = coverage_dir.join(COMBINED_FILE);
            match merge_profiles(&paths) {
                Ok(merged) => {
                    if let Err(err) = fs::write(&target, merged) {
                        warn!(path = %target.display(), error = %err, "failed to write combined profile");
                        return CoverageSummary {
                            error: Some(format!("failed to write combined profile: {err}")),
                            ..CoverageSummary::default()
                        };
                    }
                    target
                }
                Err(err) => {
                    return CoverageSummary {
                        error: Some(err),
                        ..CoverageSummary::default()
                    }
                }
            }
        }
    };

    summarize_profile(project_root, &combined)
}

/// Concatenate profiles into one: a single mode line, then every non-mode
/// line of every input in input-file order.
fn merge_profiles(paths: &[PathBuf]) -> std::result::Result<String, String> {
    let mut merged = String::from(COMBINED_MODE);
    merged.push('\n');
    for path in paths {
        let content = fs::read_to_string(path)
            .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
        for line in content.lines() {
            if !line.starts_with("mode:") {
                merged.push_str(line);
                merged.push('\n');
            }
        }
    }
    Ok(merged)
}

/// Run the coverage tool over a profile and extract the total percentage.
fn summarize_profile(project_root: &Path, profile: &Path) -> CoverageSummary {
    debug!(profile = %profile.display(), "running coverage tool");
    let output = Command::new("go")
        .args(["tool", "cover", "-func"])
        .arg(profile)
        .current_dir(project_root)
        .output();

    match output {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            CoverageSummary {
                total: parse_total_percent(&stdout),
                combined_file: Some(profile.to_path_buf()),
                error: None,
            }
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, "coverage tool failed");
            CoverageSummary {
                error: Some(format!(
                    "go tool cover exited with {}: {}",
                    output.status,
                    stderr.trim()
                )),
                ..CoverageSummary::default()
            }
        }
        Err(err) => {
            warn!(error = %err, "coverage tool unavailable");
            CoverageSummary {
                error: Some(format!("failed to run go tool cover: {err}")),
                ..CoverageSummary::default()
            }
        }
    }
}

/// Percentage token from the first `total:` line of the tool's output.
fn parse_total_percent(stdout: &str) -> Option<f64> {
    stdout
        .lines()
        .find(|line| line.starts_with("total:"))
        .and_then(|line| PERCENT_RE.captures(line))
        .and_then(|caps| caps[1].parse().ok())
}
