// Copyright 2025 Test Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! The analysis document and its JSON writer.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::bench::PackageBenchmarks;
use crate::coverage::CoverageSummary;
use crate::error::{Error, Result};
use crate::results::PackageResult;
use crate::summary::Summary;

/// Analysis output directory, relative to the project root.
pub const ANALYSIS_DIR: &str = "test_analysis";

/// The single aggregate produced by one analysis run.
///
/// Written once to a timestamped JSON file and never mutated; each run
/// produces a new, independent report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Creation time, RFC 3339.
    pub timestamp: String,
    /// Totals derived from the maps below.
    pub summary: Summary,
    /// Per-package test results, keyed by package name.
    pub packages: BTreeMap<String, PackageResult>,
    /// Per-package benchmark records, keyed by package name.
    pub performance: BTreeMap<String, PackageBenchmarks>,
    /// Coverage aggregate, possibly empty.
    pub coverage: CoverageSummary,
}

impl AnalysisReport {
    /// Assemble a report from pipeline output, stamping it with the current
    /// local time and reducing the maps into the summary block.
    pub fn new(
        packages: BTreeMap<String, PackageResult>,
        performance: BTreeMap<String, PackageBenchmarks>,
        coverage: CoverageSummary,
    ) -> Self {
        let summary = crate::summary::build_summary(&packages, &performance, &coverage);
        AnalysisReport {
            timestamp: Local::now().to_rfc3339(),
            summary,
            packages,
            performance,
            coverage,
        }
    }

    /// Write the report as pretty-printed JSON into `analysis_dir` under a
    /// timestamped filename, returning the path written.
    pub fn write_json(&self, analysis_dir: &Path) -> Result<PathBuf> {
        let filename = format!("analysis_{}.json", Local::now().format("%Y%m%d_%H%M%S"));
        let path = analysis_dir.join(filename);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).map_err(|err| Error::io(&path, err))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::parse_test_log;

    #[test]
    fn written_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut packages = BTreeMap::new();
        packages.insert(
            "alpha".to_string(),
            parse_test_log("=== RUN a\n--- PASS: a\nok pkg 0.5s\n"),
        );

        let report =
            AnalysisReport::new(packages, BTreeMap::new(), CoverageSummary::default());
        let path = report.write_json(dir.path()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: AnalysisReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.packages.len(), 1);
        assert_eq!(parsed.summary.packages.as_ref().unwrap().total, 1);
    }

    #[test]
    fn empty_summary_blocks_are_omitted_from_json() {
        let report = AnalysisReport::new(
            BTreeMap::new(),
            BTreeMap::new(),
            CoverageSummary::default(),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"], serde_json::json!({}));
        assert!(json["coverage"].get("total").is_none());
    }
}
