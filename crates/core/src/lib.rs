// Copyright 2025 Test Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Log parsing, aggregation, and report rendering for Test Observatory.
//!
//! The pipeline is a one-way batch flow over a project root:
//!
//! ```text
//! scan → parse (results, bench) → coverage → summary → render (json, charts, html)
//! ```
//!
//! Each run is a fresh, independent computation parameterized by the root
//! path; there is no state beyond the artifacts written into the analysis
//! directory. Failures are local by design: a missing directory is empty
//! data, a malformed log parses to zeros, a broken coverage tool becomes a
//! recorded string, and a chart failure never blocks the JSON document.
//!
//! # Quick Start
//!
//! ```no_run
//! use test_observatory_core::Analyzer;
//!
//! let analyzer = Analyzer::new(".").unwrap();
//! let report = analyzer.analyze();
//! let path = analyzer.write_json(&report).unwrap();
//! println!("analysis saved to {}", path.display());
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod bench;
pub mod charts;
pub mod coverage;
pub mod error;
pub mod html;
pub mod report;
pub mod results;
pub mod scan;
pub mod summary;

pub use bench::{BenchmarkRecord, PackageBenchmarks};
pub use coverage::CoverageSummary;
pub use error::{Error, Result};
pub use report::AnalysisReport;
pub use results::PackageResult;
pub use summary::Summary;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Test-run and benchmark log directory, relative to the project root.
pub const TEST_RESULTS_DIR: &str = "test_results";
/// Coverage profile directory, relative to the project root.
pub const COVERAGE_DIR: &str = "coverage";

/// The analysis pipeline, parameterized by a project root.
#[derive(Debug, Clone)]
pub struct Analyzer {
    project_root: PathBuf,
    test_results_dir: PathBuf,
    coverage_dir: PathBuf,
    analysis_dir: PathBuf,
}

impl Analyzer {
    /// Bind the pipeline to a project root and create its analysis
    /// directory.
    pub fn new(project_root: impl Into<PathBuf>) -> Result<Self> {
        let project_root = project_root.into();
        let analysis_dir = project_root.join(report::ANALYSIS_DIR);
        fs::create_dir_all(&analysis_dir).map_err(|err| Error::io(&analysis_dir, err))?;

        Ok(Analyzer {
            test_results_dir: project_root.join(TEST_RESULTS_DIR),
            coverage_dir: project_root.join(COVERAGE_DIR),
            analysis_dir,
            project_root,
        })
    }

    /// Directory all artifacts are written into.
    pub fn analysis_dir(&self) -> &Path {
        &self.analysis_dir
    }

    /// Run the scan → parse → aggregate stages and assemble the report.
    ///
    /// Infallible by construction: every input problem degrades to empty or
    /// zeroed data rather than an error.
    pub fn analyze(&self) -> AnalysisReport {
        info!(root = %self.project_root.display(), "analyzing test results");

        let mut packages = BTreeMap::new();
        for (package, path) in scan::packages_with_suffix(&self.test_results_dir, scan::TESTS_SUFFIX)
        {
            if let Some(content) = scan::read_log(&path) {
                debug!(package = %package, "parsed test log");
                packages.insert(package, results::parse_test_log(&content));
            }
        }

        let mut performance = BTreeMap::new();
        for (package, path) in scan::packages_with_suffix(&self.test_results_dir, scan::BENCH_SUFFIX)
        {
            if let Some(content) = scan::read_log(&path) {
                debug!(package = %package, "parsed benchmark log");
                performance.insert(package, bench::parse_bench_log(&content));
            }
        }

        let coverage = coverage::collect_coverage(&self.project_root, &self.coverage_dir);

        AnalysisReport::new(packages, performance, coverage)
    }

    /// Write the report as a timestamped JSON document, returning its path.
    pub fn write_json(&self, report: &AnalysisReport) -> Result<PathBuf> {
        report.write_json(&self.analysis_dir)
    }

    /// Render the PNG charts into the analysis directory.
    pub fn render_charts(&self, report: &AnalysisReport) -> Result<()> {
        charts::render_charts(report, &self.analysis_dir)
    }

    /// Write the HTML report, returning its path.
    pub fn write_html(&self, report: &AnalysisReport) -> Result<PathBuf> {
        html::write_html(report, &self.analysis_dir)
    }
}
