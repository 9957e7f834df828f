// Copyright 2025 Test Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTML report rendering.
//!
//! Formats the finished [`AnalysisReport`] into a standalone document that
//! references the chart images by relative path. Like the charts, this is a
//! formatting layer only: every number shown here came out of the summary
//! builder or the parsers.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use crate::charts::{COVERAGE_CHART, PERFORMANCE_CHART};
use crate::error::{Error, Result};
use crate::report::AnalysisReport;

/// HTML report filename inside the analysis directory.
pub const HTML_REPORT: &str = "test_analysis_report.html";

/// Packages slower than this many seconds get an optimization nudge.
const SLOW_PACKAGE_SECS: f64 = 10.0;
/// Coverage below this percentage gets an improvement nudge.
const COVERAGE_TARGET: f64 = 80.0;

const STYLE: &str = "\
        body { font-family: Arial, sans-serif; margin: 20px; background-color: #f5f5f5; }
        .container { max-width: 1200px; margin: 0 auto; background: white; padding: 20px; border-radius: 8px; }
        .header { text-align: center; border-bottom: 2px solid #007acc; padding-bottom: 20px; margin-bottom: 30px; }
        .metric { background: #f8f9fa; padding: 15px; margin: 10px 0; border-radius: 5px; border-left: 4px solid #007acc; }
        .success { border-left-color: #28a745; }
        .warning { border-left-color: #ffc107; }
        .danger { border-left-color: #dc3545; }
        .chart { text-align: center; margin: 20px 0; }
        table { width: 100%; border-collapse: collapse; margin: 20px 0; }
        th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
        th { background-color: #007acc; color: white; }
        .timestamp { color: #666; font-size: 0.9em; }";

fn row_class(success_rate: f64) -> &'static str {
    if success_rate >= 100.0 {
        "success"
    } else if success_rate >= 80.0 {
        "warning"
    } else {
        "danger"
    }
}

/// Render the report as a complete HTML document.
pub fn render_html(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let totals = report.summary.packages.clone().unwrap_or_default();

    writeln!(out, "<!DOCTYPE html>").unwrap();
    writeln!(out, "<html lang=\"en\">").unwrap();
    writeln!(out, "<head>").unwrap();
    writeln!(out, "    <meta charset=\"UTF-8\">").unwrap();
    writeln!(out, "    <title>Test Analysis Report</title>").unwrap();
    writeln!(out, "    <style>\n{STYLE}\n    </style>").unwrap();
    writeln!(out, "</head>").unwrap();
    writeln!(out, "<body>").unwrap();
    writeln!(out, "<div class=\"container\">").unwrap();
    writeln!(out, "    <div class=\"header\">").unwrap();
    writeln!(out, "        <h1>Test Analysis Report</h1>").unwrap();
    writeln!(
        out,
        "        <p class=\"timestamp\">Generated: {}</p>",
        report.timestamp
    )
    .unwrap();
    writeln!(out, "    </div>").unwrap();

    // Summary block
    writeln!(out, "    <div class=\"metric\">").unwrap();
    writeln!(out, "        <h2>Summary</h2>").unwrap();
    writeln!(
        out,
        "        <p><strong>Total Packages:</strong> {}</p>",
        totals.total
    )
    .unwrap();
    writeln!(
        out,
        "        <p><strong>Total Tests:</strong> {}</p>",
        totals.tests.total
    )
    .unwrap();
    writeln!(
        out,
        "        <p><strong>Success Rate:</strong> {:.1}%</p>",
        totals.success_rate
    )
    .unwrap();
    writeln!(
        out,
        "        <p><strong>Total Duration:</strong> {:.1}s</p>",
        totals.duration
    )
    .unwrap();
    writeln!(out, "    </div>").unwrap();

    // Per-package table
    writeln!(out, "    <div class=\"metric\">").unwrap();
    writeln!(out, "        <h2>Package Details</h2>").unwrap();
    writeln!(out, "        <table>").unwrap();
    writeln!(out, "            <thead><tr><th>Package</th><th>Tests</th><th>Passed</th><th>Failed</th><th>Skipped</th><th>Duration</th><th>Success Rate</th></tr></thead>").unwrap();
    writeln!(out, "            <tbody>").unwrap();
    for (name, result) in &report.packages {
        writeln!(
            out,
            "            <tr class=\"{}\"><td><strong>{}</strong></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.1}s</td><td>{:.1}%</td></tr>",
            row_class(result.success_rate),
            name,
            result.test_count,
            result.passed,
            result.failed,
            result.skipped,
            result.duration,
            result.success_rate
        )
        .unwrap();
    }
    writeln!(out, "            </tbody>").unwrap();
    writeln!(out, "        </table>").unwrap();
    writeln!(out, "    </div>").unwrap();

    // Coverage section
    writeln!(out, "    <div class=\"metric\">").unwrap();
    writeln!(out, "        <h2>Coverage</h2>").unwrap();
    match report.coverage.total {
        Some(total) => {
            writeln!(
                out,
                "        <p><strong>Total Coverage:</strong> {total:.1}%</p>"
            )
            .unwrap();
            writeln!(
                out,
                "        <div class=\"chart\"><img src=\"{COVERAGE_CHART}\" alt=\"Coverage Chart\" style=\"max-width: 100%;\"></div>"
            )
            .unwrap();
        }
        None => writeln!(out, "        <p>No coverage data available</p>").unwrap(),
    }
    writeln!(out, "    </div>").unwrap();

    // Performance section
    writeln!(out, "    <div class=\"metric\">").unwrap();
    writeln!(out, "        <h2>Performance</h2>").unwrap();
    writeln!(
        out,
        "        <div class=\"chart\"><img src=\"{PERFORMANCE_CHART}\" alt=\"Performance Chart\" style=\"max-width: 100%;\"></div>"
    )
    .unwrap();
    writeln!(out, "    </div>").unwrap();

    // Recommendations
    writeln!(out, "    <div class=\"metric\">").unwrap();
    writeln!(out, "        <h2>Recommendations</h2>").unwrap();
    for line in recommendations(report) {
        writeln!(out, "        <p>{line}</p>").unwrap();
    }
    writeln!(out, "    </div>").unwrap();

    writeln!(out, "</div>").unwrap();
    writeln!(out, "</body>").unwrap();
    writeln!(out, "</html>").unwrap();

    out
}

fn recommendations(report: &AnalysisReport) -> Vec<String> {
    let mut lines = Vec::new();

    let failing: Vec<&str> = report
        .packages
        .iter()
        .filter(|(_, result)| result.failed > 0)
        .map(|(name, _)| name.as_str())
        .collect();
    if !failing.is_empty() {
        lines.push(format!(
            "<strong>Fix failing tests in:</strong> {}",
            failing.join(", ")
        ));
    }

    let slow: Vec<&str> = report
        .packages
        .iter()
        .filter(|(_, result)| result.duration > SLOW_PACKAGE_SECS)
        .map(|(name, _)| name.as_str())
        .collect();
    if !slow.is_empty() {
        lines.push(format!(
            "<strong>Optimize slow tests in:</strong> {}",
            slow.join(", ")
        ));
    }

    if let Some(total) = report.coverage.total {
        if total < COVERAGE_TARGET {
            lines.push(format!(
                "<strong>Improve code coverage:</strong> Current coverage is {total:.1}%, aim for {COVERAGE_TARGET:.0}%+"
            ));
        }
    }

    lines
}

/// Write the rendered document into `analysis_dir`, returning its path.
pub fn write_html(report: &AnalysisReport, analysis_dir: &Path) -> Result<PathBuf> {
    let path = analysis_dir.join(HTML_REPORT);
    fs::write(&path, render_html(report)).map_err(|err| Error::io(&path, err))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::CoverageSummary;
    use crate::results::parse_test_log;
    use std::collections::BTreeMap;

    fn report_with(log: &str, coverage: CoverageSummary) -> AnalysisReport {
        let mut packages = BTreeMap::new();
        packages.insert("alpha".to_string(), parse_test_log(log));
        AnalysisReport::new(packages, BTreeMap::new(), coverage)
    }

    #[test]
    fn document_contains_package_rows() {
        let report = report_with(
            "=== RUN a\n=== RUN b\n--- PASS: a\n--- FAIL: b\nok pkg 1.2s\n",
            CoverageSummary::default(),
        );
        let html = render_html(&report);
        assert!(html.contains("<strong>alpha</strong>"));
        assert!(html.contains("class=\"danger\""));
        assert!(html.contains("No coverage data available"));
    }

    #[test]
    fn failing_packages_are_called_out() {
        let report = report_with(
            "=== RUN a\n--- FAIL: a\n",
            CoverageSummary::default(),
        );
        let html = render_html(&report);
        assert!(html.contains("Fix failing tests in:</strong> alpha"));
    }

    #[test]
    fn low_coverage_is_called_out() {
        let report = report_with(
            "=== RUN a\n--- PASS: a\n",
            CoverageSummary {
                total: Some(55.5),
                ..CoverageSummary::default()
            },
        );
        let html = render_html(&report);
        assert!(html.contains("Total Coverage:</strong> 55.5%"));
        assert!(html.contains("Improve code coverage"));
    }

    #[test]
    fn full_success_row_is_green() {
        let report = report_with(
            "=== RUN a\n--- PASS: a\n",
            CoverageSummary::default(),
        );
        assert!(render_html(&report).contains("class=\"success\""));
    }
}
