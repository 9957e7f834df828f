// Copyright 2025 Test Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! PNG chart rendering.
//!
//! Charts are strictly presentational: they format values the summary
//! builder already computed and re-derive nothing. Rendering failures are
//! surfaced as [`Error::Chart`] so callers can report and continue; the JSON
//! and HTML artifacts never depend on a chart having been drawn.

use plotters::prelude::*;
use std::path::Path;

use crate::error::{Error, Result};
use crate::report::AnalysisReport;

/// Per-package success-rate chart filename.
pub const TEST_RESULTS_CHART: &str = "test_results_chart.png";
/// Per-package duration chart filename.
pub const PERFORMANCE_CHART: &str = "performance_chart.png";
/// Covered-vs-uncovered chart filename.
pub const COVERAGE_CHART: &str = "coverage_chart.png";

const CHART_SIZE: (u32, u32) = (800, 600);
const ORANGE: RGBColor = RGBColor(255, 165, 0);

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Render every chart the report has data for into `analysis_dir`.
pub fn render_charts(report: &AnalysisReport, analysis_dir: &Path) -> Result<()> {
    if !report.packages.is_empty() {
        draw_success_rates(report, analysis_dir).map_err(|e| Error::Chart(e.to_string()))?;
        draw_durations(report, analysis_dir).map_err(|e| Error::Chart(e.to_string()))?;
    }
    if let Some(total) = report.coverage.total {
        draw_coverage(total, analysis_dir).map_err(|e| Error::Chart(e.to_string()))?;
    }
    Ok(())
}

fn rate_color(rate: f64) -> RGBColor {
    if rate >= 100.0 {
        GREEN
    } else if rate >= 80.0 {
        ORANGE
    } else {
        RED
    }
}

fn draw_success_rates(report: &AnalysisReport, dir: &Path) -> DrawResult {
    let path = dir.join(TEST_RESULTS_CHART);
    let names: Vec<&str> = report.packages.keys().map(String::as_str).collect();
    let rates: Vec<f64> = report.packages.values().map(|p| p.success_rate).collect();

    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Package Test Success Rates", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..names.len(), 0.0..110.0f64)?;

    chart
        .configure_mesh()
        .x_labels(names.len())
        .x_label_formatter(&|idx| names.get(*idx).copied().unwrap_or_default().to_string())
        .y_desc("Success Rate (%)")
        .draw()?;

    chart.draw_series(rates.iter().enumerate().map(|(idx, rate)| {
        Rectangle::new([(idx, 0.0), (idx + 1, *rate)], rate_color(*rate).filled())
    }))?;

    root.present()?;
    Ok(())
}

fn draw_durations(report: &AnalysisReport, dir: &Path) -> DrawResult {
    let path = dir.join(PERFORMANCE_CHART);
    let names: Vec<&str> = report.packages.keys().map(String::as_str).collect();
    let durations: Vec<f64> = report.packages.values().map(|p| p.duration).collect();
    let max = durations.iter().copied().fold(0.0f64, f64::max).max(1.0);

    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Test Execution Time by Package", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..names.len(), 0.0..(max * 1.1))?;

    chart
        .configure_mesh()
        .x_labels(names.len())
        .x_label_formatter(&|idx| names.get(*idx).copied().unwrap_or_default().to_string())
        .y_desc("Duration (seconds)")
        .draw()?;

    chart.draw_series(durations.iter().enumerate().map(|(idx, duration)| {
        Rectangle::new([(idx, 0.0), (idx + 1, *duration)], BLUE.mix(0.6).filled())
    }))?;

    root.present()?;
    Ok(())
}

fn draw_coverage(total: f64, dir: &Path) -> DrawResult {
    let path = dir.join(COVERAGE_CHART);
    let segments = [("Covered", total, GREEN), ("Uncovered", 100.0 - total, RED)];

    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Code Coverage: {total:.1}%"), ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..segments.len(), 0.0..100.0f64)?;

    chart
        .configure_mesh()
        .x_labels(segments.len())
        .x_label_formatter(&|idx| {
            segments
                .get(*idx)
                .map(|(label, _, _)| label.to_string())
                .unwrap_or_default()
        })
        .y_desc("Percent of statements")
        .draw()?;

    chart.draw_series(
        segments
            .iter()
            .enumerate()
            .map(|(idx, (_, value, color))| {
                Rectangle::new([(idx, 0.0), (idx + 1, *value)], color.mix(0.7).filled())
            }),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::CoverageSummary;
    use crate::results::parse_test_log;
    use std::collections::BTreeMap;

    fn sample_report() -> AnalysisReport {
        let mut packages = BTreeMap::new();
        packages.insert(
            "alpha".to_string(),
            parse_test_log("=== RUN a\n--- PASS: a\nok pkg 0.4s\n"),
        );
        AnalysisReport::new(
            packages,
            BTreeMap::new(),
            CoverageSummary {
                total: Some(63.0),
                ..CoverageSummary::default()
            },
        )
    }

    #[test]
    fn empty_report_renders_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let report = AnalysisReport::default();
        render_charts(&report, dir.path()).unwrap();
        assert!(!dir.path().join(TEST_RESULTS_CHART).exists());
        assert!(!dir.path().join(COVERAGE_CHART).exists());
    }

    #[test]
    fn charts_either_render_or_fail_recoverably() {
        let dir = tempfile::tempdir().unwrap();
        // Headless environments may lack fonts; the contract is that chart
        // trouble is an Error::Chart, never a panic.
        match render_charts(&sample_report(), dir.path()) {
            Ok(()) => {
                assert!(dir.path().join(TEST_RESULTS_CHART).exists());
                assert!(dir.path().join(PERFORMANCE_CHART).exists());
                assert!(dir.path().join(COVERAGE_CHART).exists());
            }
            Err(Error::Chart(_)) => {}
            Err(other) => panic!("unexpected error kind: {other}"),
        }
    }
}
