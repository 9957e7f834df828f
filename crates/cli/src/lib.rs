//! CLI for Test Observatory.
//!
//! This crate provides the command-line interface for Test Observatory:
//! a single analysis mode over a project root, with opt-in chart and HTML
//! report generation.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use test_observatory_core::{AnalysisReport, Analyzer};

/// Test Observatory CLI.
#[derive(Parser, Debug)]
#[command(name = "test-observatory")]
#[command(author, version, about = "Aggregate test, benchmark, and coverage logs into reports", long_about = None)]
pub struct Cli {
    /// Project root directory containing test_results/ and coverage/.
    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,

    /// Render PNG charts into the analysis directory.
    #[arg(long)]
    pub charts: bool,

    /// Render an HTML report into the analysis directory.
    #[arg(long)]
    pub html: bool,
}

/// Run the CLI with the given arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the analysis directory or
/// the JSON document cannot be written.
pub fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let analyzer = Analyzer::new(&cli.project_root)?;
    let report = analyzer.analyze();
    let json_path = analyzer.write_json(&report)?;

    print_summary(&report);
    println!("Analysis saved to: {}", json_path.display());

    // Optional artifacts degrade on failure; the JSON document above is
    // already on disk.
    if cli.charts {
        match analyzer.render_charts(&report) {
            Ok(()) => println!("Charts written to: {}", analyzer.analysis_dir().display()),
            Err(e) => warn!(error = %e, "chart generation skipped"),
        }
    }

    if cli.html {
        let html_path = analyzer.write_html(&report)?;
        println!("HTML report generated: {}", html_path.display());
    }

    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    println!("{}", "Analysis Summary:".bold());

    if let Some(totals) = &report.summary.packages {
        let rate = format!("{:.1}%", totals.success_rate);
        let rate = if totals.success_rate >= 100.0 {
            rate.as_str().green()
        } else if totals.success_rate >= 80.0 {
            rate.as_str().yellow()
        } else {
            rate.as_str().red()
        };
        println!("  Packages:     {}", totals.total);
        println!("  Tests:        {}", totals.tests.total);
        println!("  Success Rate: {}", rate);
        println!("  Duration:     {:.1}s", totals.duration);
    } else {
        println!("  No test results found");
    }

    if let Some(coverage) = &report.summary.coverage {
        println!("  Coverage:     {:.1}%", coverage.total);
    }
    if let Some(error) = &report.coverage.error {
        println!("  Coverage:     {} ({})", "unavailable".yellow(), error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_current_directory() {
        let cli = Cli::parse_from(["test-observatory"]);
        assert_eq!(cli.project_root, PathBuf::from("."));
        assert!(!cli.charts);
        assert!(!cli.html);
    }

    #[test]
    fn flags_opt_into_optional_artifacts() {
        let cli = Cli::parse_from([
            "test-observatory",
            "--project-root",
            "/tmp/project",
            "--charts",
            "--html",
        ]);
        assert_eq!(cli.project_root, PathBuf::from("/tmp/project"));
        assert!(cli.charts);
        assert!(cli.html);
    }
}
