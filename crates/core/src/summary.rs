// Copyright 2025 Test Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Summary reduction.
//!
//! Pure arithmetic over the per-package maps, no I/O. Each block of the
//! summary is optional and omitted when its input category produced no data,
//! so consumers can distinguish "no coverage data" from "0% coverage".

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::bench::PackageBenchmarks;
use crate::coverage::CoverageSummary;
use crate::results::PackageResult;

/// Test totals across all packages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestTotals {
    /// Sum of per-package test counts.
    pub total: u64,
    /// Sum of per-package pass counts.
    pub passed: u64,
    /// Sum of per-package fail counts.
    pub failed: u64,
    /// Sum of per-package skip counts.
    pub skipped: u64,
}

/// Aggregate over every parsed package result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageTotals {
    /// Number of packages with a test log.
    pub total: usize,
    /// Summed marker counts.
    pub tests: TestTotals,
    /// Summed duration in seconds.
    pub duration: f64,
    /// Weighted rate: total passed over total tests, NOT the mean of the
    /// per-package rates.
    pub success_rate: f64,
}

/// Aggregate over every parsed benchmark log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTotals {
    /// Records across all packages.
    pub total_benchmarks: usize,
    /// Packages with a benchmark log.
    pub packages_with_benchmarks: usize,
}

/// Coverage total passed through from the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageTotals {
    /// Total coverage percentage.
    pub total: f64,
}

/// Top-level summary block of the analysis document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Present when at least one test log was parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<PackageTotals>,
    /// Present when at least one benchmark log was parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceTotals>,
    /// Present when the coverage aggregator produced a total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageTotals>,
}

/// Reduce the per-package maps into a [`Summary`].
pub fn build_summary(
    packages: &BTreeMap<String, PackageResult>,
    performance: &BTreeMap<String, PackageBenchmarks>,
    coverage: &CoverageSummary,
) -> Summary {
    let package_totals = (!packages.is_empty()).then(|| {
        let tests = TestTotals {
            total: packages.values().map(|p| p.test_count).sum(),
            passed: packages.values().map(|p| p.passed).sum(),
            failed: packages.values().map(|p| p.failed).sum(),
            skipped: packages.values().map(|p| p.skipped).sum(),
        };
        let success_rate = if tests.total > 0 {
            tests.passed as f64 / tests.total as f64 * 100.0
        } else {
            0.0
        };
        PackageTotals {
            total: packages.len(),
            duration: packages.values().map(|p| p.duration).sum(),
            tests,
            success_rate,
        }
    });

    let performance_totals = (!performance.is_empty()).then(|| PerformanceTotals {
        total_benchmarks: performance.values().map(|p| p.benchmark_count).sum(),
        packages_with_benchmarks: performance.len(),
    });

    Summary {
        packages: package_totals,
        performance: performance_totals,
        coverage: coverage.total.map(|total| CoverageTotals { total }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::parse_bench_log;
    use crate::results::parse_test_log;

    fn package(run: usize, pass: usize, duration: f64) -> PackageResult {
        let mut log = String::new();
        for _ in 0..run {
            log.push_str("=== RUN t\n");
        }
        for _ in 0..pass {
            log.push_str("--- PASS: t\n");
        }
        log.push_str(&format!("ok pkg {duration}s\n"));
        parse_test_log(&log)
    }

    #[test]
    fn empty_inputs_give_empty_summary() {
        let summary = build_summary(
            &BTreeMap::new(),
            &BTreeMap::new(),
            &CoverageSummary::default(),
        );
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn success_rate_is_weighted_not_averaged() {
        // alpha: 10 tests at 100%, beta: 90 tests at 0%.
        // Weighted rate is 10%, a naive mean of rates would be 50%.
        let mut packages = BTreeMap::new();
        packages.insert("alpha".to_string(), package(10, 10, 1.0));
        packages.insert("beta".to_string(), package(90, 0, 2.0));

        let summary = build_summary(&packages, &BTreeMap::new(), &CoverageSummary::default());
        let totals = summary.packages.unwrap();
        assert_eq!(totals.total, 2);
        assert_eq!(totals.tests.total, 100);
        assert_eq!(totals.tests.passed, 10);
        assert!((totals.success_rate - 10.0).abs() < f64::EPSILON);
        assert!((totals.duration - 3.0).abs() < 1e-9);
    }

    #[test]
    fn zero_tests_is_zero_rate() {
        let mut packages = BTreeMap::new();
        packages.insert("empty".to_string(), parse_test_log(""));
        let summary = build_summary(&packages, &BTreeMap::new(), &CoverageSummary::default());
        assert_eq!(summary.packages.unwrap().success_rate, 0.0);
    }

    #[test]
    fn benchmark_totals_count_records_and_packages() {
        let mut performance = BTreeMap::new();
        performance.insert(
            "alpha".to_string(),
            parse_bench_log("BenchmarkA 1 1.0 x\nBenchmarkB 2 2.0 y\n"),
        );
        performance.insert("beta".to_string(), parse_bench_log("no records"));

        let summary = build_summary(&BTreeMap::new(), &performance, &CoverageSummary::default());
        let totals = summary.performance.unwrap();
        assert_eq!(totals.total_benchmarks, 2);
        assert_eq!(totals.packages_with_benchmarks, 2);
    }

    #[test]
    fn coverage_total_passes_through() {
        let coverage = CoverageSummary {
            total: Some(81.3),
            ..CoverageSummary::default()
        };
        let summary = build_summary(&BTreeMap::new(), &BTreeMap::new(), &coverage);
        assert_eq!(summary.coverage.unwrap().total, 81.3);
        assert!(summary.packages.is_none());
    }
}
