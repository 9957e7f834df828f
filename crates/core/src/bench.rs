// Copyright 2025 Test Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark log parsing.
//!
//! Benchmark output is line-oriented: each record is a single line starting
//! with the `Benchmark` prefix, whitespace-separated into name, iteration
//! count, time per operation, and a memory-per-operation token. The memory
//! token is kept as opaque text since its unit suffix varies by harness.

use serde::{Deserialize, Serialize};

/// Prefix identifying a benchmark record line.
const BENCH_PREFIX: &str = "Benchmark";

/// Sentinel for a missing memory-per-operation token.
const NO_MEMORY: &str = "N/A";

/// One parsed benchmark line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Benchmark name, including any GOMAXPROCS suffix (`BenchmarkFoo-8`).
    pub name: String,
    /// Iterations executed.
    pub iterations: u64,
    /// Time per operation, in the harness's unit.
    pub time_per_op: f64,
    /// Memory-per-operation token, opaque text or `"N/A"`.
    pub memory_per_op: String,
}

/// Ordered benchmark records for one package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageBenchmarks {
    /// Records in log order.
    pub benchmarks: Vec<BenchmarkRecord>,
    /// Derived count, duplicated into the JSON document.
    pub benchmark_count: usize,
}

/// Parse one benchmark log into ordered records.
///
/// Lines without the prefix, with fewer than 4 tokens, or with non-numeric
/// iteration/time tokens are skipped silently; parsing never errors.
pub fn parse_bench_log(content: &str) -> PackageBenchmarks {
    let benchmarks: Vec<BenchmarkRecord> = content.lines().filter_map(parse_bench_line).collect();
    let benchmark_count = benchmarks.len();
    PackageBenchmarks {
        benchmarks,
        benchmark_count,
    }
}

fn parse_bench_line(line: &str) -> Option<BenchmarkRecord> {
    if !line.starts_with(BENCH_PREFIX) {
        return None;
    }
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return None;
    }

    Some(BenchmarkRecord {
        name: parts[0].to_string(),
        iterations: parts[1].parse().ok()?,
        time_per_op: parts[2].parse().ok()?,
        memory_per_op: parts.get(3).map_or(NO_MEMORY, |s| *s).to_string(),
    })
}
