// Copyright 2025 Matbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Human-readable report rendering.
//!
//! Plain-text reports printed by the CLI. Absent metadata entries are
//! reported as `N/A` rather than omitted.

use crate::analyze::CorpusSummary;
use crate::extract::ParsedResult;
use matbench_core::{ReproductionDiff, RunConfig, RunRecord};
use matbench_storage::LatestRun;
use std::fmt::Write;

/// Render the latest fastest-run summary.
pub fn latest_summary(latest: &LatestRun) -> String {
    let record = &latest.record;
    let mut out = String::new();

    writeln!(out, "=== FASTEST BENCHMARK RESULTS ===").unwrap();
    writeln!(out, "Timestamp: {}", latest.config.timestamp).unwrap();
    writeln!(out, "Configuration: {}", latest.config.features).unwrap();
    writeln!(out, "Latency: {:.2}ms", record.latency_ms).unwrap();
    writeln!(out, "Throughput: {:.2} GFLOPS", record.throughput_gflops).unwrap();
    writeln!(out, "Matrix Size: {}", matrix_size(record)).unwrap();
    writeln!(
        out,
        "Correctness: {}",
        if record.correctness { "✓" } else { "✗" }
    )
    .unwrap();
    writeln!(out, "Max Error: {:.2e}", record.max_error).unwrap();

    let perf = &record.performance_analysis;
    writeln!(out).unwrap();
    writeln!(out, "Speedups:").unwrap();
    writeln!(out, "  vs Naive: {:.1}x", perf.speedup_vs_naive).unwrap();
    writeln!(out, "  BLAS: {:.1}x", perf.blas_speedup).unwrap();
    writeln!(out, "  Parallel: {:.1}x", perf.parallel_speedup).unwrap();
    writeln!(out, "  GPU: {:.1}x", perf.gpu_speedup).unwrap();
    writeln!(out, "  Vectorized: {:.1}x", perf.vectorized_speedup).unwrap();

    out
}

/// Render the banner printed before a reproduction attempt.
pub fn reproduce_banner(config: &RunConfig) -> String {
    let mut out = String::new();
    writeln!(out, "Reproducing benchmark with:").unwrap();
    writeln!(out, "  Features: {}", config.features).unwrap();
    writeln!(out, "  RUSTFLAGS: {}", config.rustflags).unwrap();
    out
}

/// Render the original-vs-reproduced latency comparison.
pub fn reproduction_report(original: &RunRecord, reproduced: &RunRecord) -> String {
    let diff = ReproductionDiff::new(original.latency_ms, reproduced.latency_ms);
    let mut out = String::new();
    writeln!(out, "=== REPRODUCTION RESULTS ===").unwrap();
    writeln!(out, "Original: {:.2}ms", original.latency_ms).unwrap();
    writeln!(out, "Reproduced: {:.2}ms", reproduced.latency_ms).unwrap();
    writeln!(
        out,
        "Difference: {:.2}ms ({:.1}%)",
        diff.absolute_ms, diff.relative_pct
    )
    .unwrap();
    out
}

/// Render the condensed corpus report.
///
/// The worst block is printed only when more than one record ranked.
pub fn corpus_report(summary: &CorpusSummary) -> String {
    let mut out = String::new();
    writeln!(out, "=== PERFORMANCE ANALYSIS SUMMARY ===").unwrap();
    writeln!(
        out,
        "Total configurations tested: {}",
        summary.total_configurations
    )
    .unwrap();
    writeln!(out, "Successful runs: {}", summary.successful_runs).unwrap();

    if let Some(best) = &summary.best_performance {
        writeln!(out).unwrap();
        writeln!(out, "Best Performance:").unwrap();
        write_ranked_entry(&mut out, best);
    }

    if summary.successful_runs > 1 {
        if let Some(worst) = &summary.worst_performance {
            writeln!(out).unwrap();
            writeln!(out, "Worst Performance:").unwrap();
            write_ranked_entry(&mut out, worst);
        }
    }

    out
}

fn write_ranked_entry(out: &mut String, entry: &ParsedResult) {
    writeln!(out, "  File: {}", entry.file).unwrap();
    writeln!(out, "  Time: {} ms", opt_number(entry.latency_ms)).unwrap();
    writeln!(out, "  GFLOPS: {}", opt_number(entry.gflops)).unwrap();
    writeln!(out, "  Features: {}", meta_or_na(entry, "Features")).unwrap();
    writeln!(out, "  RUSTFLAGS: {}", meta_or_na(entry, "RUSTFLAGS")).unwrap();
}

fn opt_number(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => "N/A".to_string(),
    }
}

fn meta_or_na<'a>(entry: &'a ParsedResult, key: &str) -> &'a str {
    entry.metadata.get(key).map(String::as_str).unwrap_or("N/A")
}

/// Matrix size rendered without JSON quoting for plain strings.
fn matrix_size(record: &RunRecord) -> String {
    match &record.workload_info.matrix_size {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
