// Copyright 2025 Matbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark record types.
//!
//! `RunRecord` is the structured output of one completed benchmark
//! invocation; `RunConfig` is the build/run configuration that produced
//! it. The two are paired positionally in the artifact store: the
//! most-recent result file belongs with the most-recent config file, an
//! invariant writers preserve by always persisting both together.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Workload descriptor for a benchmark run.
///
/// `matrix_size` is kept open-shaped because the external benchmark has
/// emitted both `"1024x1024"` strings and `[m, n, k]` arrays over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadInfo {
    /// Matrix dimensions of the benchmarked multiplication.
    pub matrix_size: serde_json::Value,
}

/// Named speedup ratios relative to baseline strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceAnalysis {
    /// Speedup versus the naive triple-loop implementation.
    pub speedup_vs_naive: f64,
    /// Speedup versus the vendor math library.
    pub blas_speedup: f64,
    /// Speedup versus the parallel CPU implementation.
    pub parallel_speedup: f64,
    /// Speedup versus the accelerator backend.
    pub gpu_speedup: f64,
    /// Speedup versus the hand-vectorized implementation.
    pub vectorized_speedup: f64,
}

/// One completed benchmark invocation.
///
/// Identity is the file the record was persisted to plus its creation
/// timestamp; records are immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Measured latency in milliseconds.
    pub latency_ms: f64,
    /// Measured throughput in GFLOPS.
    pub throughput_gflops: f64,
    /// Workload descriptor.
    pub workload_info: WorkloadInfo,
    /// Whether the result matched the reference computation.
    pub correctness: bool,
    /// Maximum numerical error against the reference.
    pub max_error: f64,
    /// Speedups relative to baseline strategies.
    pub performance_analysis: PerformanceAnalysis,
}

/// The build/run configuration that produced a [`RunRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Feature-selection string passed to the external build.
    pub features: String,
    /// Compiler flags applied via the `RUSTFLAGS` environment override.
    pub rustflags: String,
    /// Creation timestamp of the configuration.
    pub timestamp: String,
}

impl RunConfig {
    /// Create a new configuration stamped with the current time.
    pub fn new(features: impl Into<String>, rustflags: impl Into<String>) -> Self {
        Self {
            features: features.into(),
            rustflags: rustflags.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
