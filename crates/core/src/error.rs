// Copyright 2025 Matbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared error taxonomy for the capture/reproduction pipeline.

use thiserror::Error;

/// Errors that can occur anywhere in the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// No prior benchmark artifacts exist. A normal, reportable
    /// condition for an empty or missing artifact directory.
    #[error("no benchmark data found")]
    NoData,

    /// Filesystem error while reading or writing artifacts
    #[error("artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed structured record
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),

    /// External build step exited non-zero
    #[error("build failed: {stderr}")]
    BuildFailed {
        /// Captured standard error of the build step.
        stderr: String,
    },

    /// External benchmark run exited non-zero
    #[error("benchmark run failed: {stderr}")]
    BenchFailed {
        /// Captured standard error of the benchmark run.
        stderr: String,
    },

    /// Historical result file could not be parsed in text mode
    #[error("unparsable result file: {0}")]
    Parse(String),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error is the missing-artifacts condition, which
    /// callers report as a message rather than a failure.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Error::NoData)
    }
}
