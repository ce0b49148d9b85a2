// Copyright 2025 Matbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Reproduction fidelity comparison.

use serde::{Deserialize, Serialize};

/// Latency difference between an original run and its reproduction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReproductionDiff {
    /// Absolute latency difference in milliseconds.
    pub absolute_ms: f64,
    /// Relative difference as a percentage of the original latency.
    pub relative_pct: f64,
}

impl ReproductionDiff {
    /// Compare an original latency against a reproduced one.
    ///
    /// A zero original latency has no baseline to compare against, so
    /// the relative difference is reported as 0 rather than infinity.
    pub fn new(original_ms: f64, reproduced_ms: f64) -> Self {
        let absolute_ms = (reproduced_ms - original_ms).abs();
        let relative_pct = if original_ms == 0.0 {
            0.0
        } else {
            absolute_ms / original_ms * 100.0
        };
        Self {
            absolute_ms,
            relative_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_absolute_and_relative() {
        let diff = ReproductionDiff::new(100.0, 110.0);
        assert_eq!(diff.absolute_ms, 10.0);
        assert_eq!(diff.relative_pct, 10.0);
    }

    #[test]
    fn test_zero_original_latency_stays_finite() {
        let diff = ReproductionDiff::new(0.0, 5.0);
        assert_eq!(diff.absolute_ms, 5.0);
        assert_eq!(diff.relative_pct, 0.0);
        assert!(diff.relative_pct.is_finite());
    }

    #[test]
    fn test_diff_is_symmetric_in_magnitude() {
        let faster = ReproductionDiff::new(100.0, 90.0);
        assert_eq!(faster.absolute_ms, 10.0);
        assert_eq!(faster.relative_pct, 10.0);
    }
}
