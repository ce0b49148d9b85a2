// Copyright 2025 Matbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Corpus analysis: scan, rank, summarize.
//!
//! One analysis pass scans every historical result file, extracts
//! metrics in text mode, ranks the records that carry a latency, and
//! persists a fresh summary artifact. The summary is recomputed from
//! scratch each pass, never incrementally.

use crate::extract::{self, ParsedResult};
use matbench_core::{Error, Result};
use matbench_storage::{ArtifactStore, FileClass, SUMMARY_FILE};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::warn;

/// Ranked view over one corpus scan.
///
/// `total_configurations` counts every file scanned, including files
/// whose parse failed; `successful_runs` counts records with a parsed
/// latency. Latency is the sole ranking key: records without one stay
/// in `all_results` but never appear as best or worst.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusSummary {
    /// Files matching the historical-result convention.
    pub total_configurations: usize,
    /// Records with a parsed latency.
    pub successful_runs: usize,
    /// Lowest-latency record, when any record ranked.
    pub best_performance: Option<ParsedResult>,
    /// Highest-latency record, when any record ranked.
    pub worst_performance: Option<ParsedResult>,
    /// Every successfully parsed record, ranked or not.
    pub all_results: Vec<ParsedResult>,
}

/// Scan all historical result files, rank by ascending latency, and
/// persist the summary artifact (overwriting any prior summary).
///
/// Per-file parse failures are logged and skipped; one bad file never
/// aborts the scan. Returns [`Error::NoData`] when the store holds no
/// historical result files at all.
pub fn analyze_corpus(store: &dyn ArtifactStore) -> Result<CorpusSummary> {
    let names = store.list(FileClass::HistoricalResult)?;
    if names.is_empty() {
        return Err(Error::NoData);
    }

    let mut results = Vec::new();
    for artifact in store.scan(FileClass::HistoricalResult)? {
        match extract::parse_text(&artifact.name, &artifact.contents) {
            Ok(parsed) => results.push(parsed),
            Err(e) => warn!(file = %artifact.name, error = %e, "skipping unparsable result file"),
        }
    }

    let mut ranked: Vec<ParsedResult> = results
        .iter()
        .filter(|r| r.latency_ms.is_some())
        .cloned()
        .collect();
    ranked.sort_by(|a, b| {
        a.latency_ms
            .partial_cmp(&b.latency_ms)
            .unwrap_or(Ordering::Equal)
    });

    let summary = CorpusSummary {
        total_configurations: names.len(),
        successful_runs: ranked.len(),
        best_performance: ranked.first().cloned(),
        worst_performance: ranked.last().cloned(),
        all_results: results,
    };

    store.put(SUMMARY_FILE, &serde_json::to_string_pretty(&summary)?)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matbench_storage::{FsStore, MemoryStore};
    use std::fs;

    #[test]
    fn test_ranking_ascending_by_latency() {
        let store = MemoryStore::new();
        store.put("bench_slow.json", "Time: 10 ms\n").unwrap();
        store.put("bench_fast.json", "Time: 5 ms\n").unwrap();
        store.put("bench_mid.json", "Time: 7 ms\n").unwrap();

        let summary = analyze_corpus(&store).unwrap();
        assert_eq!(summary.successful_runs, 3);
        assert_eq!(
            summary.best_performance.as_ref().unwrap().latency_ms,
            Some(5.0)
        );
        assert_eq!(
            summary.worst_performance.as_ref().unwrap().latency_ms,
            Some(10.0)
        );
    }

    #[test]
    fn test_records_without_latency_are_kept_but_unranked() {
        let store = MemoryStore::new();
        store.put("bench_timed.json", "Time: 5 ms\n").unwrap();
        store.put("bench_untimed.json", "no metrics here\n").unwrap();

        let summary = analyze_corpus(&store).unwrap();
        assert_eq!(summary.total_configurations, 2);
        assert_eq!(summary.successful_runs, 1);
        assert_eq!(summary.all_results.len(), 2);
        assert_eq!(
            summary.best_performance.as_ref().unwrap().file,
            "bench_timed.json"
        );
    }

    #[test]
    fn test_one_bad_file_does_not_block_the_scan() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        store.put("bench_a.json", "Time: 10 ms\n").unwrap();
        store.put("bench_b.json", "Time: 5 ms\n").unwrap();
        // Not valid UTF-8; reading this file fails and the scan skips it.
        fs::write(dir.path().join("bench_c.json"), [0xff, 0xfe, 0x00, 0x01]).unwrap();

        let summary = analyze_corpus(&store).unwrap();
        assert_eq!(summary.total_configurations, 3);
        assert_eq!(summary.successful_runs, 2);
        assert_eq!(
            summary.best_performance.as_ref().unwrap().latency_ms,
            Some(5.0)
        );
        assert_eq!(
            summary.worst_performance.as_ref().unwrap().latency_ms,
            Some(10.0)
        );
        assert!(summary.all_results.iter().all(|r| r.file != "bench_c.json"));
    }

    #[test]
    fn test_empty_store_reports_no_data() {
        let store = MemoryStore::new();
        assert!(analyze_corpus(&store).unwrap_err().is_no_data());
    }

    #[test]
    fn test_summary_is_persisted_and_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        store.put("bench_a.json", "Time: 10 ms\n").unwrap();
        analyze_corpus(&store).unwrap();

        let first = fs::read_to_string(dir.path().join(SUMMARY_FILE)).unwrap();
        let parsed: CorpusSummary = serde_json::from_str(&first).unwrap();
        assert_eq!(parsed.total_configurations, 1);

        store.put("bench_b.json", "Time: 4 ms\n").unwrap();
        analyze_corpus(&store).unwrap();
        let second = fs::read_to_string(dir.path().join(SUMMARY_FILE)).unwrap();
        let parsed: CorpusSummary = serde_json::from_str(&second).unwrap();
        assert_eq!(parsed.total_configurations, 2);
        assert_eq!(
            parsed.best_performance.as_ref().unwrap().latency_ms,
            Some(4.0)
        );
    }
}
