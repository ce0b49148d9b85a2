// Copyright 2025 Matbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Metric extraction.
//!
//! Two modes, because the two callers consume different output shapes.
//! Structured mode deserializes the benchmark's stdout directly into a
//! [`RunRecord`]; any failure there is a hard failure of the
//! reproduction attempt. Text mode is a best-effort pass over historical
//! result files: a metadata block split plus an ordered latency pattern
//! table.

use matbench_core::{Error, Result, RunRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header line delimiting the metadata block in historical result files.
pub const METADATA_HEADER: &str = "=== BENCHMARK METADATA ===";

/// Latency patterns in priority order.
///
/// The first pattern with a match anywhere in the text wins and its
/// first match is taken; later patterns are never consulted once an
/// earlier one matches. This earliest-wins rule is deliberate policy,
/// not incidental list order, and is pinned by a test.
pub const LATENCY_PATTERN_SOURCES: [&str; 4] = [
    r"Time:\s*(\d+\.?\d*)\s*ms",
    r"Elapsed:\s*(\d+\.?\d*)\s*ms",
    r"Duration:\s*(\d+\.?\d*)\s*ms",
    r"(\d+\.?\d*)\s*ms",
];

static LATENCY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    LATENCY_PATTERN_SOURCES
        .iter()
        .map(|p| Regex::new(p).expect("latency pattern compiles"))
        .collect()
});

static GFLOPS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+\.?\d*)\s*GFLOPS").expect("gflops pattern compiles"));

/// Best-effort extraction result for one historical file.
///
/// A record without a parsed latency stays in the raw result set but is
/// excluded from ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResult {
    /// Source file name within the artifact store.
    pub file: String,
    /// Trimmed key/value pairs from the metadata block.
    pub metadata: BTreeMap<String, String>,
    /// Latency in milliseconds, when any latency pattern matched.
    pub latency_ms: Option<f64>,
    /// Throughput in GFLOPS, when the throughput pattern matched.
    pub gflops: Option<f64>,
    /// Full file contents, retained for the summary artifact.
    pub raw_output: String,
}

/// Deserialize the benchmark's stdout as one structured [`RunRecord`].
pub fn parse_structured(stdout: &str) -> Result<RunRecord> {
    Ok(serde_json::from_str(stdout)?)
}

/// Best-effort text extraction over a historical result file.
pub fn parse_text(file: &str, content: &str) -> Result<ParsedResult> {
    Ok(ParsedResult {
        file: file.to_string(),
        metadata: parse_metadata(content),
        latency_ms: match_latency(file, content)?,
        gflops: match_gflops(file, content)?,
        raw_output: content.to_string(),
    })
}

/// Split the metadata block into trimmed colon-separated pairs.
///
/// Everything after the header line is considered; lines without a colon
/// are ignored. Absent header yields an empty map.
fn parse_metadata(content: &str) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    let Some(idx) = content.find(METADATA_HEADER) else {
        return metadata;
    };
    let section = &content[idx + METADATA_HEADER.len()..];
    for line in section.trim().lines() {
        if let Some((key, value)) = line.split_once(':') {
            metadata.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    metadata
}

fn match_latency(file: &str, content: &str) -> Result<Option<f64>> {
    for pattern in LATENCY_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(content) {
            let value = caps[1]
                .parse::<f64>()
                .map_err(|e| Error::Parse(format!("{file}: bad latency value: {e}")))?;
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn match_gflops(file: &str, content: &str) -> Result<Option<f64>> {
    match GFLOPS_PATTERN.captures(content) {
        Some(caps) => {
            let value = caps[1]
                .parse::<f64>()
                .map_err(|e| Error::Parse(format!("{file}: bad throughput value: {e}")))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}
