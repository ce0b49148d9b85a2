// Copyright 2025 Matbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Metric extraction, reproduction, and corpus ranking.
//!
//! This crate holds the pipeline stages between the artifact store and
//! the CLI:
//!
//! - [`extract`] - structured and best-effort text metric extraction
//! - [`reproduce`] - environment-pinned replay of a recorded config
//! - [`analyze`] - corpus scan, latency ranking, summary persistence
//! - [`report`] - human-readable report rendering

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analyze;
pub mod extract;
pub mod report;
pub mod reproduce;

pub use analyze::{analyze_corpus, CorpusSummary};
pub use extract::{parse_structured, parse_text, ParsedResult};
pub use reproduce::Reproducer;
