// Copyright 2025 Matbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Canonical benchmark record types for matbench.
//!
//! This crate provides the record shapes shared by every stage of the
//! capture/reproduction pipeline:
//!
//! - [`record`] - the `RunRecord` and `RunConfig` artifact shapes
//! - [`diff`] - reproduction fidelity comparison
//! - [`error`] - the shared error taxonomy

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod diff;
pub mod error;
pub mod record;

pub use diff::ReproductionDiff;
pub use error::{Error, Result};
pub use record::{PerformanceAnalysis, RunConfig, RunRecord, WorkloadInfo};
