// Copyright 2025 Matbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Environment-pinned replay of a recorded benchmark configuration.
//!
//! The reproducer rebuilds and re-runs the external benchmark exactly as
//! the recorded [`RunConfig`] describes: the current process environment
//! with a single `RUSTFLAGS` override, a release build scoped to the
//! config's feature selection, then the benchmark binary with pinned
//! warm-up and measured iteration counts. Each step blocks until the
//! external process exits; no timeout is enforced here.

use crate::extract;
use matbench_core::{Error, Result, RunConfig, RunRecord};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;
use tracing::info;

/// Warm-up iterations requested from the external benchmark.
pub const WARMUP_RUNS: u32 = 5;

/// Measured iterations requested from the external benchmark.
pub const BENCH_RUNS: u32 = 10;

/// Replays a [`RunConfig`] against the external benchmark.
///
/// Never mutates existing artifacts: every invocation yields a brand-new
/// [`RunRecord`] or an error, never a partial record.
#[derive(Debug, Clone)]
pub struct Reproducer {
    program: OsString,
    workdir: Option<PathBuf>,
}

impl Default for Reproducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reproducer {
    /// Reproducer invoking the standard `cargo` toolchain.
    pub fn new() -> Self {
        Self {
            program: OsString::from("cargo"),
            workdir: None,
        }
    }

    /// Override the invoked program. Test seam only.
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Run the external build and benchmark in the given directory.
    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    /// Release build scoped to the config's feature selection, with the
    /// `RUSTFLAGS` override applied and build chatter suppressed.
    pub fn build_command(&self, config: &RunConfig) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["build", "--release", "--features", &config.features, "--quiet"]);
        cmd.env("RUSTFLAGS", &config.rustflags);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Benchmark invocation with the pinned iteration counts.
    pub fn run_command(&self, config: &RunConfig) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["run", "--release", "--features", &config.features, "--quiet", "--"]);
        cmd.arg("--warmup-runs").arg(WARMUP_RUNS.to_string());
        cmd.arg("--bench-runs").arg(BENCH_RUNS.to_string());
        cmd.env("RUSTFLAGS", &config.rustflags);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Rebuild and re-run the benchmark, returning its structured output
    /// as a new [`RunRecord`].
    ///
    /// A non-zero exit from either step aborts with the captured stderr;
    /// the run step is never attempted after a failed build.
    pub fn reproduce(&self, config: &RunConfig) -> Result<RunRecord> {
        info!(features = %config.features, rustflags = %config.rustflags, "rebuilding benchmark");
        let built = self.build_command(config).output()?;
        if !built.status.success() {
            return Err(Error::BuildFailed {
                stderr: String::from_utf8_lossy(&built.stderr).into_owned(),
            });
        }

        info!(warmup = WARMUP_RUNS, measured = BENCH_RUNS, "running benchmark");
        let ran = self.run_command(config).output()?;
        if !ran.status.success() {
            return Err(Error::BenchFailed {
                stderr: String::from_utf8_lossy(&ran.stderr).into_owned(),
            });
        }

        extract::parse_structured(&String::from_utf8_lossy(&ran.stdout))
    }
}
