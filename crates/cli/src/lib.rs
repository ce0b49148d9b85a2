//! CLI for the matbench result pipeline.
//!
//! One optional positional mode argument selects the pipeline path:
//! `reproduce` replays the pinned configuration and reports the latency
//! diff, `analyze` runs the corpus ranking pass, and the default prints
//! the latest fastest-run summary.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use chrono::Utc;
use clap::{Parser, ValueEnum};
use matbench_analysis::{analyze_corpus, report, Reproducer};
use matbench_core::Error;
use matbench_storage::{latest_pair, ArtifactStore, FileClass, FsStore, LatestRun, SUMMARY_FILE};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Matbench CLI.
#[derive(Parser, Debug)]
#[command(name = "matbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pipeline mode. Defaults to printing the latest-run summary.
    #[arg(value_enum)]
    pub mode: Option<Mode>,
}

/// Available pipeline modes.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Replay the pinned fastest-run configuration and diff the result.
    Reproduce,
    /// Scan all historical result files and write the ranked summary.
    Analyze,
}

/// Run the CLI with the given arguments.
///
/// Exits with status 1 only when no prior fastest-run artifacts exist;
/// reproduction failures are reported as text with status 0.
pub fn run() -> anyhow::Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();
    let store = FsStore::default_root();

    match cli.mode {
        None => summary_mode(&store),
        Some(Mode::Reproduce) => reproduce_mode(&store, &Reproducer::new()),
        Some(Mode::Analyze) => analyze_mode(&store),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("MATBENCH_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the latest result/config pair, or report the missing-data
/// condition that maps to exit status 1.
fn load_latest(store: &FsStore) -> anyhow::Result<Result<LatestRun, ExitCode>> {
    match latest_pair(store) {
        Ok(latest) => Ok(Ok(latest)),
        Err(e) if e.is_no_data() => {
            println!("No fastest results found. Run benchmark_fastest.sh first.");
            Ok(Err(ExitCode::from(1)))
        }
        Err(e) => Err(e.into()),
    }
}

fn summary_mode(store: &FsStore) -> anyhow::Result<ExitCode> {
    let latest = match load_latest(store)? {
        Ok(latest) => latest,
        Err(code) => return Ok(code),
    };
    print!("{}", report::latest_summary(&latest));
    Ok(ExitCode::SUCCESS)
}

/// Reproduction artifact name for the given timestamp, suffixed with a
/// counter when a file of that name already exists. Two reproductions
/// completing within the same second must never share a file.
fn reproduction_name(store: &dyn ArtifactStore, stamp: &str) -> matbench_core::Result<String> {
    let existing = store.list(FileClass::Reproduction)?;
    let base = format!("reproduction_{stamp}.json");
    if !existing.contains(&base) {
        return Ok(base);
    }
    let mut n = 1;
    loop {
        let candidate = format!("reproduction_{stamp}_{n}.json");
        if !existing.contains(&candidate) {
            return Ok(candidate);
        }
        n += 1;
    }
}

fn reproduce_mode(store: &FsStore, reproducer: &Reproducer) -> anyhow::Result<ExitCode> {
    let latest = match load_latest(store)? {
        Ok(latest) => latest,
        Err(code) => return Ok(code),
    };

    println!("Reproducing fastest benchmark...");
    print!("{}", report::reproduce_banner(&latest.config));

    match reproducer.reproduce(&latest.config) {
        Ok(reproduced) => {
            println!();
            print!("{}", report::reproduction_report(&latest.record, &reproduced));

            let stamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
            let name = reproduction_name(store, &stamp)?;
            store.put(&name, &serde_json::to_string_pretty(&reproduced)?)?;
            println!("Reproduction saved: {}", store.path_of(&name).display());
        }
        Err(Error::BuildFailed { stderr }) => println!("Build failed: {stderr}"),
        Err(Error::BenchFailed { stderr }) => println!("Benchmark failed: {stderr}"),
        Err(e) => println!("Reproduction failed: {e}"),
    }

    // Reproduction failure is reported above without changing the exit
    // status in this branch.
    Ok(ExitCode::SUCCESS)
}

fn analyze_mode(store: &FsStore) -> anyhow::Result<ExitCode> {
    match analyze_corpus(store) {
        Ok(summary) => {
            print!("{}", report::corpus_report(&summary));
            println!();
            println!(
                "Detailed results saved to: {}",
                store.path_of(SUMMARY_FILE).display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_no_data() => {
            println!("No benchmark results found!");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Err(e.into()),
    }
}
