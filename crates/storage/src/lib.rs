//! Artifact store for benchmark results.
//!
//! The pipeline persists every run as a uniquely timestamped file in a
//! rolling artifact directory. This crate provides the [`ArtifactStore`]
//! capability set (`put`, `list`, `latest`, `scan`) so the pipeline
//! depends on an interface rather than a filesystem convention, plus the
//! directory-backed [`FsStore`] and an in-memory [`MemoryStore`] for
//! tests.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use matbench_core::{Error, Result, RunConfig, RunRecord};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Default artifact directory path.
pub const RESULTS_DIR: &str = "results";

/// Corpus summary file name.
pub const SUMMARY_FILE: &str = "performance_summary.json";

/// Artifact file classes, identified by filename convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// `fastest_run_<ts>.json` — best-run result records.
    FastestRun,
    /// `fastest_config_<ts>.json` — configs paired with best runs.
    FastestConfig,
    /// `bench_*.json` — historical result files, read as text.
    HistoricalResult,
    /// `reproduction_<ts>.json` — reproducer output records.
    Reproduction,
}

impl FileClass {
    /// Filename prefix for this class.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::FastestRun => "fastest_run_",
            Self::FastestConfig => "fastest_config_",
            Self::HistoricalResult => "bench_",
            Self::Reproduction => "reproduction_",
        }
    }

    /// Whether a file name belongs to this class.
    pub fn matches(&self, name: &str) -> bool {
        name.starts_with(self.prefix()) && name.ends_with(".json")
    }
}

/// A stored artifact: file name plus full contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    /// File name within the store (no directory component).
    pub name: String,
    /// Full file contents.
    pub contents: String,
}

/// Store capability set the pipeline components depend on.
///
/// `latest` selects by creation time, never by filename order; equal
/// timestamps tie-break by lexical filename order so selection is
/// deterministic on every platform.
pub trait ArtifactStore {
    /// Persist an artifact, overwriting any existing file of that name.
    fn put(&self, name: &str, contents: &str) -> Result<()>;

    /// File names of a class, in lexical order.
    fn list(&self, class: FileClass) -> Result<Vec<String>>;

    /// The most-recently-created artifact of a class, or `None` when the
    /// class is empty or the store does not exist.
    fn latest(&self, class: FileClass) -> Result<Option<Artifact>>;

    /// All artifacts of a class. Unreadable files are logged and
    /// skipped; one bad file must not block the rest.
    fn scan(&self, class: FileClass) -> Result<Vec<Artifact>>;
}

/// Directory-backed artifact store.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the default `results/` store.
    pub fn default_root() -> Self {
        Self::new(RESULTS_DIR)
    }

    /// Path of the store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of an artifact within the store.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn entries(&self, class: FileClass) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if class.matches(name) && entry.path().is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort();
        Ok(paths)
    }
}

/// Creation time of a file, falling back to modification time on
/// filesystems that do not expose a birth time.
fn created_at(path: &Path) -> SystemTime {
    fs::metadata(path)
        .and_then(|meta| meta.created().or_else(|_| meta.modified()))
        .unwrap_or(UNIX_EPOCH)
}

impl ArtifactStore for FsStore {
    fn put(&self, name: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_of(name), contents)?;
        Ok(())
    }

    fn list(&self, class: FileClass) -> Result<Vec<String>> {
        Ok(self
            .entries(class)?
            .into_iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect())
    }

    fn latest(&self, class: FileClass) -> Result<Option<Artifact>> {
        // Tie-break equal creation times by lexical filename order.
        let newest = self
            .entries(class)?
            .into_iter()
            .max_by_key(|path| (created_at(path), path.clone()));
        let Some(path) = newest else {
            return Ok(None);
        };
        let contents = fs::read_to_string(&path)?;
        Ok(Some(Artifact {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            contents,
        }))
    }

    fn scan(&self, class: FileClass) -> Result<Vec<Artifact>> {
        let mut artifacts = Vec::new();
        for path in self.entries(class)? {
            match fs::read_to_string(&path) {
                Ok(contents) => artifacts.push(Artifact {
                    name: path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    contents,
                }),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable artifact"),
            }
        }
        Ok(artifacts)
    }
}

/// In-memory artifact store for tests.
///
/// Creation order is insertion order, so `latest` returns the last
/// artifact `put` for a class.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RefCell<Vec<(String, String)>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactStore for MemoryStore {
    fn put(&self, name: &str, contents: &str) -> Result<()> {
        let mut files = self.files.borrow_mut();
        files.retain(|(n, _)| n != name);
        files.push((name.to_string(), contents.to_string()));
        Ok(())
    }

    fn list(&self, class: FileClass) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .files
            .borrow()
            .iter()
            .filter(|(n, _)| class.matches(n))
            .map(|(n, _)| n.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    fn latest(&self, class: FileClass) -> Result<Option<Artifact>> {
        Ok(self
            .files
            .borrow()
            .iter()
            .filter(|(n, _)| class.matches(n))
            .next_back()
            .map(|(n, c)| Artifact {
                name: n.clone(),
                contents: c.clone(),
            }))
    }

    fn scan(&self, class: FileClass) -> Result<Vec<Artifact>> {
        Ok(self
            .files
            .borrow()
            .iter()
            .filter(|(n, _)| class.matches(n))
            .map(|(n, c)| Artifact {
                name: n.clone(),
                contents: c.clone(),
            })
            .collect())
    }
}

/// The most recent fastest-run record and its paired configuration.
///
/// Pairing is positional: the most-recent result file belongs with the
/// most-recent config file. Writers keep this true by persisting both
/// files together.
#[derive(Debug, Clone)]
pub struct LatestRun {
    /// The fastest-run result record.
    pub record: RunRecord,
    /// The configuration that produced it.
    pub config: RunConfig,
}

/// Load the most recent fastest-run result/config pair.
///
/// Returns [`Error::NoData`] when either file class is empty or the
/// store directory is absent.
pub fn latest_pair(store: &dyn ArtifactStore) -> Result<LatestRun> {
    let run = store.latest(FileClass::FastestRun)?.ok_or(Error::NoData)?;
    let config = store
        .latest(FileClass::FastestConfig)?
        .ok_or(Error::NoData)?;
    Ok(LatestRun {
        record: serde_json::from_str(&run.contents)?,
        config: serde_json::from_str(&config.contents)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn record_json(latency: f64) -> String {
        serde_json::json!({
            "latency_ms": latency,
            "throughput_gflops": 100.0,
            "workload_info": {"matrix_size": "1024x1024"},
            "correctness": true,
            "max_error": 1e-6,
            "performance_analysis": {
                "speedup_vs_naive": 10.0,
                "blas_speedup": 1.0,
                "parallel_speedup": 2.0,
                "gpu_speedup": 1.5,
                "vectorized_speedup": 3.0
            }
        })
        .to_string()
    }

    fn config_json(features: &str) -> String {
        serde_json::json!({
            "features": features,
            "rustflags": "-C target-cpu=native",
            "timestamp": "2025-01-01T00:00:00Z"
        })
        .to_string()
    }

    #[test]
    fn test_file_class_matching() {
        assert!(FileClass::FastestRun.matches("fastest_run_20250101_120000.json"));
        assert!(!FileClass::FastestRun.matches("fastest_config_20250101_120000.json"));
        assert!(FileClass::HistoricalResult.matches("bench_simd.json"));
        assert!(!FileClass::HistoricalResult.matches("bench_simd.txt"));
    }

    #[test]
    fn test_latest_selects_by_creation_time_not_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());

        // Lexically greatest name written first; creation time must win.
        store
            .put("fastest_run_zzz.json", &record_json(50.0))
            .unwrap();
        sleep(Duration::from_millis(20));
        store
            .put("fastest_run_aaa.json", &record_json(10.0))
            .unwrap();

        let latest = store.latest(FileClass::FastestRun).unwrap().unwrap();
        assert_eq!(latest.name, "fastest_run_aaa.json");
    }

    #[test]
    fn test_latest_on_missing_directory_is_none() {
        let store = FsStore::new("/nonexistent/matbench-results");
        assert!(store.latest(FileClass::FastestRun).unwrap().is_none());
        assert!(store.scan(FileClass::HistoricalResult).unwrap().is_empty());
    }

    #[test]
    fn test_put_overwrites_and_list_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        store.put("bench_b.json", "two").unwrap();
        store.put("bench_a.json", "one").unwrap();
        store.put("bench_b.json", "three").unwrap();

        assert_eq!(
            store.list(FileClass::HistoricalResult).unwrap(),
            vec!["bench_a.json", "bench_b.json"]
        );
        let scanned = store.scan(FileClass::HistoricalResult).unwrap();
        assert_eq!(scanned[1].contents, "three");
    }

    #[test]
    fn test_latest_pair_returns_newest_of_each_class() {
        let store = MemoryStore::new();
        store
            .put("fastest_run_20250101_000000.json", &record_json(20.0))
            .unwrap();
        store
            .put("fastest_config_20250101_000000.json", &config_json("base"))
            .unwrap();
        store
            .put("fastest_run_20250102_000000.json", &record_json(8.0))
            .unwrap();
        store
            .put("fastest_config_20250102_000000.json", &config_json("simd"))
            .unwrap();

        let latest = latest_pair(&store).unwrap();
        assert_eq!(latest.record.latency_ms, 8.0);
        assert_eq!(latest.config.features, "simd");
    }

    #[test]
    fn test_latest_pair_requires_both_classes() {
        let store = MemoryStore::new();
        store
            .put("fastest_run_20250101_000000.json", &record_json(20.0))
            .unwrap();
        let err = latest_pair(&store).unwrap_err();
        assert!(err.is_no_data());
    }

    #[test]
    fn test_latest_pair_empty_store_is_no_data() {
        let store = MemoryStore::new();
        assert!(latest_pair(&store).unwrap_err().is_no_data());
    }
}
