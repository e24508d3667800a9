//! Batch scenario runner.
//!
//! Runs every scenario in a directory in parallel using rayon and
//! gathers the reports.

use crate::runner::{run_scenario, ScenarioReport};
use crate::scenario::{Scenario, ScenarioError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Configuration for a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Directory holding `*.ron` scenarios
    pub scenario_dir: PathBuf,
    /// Maximum parallel scenarios (0 = use rayon default)
    pub parallel: u32,
}

impl BatchConfig {
    /// Run everything in `scenario_dir` with the default thread count.
    pub fn new(scenario_dir: impl Into<PathBuf>) -> Self {
        Self {
            scenario_dir: scenario_dir.into(),
            parallel: 0,
        }
    }

    /// Cap the number of scenarios run at once.
    #[must_use]
    pub fn with_parallel(mut self, parallel: u32) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Results from a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    /// Configuration used
    pub config: BatchConfig,
    /// Reports of scenarios that ran, in file name order
    pub reports: Vec<ScenarioReport>,
    /// Total runtime
    pub duration_seconds: f64,
    /// Errors encountered
    pub errors: Vec<BatchError>,
}

impl BatchResults {
    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(std::io::Error::other)
    }
}

/// Error during batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchError {
    /// Scenario file
    pub path: PathBuf,
    /// Error message
    pub message: String,
}

/// Scenario files in a directory, sorted by name.
pub fn scenario_files(dir: &Path) -> Result<Vec<PathBuf>, ScenarioError> {
    if !dir.exists() {
        return Err(ScenarioError::FileNotFound(dir.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|e| e == "ron") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn run_file(path: &Path) -> Result<ScenarioReport, ScenarioError> {
    let scenario = Scenario::load(path)?;
    run_scenario(&scenario)
}

/// Run a batch of scenarios
pub fn run_batch(config: BatchConfig) -> Result<BatchResults, ScenarioError> {
    let start = Instant::now();
    let files = scenario_files(&config.scenario_dir)?;

    info!(
        "Starting batch run: {} scenarios from {:?}",
        files.len(),
        config.scenario_dir
    );

    // Configure thread pool if specified
    if config.parallel > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallel as usize)
            .build_global()
            .ok(); // Ignore if already set
    }

    let results: Vec<Result<ScenarioReport, BatchError>> = files
        .par_iter()
        .map(|path| {
            run_file(path).map_err(|e| {
                warn!("Scenario {:?} failed: {}", path, e);
                BatchError {
                    path: path.clone(),
                    message: e.to_string(),
                }
            })
        })
        .collect();

    let (reports, errors): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);
    let reports: Vec<ScenarioReport> = reports.into_iter().filter_map(Result::ok).collect();
    let errors: Vec<BatchError> = errors.into_iter().filter_map(Result::err).collect();

    let duration_seconds = start.elapsed().as_secs_f64();
    info!(
        "Batch complete: {} scenarios in {:.2}s, {} failed",
        reports.len(),
        duration_seconds,
        errors.len()
    );

    Ok(BatchResults {
        config,
        reports,
        duration_seconds,
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"(
        name: "good",
        actors: [(id: 1, kind: Player, position: (0.0, 64.0, 0.0))],
        events: [Move(actor: 1, to: (0.0, 63.0, 0.0), on_ground: true)],
    )"#;

    const BAD: &str = r#"(
        name: "bad",
        events: [Move(actor: 9, to: (0.0, 63.0, 0.0))],
    )"#;

    fn write_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, contents) in files {
            std::fs::write(dir.path().join(name), contents).unwrap();
        }
        dir
    }

    #[test]
    fn test_batch_config_builder() {
        let config = BatchConfig::new("scenarios").with_parallel(2);
        assert_eq!(config.scenario_dir, PathBuf::from("scenarios"));
        assert_eq!(config.parallel, 2);
    }

    #[test]
    fn test_scenario_files_filters_and_sorts() {
        let dir = write_dir(&[("b.ron", GOOD), ("a.ron", GOOD), ("notes.txt", "hi")]);
        let files = scenario_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.ron", "b.ron"]);
    }

    #[test]
    fn test_missing_directory() {
        let err = scenario_files(Path::new("no/such/dir")).unwrap_err();
        assert!(matches!(err, ScenarioError::FileNotFound(_)));
    }

    #[test]
    fn test_run_batch_collects_reports_and_errors() {
        let dir = write_dir(&[("good.ron", GOOD), ("bad.ron", BAD)]);
        let results = run_batch(BatchConfig::new(dir.path())).unwrap();

        assert_eq!(results.reports.len(), 1);
        assert_eq!(results.reports[0].name, "good");
        assert_eq!(results.errors.len(), 1);
        assert!(results.errors[0].path.ends_with("bad.ron"));
    }

    #[test]
    fn test_batch_results_save_load() {
        let dir = write_dir(&[("good.ron", GOOD)]);
        let results = run_batch(BatchConfig::new(dir.path())).unwrap();

        let out = tempfile::tempdir().unwrap();
        let path = out.path().join("nested").join("batch.json");
        results.save(&path).unwrap();

        let loaded = BatchResults::load(&path).unwrap();
        assert_eq!(loaded.reports, results.reports);
    }
}
