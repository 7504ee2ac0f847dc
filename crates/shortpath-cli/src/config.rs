//! TOML configuration for engine runs.
//!
//! Externalises what the benchmark would otherwise hardcode: worker
//! count, trial count, and the input/output directories.
//!
//! ```toml
//! [cluster]
//! workers = 4
//! trials = 5
//!
//! [paths]
//! graphs = "graphs"
//! results = "results"
//! ```

use serde::Deserialize;

/// Top-level run configuration.
#[derive(Debug, Default, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub cluster: ClusterConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Cluster shape and validation parameters.
#[derive(Debug, Deserialize)]
pub struct ClusterConfig {
    /// Number of worker threads.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Number of determinism-validation trials per run.
    #[serde(default = "default_trials")]
    pub trials: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            trials: default_trials(),
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(4, |p| p.get())
}

fn default_trials() -> usize {
    5
}

/// Input and output directories.
#[derive(Debug, Deserialize)]
pub struct PathsConfig {
    /// Directory graph filenames are resolved against.
    #[serde(default = "default_graphs_dir")]
    pub graphs: String,
    /// Directory result files are written to.
    #[serde(default = "default_results_dir")]
    pub results: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            graphs: default_graphs_dir(),
            results: default_results_dir(),
        }
    }
}

fn default_graphs_dir() -> String {
    "graphs".into()
}

fn default_results_dir() -> String {
    "results".into()
}

/// Load a TOML configuration file, or the defaults when none is given.
pub fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<JobConfig> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        }
        None => Ok(JobConfig::default()),
    }
}
