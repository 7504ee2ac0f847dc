//! Run driver: load the graph, drive the cluster, write the result file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use shortpath_cluster::{Cluster, ClusterError};
use shortpath_core::Graph;

use crate::config::JobConfig;

/// Execute a full validated run and write the distance file.
///
/// The result file is named `<start>-<graph filename>` inside the results
/// directory, one distance per line in ascending node id; unreachable
/// nodes keep the sentinel value.
pub fn run(
    config: &JobConfig,
    filename: &str,
    start: usize,
    output_override: Option<PathBuf>,
) -> Result<()> {
    let graph_path = Path::new(&config.paths.graphs).join(filename);
    let graph = Graph::load(&graph_path)
        .with_context(|| format!("loading graph from {}", graph_path.display()))?;
    let n = graph.len();
    println!(
        "Graph '{}': {} nodes, {} edges",
        filename,
        n,
        graph.edge_count()
    );

    let cluster = Cluster::new(graph, config.cluster.workers)?;
    info!(
        "running {} trials on {} workers",
        config.cluster.trials, config.cluster.workers
    );

    let outcome = match cluster.run_trials(start, config.cluster.trials) {
        Ok(outcome) => outcome,
        Err(ClusterError::InvalidStartNode { .. }) => {
            // Matches the engine's abort-flag handshake: every worker has
            // already been told to stand down, so exit without computing.
            eprintln!(
                "Please choose a valid start node (i.e. a value between 0 and {}, inclusive)",
                n - 1
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "Average running time over {} trials: {:.1} ms",
        outcome.trials,
        outcome.mean_runtime.as_secs_f64() * 1e3
    );

    let out_dir = output_override.unwrap_or_else(|| PathBuf::from(&config.paths.results));
    let out_path = out_dir.join(format!("{}-{}", start, filename));
    write_distances(&outcome.distances, &out_path)?;
    println!("Distances written to: {}", out_path.display());
    Ok(())
}

/// Parse a graph file and report its shape without running the engine.
pub fn validate(config: &JobConfig, filename: &str) -> Result<()> {
    let graph_path = Path::new(&config.paths.graphs).join(filename);
    let graph = Graph::load(&graph_path)
        .with_context(|| format!("loading graph from {}", graph_path.display()))?;

    println!(
        "Graph '{}' is well-formed: {} nodes, {} edges",
        filename,
        graph.len(),
        graph.edge_count()
    );
    if !is_symmetric(&graph) {
        // The engine relies on symmetry but does not check it at load
        // time, so surface it here where the user asked for a check.
        eprintln!("Warning: weight matrix is not symmetric; distances will follow the row data");
    }
    Ok(())
}

fn is_symmetric(graph: &Graph) -> bool {
    let n = graph.len();
    (0..n).all(|u| (u + 1..n).all(|v| graph.weight(u, v) == graph.weight(v, u)))
}

fn write_distances(distances: &[shortpath_core::Dist], path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    for d in distances {
        writeln!(file, "{}", d)?;
    }
    Ok(())
}
