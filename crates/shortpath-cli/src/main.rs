//! Shortpath command-line interface.
//!
//! Compute shortest paths from a start node over a graph file:
//! ```sh
//! shortpath run graph-1000.txt 0
//! shortpath run graph-1000.txt 0 --workers 8 --trials 3
//! shortpath validate graph-1000.txt
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shortpath")]
#[command(about = "Distributed single-source shortest paths over row-partitioned matrices")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the engine and write one distance per node to the results directory.
    Run {
        /// Graph filename, resolved against the configured graphs directory.
        graph: String,
        /// Zero-based start node index.
        start: usize,
        /// Path to a TOML configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of worker threads (overrides config file setting).
        #[arg(short, long)]
        workers: Option<usize>,
        /// Number of validation trials (overrides config file setting).
        #[arg(short, long)]
        trials: Option<usize>,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse a graph file and report its shape without computing.
    Validate {
        /// Graph filename, resolved against the configured graphs directory.
        graph: String,
        /// Path to a TOML configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            graph,
            start,
            config,
            workers,
            trials,
            output,
        } => {
            let mut job = config::load_config(config.as_deref())?;
            if let Some(workers) = workers {
                job.cluster.workers = workers;
            }
            if let Some(trials) = trials {
                job.cluster.trials = trials;
            }
            runner::run(&job, &graph, start, output)
        }
        Commands::Validate { graph, config } => {
            let job = config::load_config(config.as_deref())?;
            runner::validate(&job, &graph)
        }
    }
}
