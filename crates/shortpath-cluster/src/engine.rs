//! Coordinator side of the engine: row distribution, the global-minimum
//! reduction, termination, multi-trial validation, and result gathering.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info};
use shortpath_core::{Dist, Graph, Partition};

use crate::comm::{cluster_channels, Candidate, ClusterComm, Job};
use crate::error::ClusterError;
use crate::worker;

/// A running set of workers bound to one graph.
///
/// The graph stays resident at the coordinator; each trial ships fresh
/// row blocks to the workers, drives the round loop, and gathers the
/// final distance slices. Workers persist across trials and are torn
/// down on drop.
pub struct Cluster {
    graph: Graph,
    partition: Partition,
    comm: ClusterComm,
    handles: Vec<JoinHandle<()>>,
}

/// Outcome of a validated multi-trial run.
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    /// The canonical distance vector (from trial 1, confirmed by all
    /// later trials).
    pub distances: Vec<Dist>,
    /// Number of trials executed.
    pub trials: usize,
    /// Rounds the coordinator actually executed per trial; a full run
    /// performs exactly one round per node.
    pub rounds_per_trial: usize,
    /// Mean wall-clock time of one trial.
    pub mean_runtime: Duration,
}

impl Cluster {
    /// Partition the graph and spawn one worker thread per block.
    pub fn new(graph: Graph, workers: usize) -> Result<Self, ClusterError> {
        let partition = Partition::new(graph.len(), workers)?;
        let (comm, endpoints) = cluster_channels(workers);

        let mut handles = Vec::with_capacity(workers);
        for endpoint in endpoints {
            let handle = thread::Builder::new()
                .name(format!("shortpath-worker-{}", endpoint.rank()))
                .spawn(move || worker::run_worker(endpoint))?;
            handles.push(handle);
        }

        debug!(
            "cluster up: {} nodes across {} workers (base block {})",
            partition.nodes(),
            workers,
            partition.size(0)
        );

        Ok(Self {
            graph,
            partition,
            comm,
            handles,
        })
    }

    /// The partition in force for this cluster.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Run a single trial: distribute rows, drive `n` rounds, gather the
    /// distance vector.
    ///
    /// An out-of-range start node is detected here, before any round
    /// runs, and announced to every worker as an abort flag so none of
    /// them blocks in a half-started round.
    pub fn run(&self, start: usize) -> Result<Vec<Dist>, ClusterError> {
        self.run_counted(start).map(|(distances, _)| distances)
    }

    /// Like [`Cluster::run`], also reporting the number of rounds the
    /// loop actually executed (one per gather/reduce/broadcast cycle).
    fn run_counted(&self, start: usize) -> Result<(Vec<Dist>, usize), ClusterError> {
        let n = self.partition.nodes();
        if start >= n {
            self.comm.broadcast_job(&Job::Abort)?;
            return Err(ClusterError::InvalidStartNode { start, nodes: n });
        }

        // Distribute: worker i gets its owned rows at its block offset.
        for rank in 0..self.comm.workers() {
            let block = self.partition.block(rank);
            self.comm.submit(
                rank,
                Job::Run {
                    start,
                    partition: self.partition,
                    block: self.graph.row_block(block.start, block.len()),
                },
            )?;
        }

        // Round loop: each round closes exactly one node, so exactly n
        // rounds close them all.
        let mut rounds = 0;
        while rounds < n {
            let candidates = self.comm.gather_candidates()?;
            let winner = reduce_candidates(&candidates)
                .ok_or(ClusterError::MissingCandidate { round: rounds })?;
            self.comm.broadcast_winner(winner)?;
            rounds += 1;
        }

        // Aggregate: concatenating slices in rank order reassembles the
        // global vector because blocks are contiguous and ascending.
        let mut distances = Vec::with_capacity(n);
        for slice in self.comm.gather_distances()? {
            distances.extend_from_slice(&slice);
        }
        debug!(
            "trial complete: {} rounds, {} distances",
            rounds,
            distances.len()
        );
        Ok((distances, rounds))
    }

    /// Run `trials` identical trials and cross-check them for
    /// determinism.
    ///
    /// The first trial's vector is canonical; any later trial that
    /// disagrees aborts the loop with [`ClusterError::TrialMismatch`]
    /// rather than reporting a partially-valid result.
    pub fn run_trials(&self, start: usize, trials: usize) -> Result<TrialOutcome, ClusterError> {
        if trials == 0 {
            return Err(ClusterError::NoTrials);
        }

        let t0 = Instant::now();
        let (canonical, rounds) = self.run_counted(start)?;
        let mut elapsed = t0.elapsed();
        info!("trial 1/{} finished in {:.1} ms", trials, elapsed.as_secs_f64() * 1e3);

        for trial in 2..=trials {
            let t0 = Instant::now();
            let distances = self.run(start)?;
            let trial_time = t0.elapsed();
            elapsed += trial_time;
            info!(
                "trial {}/{} finished in {:.1} ms",
                trial,
                trials,
                trial_time.as_secs_f64() * 1e3
            );

            for (node, (&expected, &actual)) in canonical.iter().zip(&distances).enumerate() {
                if expected != actual {
                    return Err(ClusterError::TrialMismatch {
                        trial,
                        node,
                        expected,
                        actual,
                    });
                }
            }
        }

        Ok(TrialOutcome {
            rounds_per_trial: rounds,
            distances: canonical,
            trials,
            mean_runtime: elapsed / trials as u32,
        })
    }
}

impl Drop for Cluster {
    fn drop(&mut self) {
        // Workers may already be gone; nothing useful to report here.
        let _ = self.comm.broadcast_job(&Job::Shutdown);
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

/// Reduce the gathered candidates to the round's winner.
///
/// Scans in rank order with strict `<`, keeping the first minimum seen:
/// ties resolve to the lowest-rank worker, and within a worker to its
/// lowest-offset node (the selector's own scan order). Workers with a
/// fully closed partition contribute `None` and are skipped.
pub(crate) fn reduce_candidates(candidates: &[Option<Candidate>]) -> Option<Candidate> {
    let mut winner: Option<Candidate> = None;
    for c in candidates.iter().flatten() {
        match winner {
            None => winner = Some(*c),
            Some(w) if c.distance < w.distance => winner = Some(*c),
            _ => {}
        }
    }
    winner
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortpath_core::INFINITY;

    #[test]
    fn reduce_picks_global_minimum() {
        let candidates = vec![
            Some(Candidate { node: 0, distance: 9 }),
            Some(Candidate { node: 4, distance: 2 }),
            Some(Candidate { node: 7, distance: 5 }),
        ];
        assert_eq!(
            reduce_candidates(&candidates),
            Some(Candidate { node: 4, distance: 2 })
        );
    }

    #[test]
    fn equal_candidates_resolve_to_lowest_rank() {
        // Two workers propose the same distance: the lower rank's node
        // must win, deterministically.
        let candidates = vec![
            Some(Candidate { node: 5, distance: 3 }),
            Some(Candidate { node: 2, distance: 3 }),
        ];
        assert_eq!(
            reduce_candidates(&candidates),
            Some(Candidate { node: 5, distance: 3 })
        );
    }

    #[test]
    fn exhausted_workers_are_skipped() {
        let candidates = vec![
            None,
            Some(Candidate { node: 3, distance: INFINITY }),
            None,
        ];
        assert_eq!(
            reduce_candidates(&candidates),
            Some(Candidate { node: 3, distance: INFINITY })
        );
    }

    #[test]
    fn all_exhausted_yields_none() {
        assert_eq!(reduce_candidates(&[None, None]), None);
    }
}
