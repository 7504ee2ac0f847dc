//! Worker side of the engine: frontier selection and relaxation over one
//! owned row block.
//!
//! A worker holds only its own rows of the adjacency matrix (full column
//! width), its slice of the distance vector, and a full closed bitset.
//! Because the matrix is symmetric, the weight from any owned node to the
//! round's winner is already present in the owner's own row data, so
//! relaxation never reads foreign state.

use shortpath_core::{Dist, Partition, RowBlock, INFINITY};

use crate::comm::{Candidate, Disconnected, Job, WorkerComm};

/// Worker thread entry point: service jobs until shutdown.
///
/// A [`Job::Abort`] carries the coordinator's "invalid input" decision;
/// the worker acknowledges it simply by not entering the round loop. If
/// the coordinator disconnects mid-trial the worker winds down quietly.
pub(crate) fn run_worker(comm: WorkerComm) {
    while let Ok(job) = comm.next_job() {
        match job {
            Job::Run {
                start,
                partition,
                block,
            } => {
                if run_trial(&comm, start, &partition, &block).is_err() {
                    return;
                }
            }
            Job::Abort => continue,
            Job::Shutdown => return,
        }
    }
}

/// One full trial: `n` rounds of select → exchange → relax, then ship the
/// local distance slice back.
fn run_trial(
    comm: &WorkerComm,
    start: usize,
    partition: &Partition,
    block: &RowBlock,
) -> Result<(), Disconnected> {
    let rank = comm.rank();
    let n = partition.nodes();

    let mut dist = vec![INFINITY; partition.size(rank)];
    let mut closed = vec![false; n];
    if partition.block(rank).contains(&start) {
        dist[partition.to_local(start)] = 0;
    }

    for _ in 0..n {
        let candidate = local_candidate(partition, rank, &dist, &closed);
        comm.send_candidate(candidate)?;
        let winner = comm.recv_winner()?;
        closed[winner.node] = true;
        relax(block, partition, rank, winner, &mut dist, &closed);
    }

    comm.send_distances(dist)
}

/// Scan the local distance slice for the minimum-distance open node.
///
/// Returns `None` once every locally-owned node is closed, so an
/// exhausted worker can never win the reduction. Strict `<` keeps the
/// first (lowest local offset) node on ties.
pub(crate) fn local_candidate(
    partition: &Partition,
    rank: usize,
    dist: &[Dist],
    closed: &[bool],
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for (offset, &d) in dist.iter().enumerate() {
        let node = partition.to_global(rank, offset);
        if closed[node] {
            continue;
        }
        match best {
            None => best = Some(Candidate { node, distance: d }),
            Some(b) if d < b.distance => best = Some(Candidate { node, distance: d }),
            _ => {}
        }
    }
    best
}

/// Relax every open locally-owned node against the round's winner.
///
/// Uses the symmetry of the weight matrix: the weight from owned node `g`
/// to the winner is read from `g`'s own row at the winner's column.
/// `saturating_add` keeps an unreachable winner's sentinel distance from
/// wrapping.
pub(crate) fn relax(
    block: &RowBlock,
    partition: &Partition,
    rank: usize,
    winner: Candidate,
    dist: &mut [Dist],
    closed: &[bool],
) {
    for (offset, d) in dist.iter_mut().enumerate() {
        let node = partition.to_global(rank, offset);
        if closed[node] {
            continue;
        }
        let w = block.weight(offset, winner.node);
        if w != 0 {
            *d = (*d).min(winner.distance.saturating_add(w));
        }
    }
}
