//! Channel-backed collectives between the coordinator and the workers.
//!
//! Each round performs exactly one gather (candidates → coordinator) and
//! one broadcast (winner → all workers). Both run over zero-capacity
//! rendezvous channels, so a send completes only when the peer receives:
//! the pair of collectives is an implicit full barrier and no worker can
//! run ahead of the round. There is deliberately no timeout — a stalled
//! peer blocks the computation, matching the protocol contract.
//!
//! Any transport providing the same distribute/gather/broadcast calls in
//! rank order could replace this module; nothing else in the engine knows
//! about channels.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use shortpath_core::{Dist, Partition, RowBlock};

use crate::error::ClusterError;

/// One round's contender: a worker's best open node and its distance.
///
/// The plain two-field record that crosses the process boundary during
/// the reduction; created fresh each round and discarded after the
/// broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Global node id.
    pub node: usize,
    /// Best known distance to `node`.
    pub distance: Dist,
}

/// Control messages from the coordinator to one worker.
#[derive(Debug, Clone)]
pub(crate) enum Job {
    /// Start one trial: take ownership of a row block and enter the
    /// round loop.
    Run {
        start: usize,
        partition: Partition,
        block: RowBlock,
    },
    /// Input was rejected at the coordinator; skip the round loop and
    /// wait for the next job.
    Abort,
    /// Tear down the worker thread.
    Shutdown,
}

/// Replies from a worker to the coordinator.
#[derive(Debug)]
pub(crate) enum Reply {
    /// This round's local minimum, or `None` if the worker's partition is
    /// fully closed.
    Candidate(Option<Candidate>),
    /// The worker's final local distance slice, sent after the last round.
    Distances(Vec<Dist>),
}

struct Link {
    jobs: Sender<Job>,
    winner: Sender<Candidate>,
    reply: Receiver<Reply>,
}

/// Coordinator-side endpoint: one link per worker, always addressed in
/// rank order.
pub(crate) struct ClusterComm {
    links: Vec<Link>,
}

/// Worker-side endpoint.
pub(crate) struct WorkerComm {
    rank: usize,
    jobs: Receiver<Job>,
    winner: Receiver<Candidate>,
    reply: Sender<Reply>,
}

/// Build the channel fabric for `workers` workers.
pub(crate) fn cluster_channels(workers: usize) -> (ClusterComm, Vec<WorkerComm>) {
    let mut links = Vec::with_capacity(workers);
    let mut endpoints = Vec::with_capacity(workers);
    for rank in 0..workers {
        // Jobs are buffered by one so the coordinator can seed every
        // worker before the first gather; the round-loop channels are
        // rendezvous channels.
        let (job_tx, job_rx) = bounded(1);
        let (winner_tx, winner_rx) = bounded(0);
        let (reply_tx, reply_rx) = bounded(0);
        links.push(Link {
            jobs: job_tx,
            winner: winner_tx,
            reply: reply_rx,
        });
        endpoints.push(WorkerComm {
            rank,
            jobs: job_rx,
            winner: winner_rx,
            reply: reply_tx,
        });
    }
    (ClusterComm { links }, endpoints)
}

impl ClusterComm {
    pub(crate) fn workers(&self) -> usize {
        self.links.len()
    }

    /// Send a job to one worker (the bulk row-transfer boundary).
    pub(crate) fn submit(&self, rank: usize, job: Job) -> Result<(), ClusterError> {
        self.links[rank]
            .jobs
            .send(job)
            .map_err(|_| ClusterError::ChannelClosed { rank })
    }

    /// Send the same control job to every worker, in rank order.
    pub(crate) fn broadcast_job(&self, job: &Job) -> Result<(), ClusterError> {
        for rank in 0..self.links.len() {
            self.submit(rank, job.clone())?;
        }
        Ok(())
    }

    /// Collect one candidate per worker, in rank order. Blocks until
    /// every worker has reached its send — the first half of the round
    /// barrier.
    pub(crate) fn gather_candidates(&self) -> Result<Vec<Option<Candidate>>, ClusterError> {
        let mut candidates = Vec::with_capacity(self.links.len());
        for (rank, link) in self.links.iter().enumerate() {
            match link.reply.recv() {
                Ok(Reply::Candidate(c)) => candidates.push(c),
                Ok(Reply::Distances(_)) => return Err(ClusterError::Protocol { rank }),
                Err(_) => return Err(ClusterError::ChannelClosed { rank }),
            }
        }
        Ok(candidates)
    }

    /// Deliver the round's winner to every worker — the second half of
    /// the round barrier.
    pub(crate) fn broadcast_winner(&self, winner: Candidate) -> Result<(), ClusterError> {
        for (rank, link) in self.links.iter().enumerate() {
            link.winner
                .send(winner)
                .map_err(|_| ClusterError::ChannelClosed { rank })?;
        }
        Ok(())
    }

    /// Gather the final local distance slices, in partition (rank) order.
    pub(crate) fn gather_distances(&self) -> Result<Vec<Vec<Dist>>, ClusterError> {
        let mut slices = Vec::with_capacity(self.links.len());
        for (rank, link) in self.links.iter().enumerate() {
            match link.reply.recv() {
                Ok(Reply::Distances(d)) => slices.push(d),
                Ok(Reply::Candidate(_)) => return Err(ClusterError::Protocol { rank }),
                Err(_) => return Err(ClusterError::ChannelClosed { rank }),
            }
        }
        Ok(slices)
    }
}

impl WorkerComm {
    pub(crate) fn rank(&self) -> usize {
        self.rank
    }

    pub(crate) fn next_job(&self) -> Result<Job, Disconnected> {
        self.jobs.recv().map_err(|_| Disconnected)
    }

    pub(crate) fn send_candidate(&self, c: Option<Candidate>) -> Result<(), Disconnected> {
        self.reply.send(Reply::Candidate(c)).map_err(|_| Disconnected)
    }

    pub(crate) fn recv_winner(&self) -> Result<Candidate, Disconnected> {
        self.winner.recv().map_err(|_| Disconnected)
    }

    pub(crate) fn send_distances(&self, d: Vec<Dist>) -> Result<(), Disconnected> {
        self.reply.send(Reply::Distances(d)).map_err(|_| Disconnected)
    }
}

/// The coordinator went away; the worker thread should wind down.
#[derive(Debug)]
pub(crate) struct Disconnected;
