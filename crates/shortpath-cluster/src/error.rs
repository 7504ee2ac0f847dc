//! Errors originating from the distributed engine.

use shortpath_core::{Dist, PartitionError};
use thiserror::Error;

/// Errors from cluster construction and the round/trial loop.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// The requested start node is outside `[0, nodes)`. Detected once at
    /// the coordinator and broadcast to every worker as an abort flag so
    /// none of them blocks waiting for a round that never starts.
    #[error("start node {start} is out of range; choose a value between 0 and {}, inclusive", .nodes - 1)]
    InvalidStartNode { start: usize, nodes: usize },

    /// A repeated trial produced a different distance vector than the
    /// first. Fatal: signals nondeterminism in the reduction protocol.
    #[error("trial {trial} disagrees with trial 1 at node {node}: expected {expected}, got {actual}")]
    TrialMismatch {
        trial: usize,
        node: usize,
        expected: Dist,
        actual: Dist,
    },

    #[error(transparent)]
    Partition(#[from] PartitionError),

    #[error("at least one trial is required")]
    NoTrials,

    /// A round completed its gather without receiving any candidate,
    /// which cannot happen while open nodes remain.
    #[error("round {round} produced no candidate from any worker")]
    MissingCandidate { round: usize },

    /// A worker's channel disconnected mid-round (the worker died). A
    /// merely *stalled* worker is not detected: the round blocks forever.
    #[error("worker {rank} disconnected mid-round")]
    ChannelClosed { rank: usize },

    /// A worker replied out of phase with the round protocol.
    #[error("worker {rank} sent an out-of-phase reply")]
    Protocol { rank: usize },

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}
