//! Row-block partitioning of the node index space across workers.
//!
//! Each worker owns a contiguous block of node rows. The block size is a
//! pure function of `(n, workers)`: every worker gets `round(n / workers)`
//! rows and the last worker absorbs the remainder, so the blocks cover
//! `[0, n)` exactly once with no gaps or overlaps.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors constructing a partition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartitionError {
    #[error("Cannot partition an empty graph")]
    EmptyGraph,

    #[error("Worker count must be at least 1")]
    NoWorkers,

    #[error("Cannot split {nodes} nodes across {workers} workers: every worker needs at least one row")]
    TooManyWorkers { nodes: usize, workers: usize },
}

/// A deterministic contiguous row-block partition of `[0, n)` across a
/// fixed set of workers, plus the global ↔ local coordinate translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    n: usize,
    workers: usize,
    base: usize,
}

impl Partition {
    /// Split `n` node rows across `workers` workers.
    ///
    /// Rejects `n < workers` (rather than degrading to fewer effective
    /// workers) and the small-`n` rounding pathology where
    /// `round(n/workers) × (workers − 1)` already exceeds `n − 1`, which
    /// would leave the last worker with nothing.
    pub fn new(n: usize, workers: usize) -> Result<Self, PartitionError> {
        if n == 0 {
            return Err(PartitionError::EmptyGraph);
        }
        if workers == 0 {
            return Err(PartitionError::NoWorkers);
        }
        let base = (n as f64 / workers as f64).round() as usize;
        if n < workers || base * (workers - 1) >= n {
            return Err(PartitionError::TooManyWorkers { nodes: n, workers });
        }
        Ok(Self { n, workers, base })
    }

    /// Total node count.
    pub fn nodes(&self) -> usize {
        self.n
    }

    /// Number of workers.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Number of rows owned by `rank`.
    pub fn size(&self, rank: usize) -> usize {
        if rank == self.workers - 1 {
            self.n - self.base * (self.workers - 1)
        } else {
            self.base
        }
    }

    /// The global node range owned by `rank`.
    pub fn block(&self, rank: usize) -> Range<usize> {
        let start = self.base * rank;
        start..start + self.size(rank)
    }

    /// The rank that owns global node `node`.
    pub fn owner(&self, node: usize) -> usize {
        // The last block can be larger than `base`, so clamp.
        (node / self.base).min(self.workers - 1)
    }

    /// Offset of `node` within its owner's block.
    pub fn to_local(&self, node: usize) -> usize {
        node - self.base * self.owner(node)
    }

    /// Global node id for `offset` within `rank`'s block.
    pub fn to_global(&self, rank: usize, offset: usize) -> usize {
        self.base * rank + offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_nodes_three_workers() {
        // base = round(7/3) = 2, last worker takes 7 - 2*2 = 3
        let p = Partition::new(7, 3).unwrap();
        assert_eq!([p.size(0), p.size(1), p.size(2)], [2, 2, 3]);
        assert_eq!(p.block(0), 0..2);
        assert_eq!(p.block(1), 2..4);
        assert_eq!(p.block(2), 4..7);
    }

    #[test]
    fn partition_is_pure() {
        let a = Partition::new(101, 7).unwrap();
        let b = Partition::new(101, 7).unwrap();
        assert_eq!(a, b);
        for rank in 0..7 {
            assert_eq!(a.block(rank), b.block(rank));
        }
    }

    #[test]
    fn blocks_cover_without_gaps_or_overlaps() {
        for (n, workers) in [(1, 1), (4, 2), (7, 3), (10, 4), (100, 7), (97, 13)] {
            let p = Partition::new(n, workers).unwrap();
            let mut next = 0;
            for rank in 0..workers {
                let block = p.block(rank);
                assert_eq!(block.start, next, "gap/overlap at rank {rank} for n={n} p={workers}");
                next = block.end;
            }
            assert_eq!(next, n, "blocks must cover [0, {n})");
        }
    }

    #[test]
    fn coordinate_roundtrip_is_identity() {
        let p = Partition::new(23, 5).unwrap();
        for node in 0..23 {
            let rank = p.owner(node);
            let offset = p.to_local(node);
            assert!(p.block(rank).contains(&node));
            assert_eq!(p.to_global(rank, offset), node);
        }
    }

    #[test]
    fn rejects_degenerate_splits() {
        assert_eq!(Partition::new(0, 3), Err(PartitionError::EmptyGraph));
        assert_eq!(Partition::new(5, 0), Err(PartitionError::NoWorkers));
        assert_eq!(
            Partition::new(2, 3),
            Err(PartitionError::TooManyWorkers { nodes: 2, workers: 3 })
        );
        // round(9/6) = 2 and 2*5 > 8: the last worker would own nothing.
        assert_eq!(
            Partition::new(9, 6),
            Err(PartitionError::TooManyWorkers { nodes: 9, workers: 6 })
        );
    }
}
