//! Dense weighted graph storage and the plain-text matrix file format.
//!
//! The on-disk format is:
//! ```text
//! <node count N>
//! <w(0,0)> <w(0,1)> ... <w(0,N-1)>
//! ...
//! <w(N-1,0)> ... <w(N-1,N-1)>
//! ```
//!
//! Weights are non-negative integers; `0` encodes "no edge". The matrix is
//! expected to be symmetric (undirected graph) but symmetry is not
//! validated — the relaxation step relies on it, so an asymmetric input
//! produces whatever distances the row data implies.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Best-known distance to a node.
pub type Dist = u32;

/// Sentinel distance for a node that has not been reached.
///
/// Relaxation always goes through [`Dist::saturating_add`], so the
/// sentinel survives arithmetic instead of wrapping.
pub const INFINITY: Dist = Dist::MAX;

/// Errors during graph file parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    FormatError { line: usize, message: String },
}

/// An immutable weighted graph over `n` nodes, stored as a flat
/// row-major `n × n` weight matrix.
///
/// All 2D access goes through [`Graph::weight`] and [`Graph::row`] so the
/// `row * n + col` arithmetic lives in exactly one place.
#[derive(Debug, Clone)]
pub struct Graph {
    n: usize,
    weights: Vec<Dist>,
}

impl Graph {
    /// Create a graph with `n` nodes and no edges.
    pub fn empty(n: usize) -> Self {
        Self {
            n,
            weights: vec![0; n * n],
        }
    }

    /// Build a graph directly from a flat row-major weight matrix.
    pub fn from_weights(n: usize, weights: Vec<Dist>) -> Result<Self, ParseError> {
        if weights.len() != n * n {
            return Err(ParseError::FormatError {
                line: 1,
                message: format!("expected {} weights for n={}, got {}", n * n, n, weights.len()),
            });
        }
        Ok(Self { n, weights })
    }

    /// Parse a graph from the plain-text matrix format.
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut lines = content.lines().enumerate();

        let (_, header) = lines.next().ok_or(ParseError::FormatError {
            line: 1,
            message: "empty file".into(),
        })?;
        let n: usize = header.trim().parse().map_err(|_| ParseError::FormatError {
            line: 1,
            message: format!("first line must be the node count, got '{}'", header.trim()),
        })?;

        let mut weights = Vec::with_capacity(n * n);
        let mut rows_read = 0;
        for (idx, line) in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if rows_read == n {
                return Err(ParseError::FormatError {
                    line: idx + 1,
                    message: format!("expected {} matrix rows but found more data", n),
                });
            }
            let mut cols = 0;
            for token in line.split_whitespace() {
                let w: Dist = token.parse().map_err(|_| ParseError::FormatError {
                    line: idx + 1,
                    message: format!("invalid weight '{}'", token),
                })?;
                weights.push(w);
                cols += 1;
            }
            if cols != n {
                return Err(ParseError::FormatError {
                    line: idx + 1,
                    message: format!("expected {} columns, got {}", n, cols),
                });
            }
            rows_read += 1;
        }

        if rows_read != n {
            return Err(ParseError::FormatError {
                line: 1,
                message: format!("header says {} rows but found {}", n, rows_read),
            });
        }

        Ok(Self { n, weights })
    }

    /// Load a graph from a file on disk.
    pub fn load(path: &std::path::Path) -> Result<Self, ParseError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.n
    }

    /// True if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Edge weight between `u` and `v` (0 = no edge).
    pub fn weight(&self, u: usize, v: usize) -> Dist {
        self.weights[u * self.n + v]
    }

    /// The full row of weights out of node `u`.
    pub fn row(&self, u: usize) -> &[Dist] {
        &self.weights[u * self.n..(u + 1) * self.n]
    }

    /// Insert an undirected edge (writes both triangle entries).
    pub fn add_edge(&mut self, u: usize, v: usize, w: Dist) {
        self.weights[u * self.n + v] = w;
        self.weights[v * self.n + u] = w;
    }

    /// Number of undirected edges (counts each symmetric pair once).
    pub fn edge_count(&self) -> usize {
        let mut count = 0;
        for u in 0..self.n {
            for v in (u + 1)..self.n {
                if self.weight(u, v) != 0 {
                    count += 1;
                }
            }
        }
        count
    }

    /// Copy out a contiguous block of rows `[offset, offset + rows)` with
    /// full column width — the unit of the bulk row-transfer boundary.
    pub fn row_block(&self, offset: usize, rows: usize) -> RowBlock {
        RowBlock {
            offset,
            width: self.n,
            data: self.weights[offset * self.n..(offset + rows) * self.n].to_vec(),
        }
    }
}

/// A worker's owned slice of the adjacency matrix: `rows` contiguous rows
/// starting at global row `offset`, each of full width `width`.
///
/// Workers only ever read their own block; weights to nodes outside the
/// partition come from the block's own rows via the symmetry of the
/// matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowBlock {
    offset: usize,
    width: usize,
    data: Vec<Dist>,
}

impl RowBlock {
    /// Global index of the first owned row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of owned rows.
    pub fn rows(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.data.len() / self.width
        }
    }

    /// Column count (the global node count).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Weight from the `local_row`-th owned node to global node `col`.
    pub fn weight(&self, local_row: usize, col: usize) -> Dist {
        self.data[local_row * self.width + col]
    }
}
