//! # Shortpath Core
//!
//! The data backbone of the shortpath engine. This crate owns everything
//! that is independent of how workers communicate: the dense weighted
//! graph and its file format, the deterministic row-block partitioning of
//! the node index space, and a serial Dijkstra oracle used to validate the
//! distributed engine.
//!
//! ## Modules
//!
//! - [`graph`] — Dense adjacency matrix, file parsing, row-block slices.
//! - [`partition`] — Contiguous row-block partitioning and the
//!   global ↔ (rank, local offset) coordinate translation.
//! - [`oracle`] — Single-process Dijkstra reference implementation.

pub mod graph;
pub mod oracle;
pub mod partition;

pub use graph::{Dist, Graph, ParseError, RowBlock, INFINITY};
pub use partition::{Partition, PartitionError};
