//! # Shortpath Cluster
//!
//! The distributed single-source shortest-path engine. The adjacency
//! matrix is split into contiguous row blocks across a fixed set of
//! worker threads that communicate exclusively by message passing; the
//! coordinating thread drives a strictly round-synchronous loop:
//!
//! 1. every worker proposes its best open `(node, distance)` candidate,
//! 2. the coordinator reduces the candidates to one global winner and
//!    broadcasts it back,
//! 3. every worker relaxes its own rows against the winner.
//!
//! Each round closes exactly one node, so a full run is exactly `n`
//! rounds. The whole run is repeated for several trials and the outputs
//! compared elementwise; any disagreement is a fatal consistency failure.
//!
//! ## Modules
//!
//! - [`comm`] — Candidate wire record and the channel-backed
//!   gather/broadcast collectives.
//! - [`worker`] — Per-worker round loop: frontier selection + relaxation.
//! - [`engine`] — Coordinator: distribution, reduction, termination,
//!   multi-trial validation, result aggregation.
//! - [`error`] — Engine error taxonomy.

pub mod comm;
pub mod engine;
pub mod error;
pub mod worker;

pub use comm::Candidate;
pub use engine::{Cluster, TrialOutcome};
pub use error::ClusterError;
