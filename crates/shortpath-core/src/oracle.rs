//! Serial Dijkstra reference implementation.
//!
//! Linear-scan Dijkstra over the dense matrix, used as the oracle the
//! distributed engine is validated against. Not a performance path.

use crate::graph::{Dist, Graph, INFINITY};

/// Shortest distances from `start` to every node.
///
/// Unreachable nodes keep the [`INFINITY`] sentinel. Panics are impossible
/// for `start < graph.len()`; callers are expected to validate the start
/// node first.
pub fn shortest_paths(graph: &Graph, start: usize) -> Vec<Dist> {
    let n = graph.len();
    let mut dist = vec![INFINITY; n];
    let mut closed = vec![false; n];
    dist[start] = 0;

    for _ in 0..n {
        // Pick the open node with the smallest distance. Strict `<` keeps
        // the lowest-index node on ties, matching the distributed scan.
        let mut winner = None;
        for v in 0..n {
            if closed[v] {
                continue;
            }
            match winner {
                None => winner = Some(v),
                Some(w) if dist[v] < dist[w] => winner = Some(v),
                _ => {}
            }
        }
        let Some(u) = winner else { break };
        closed[u] = true;

        for v in 0..n {
            let w = graph.weight(u, v);
            if w != 0 && !closed[v] {
                dist[v] = dist[v].min(dist[u].saturating_add(w));
            }
        }
    }

    dist
}
