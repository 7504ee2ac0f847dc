//! File format → partition → oracle pipeline checks.

use shortpath_core::{oracle, Graph, Partition, INFINITY};

const TRIANGLE_PLUS_ISOLATE: &str = "\
4
0 3 1 0
3 0 1 0
1 1 0 0
0 0 0 0
";

#[test]
fn parsed_graph_runs_through_the_oracle() {
    let graph = Graph::parse(TRIANGLE_PLUS_ISOLATE).unwrap();
    assert_eq!(graph.len(), 4);
    // 0→2 direct (1) then 2→1 (1) beats the direct 0→1 edge (3).
    assert_eq!(oracle::shortest_paths(&graph, 0), vec![0, 2, 1, INFINITY]);
}

#[test]
fn row_blocks_tile_the_full_matrix() {
    let graph = Graph::parse(TRIANGLE_PLUS_ISOLATE).unwrap();
    let partition = Partition::new(graph.len(), 2).unwrap();

    for rank in 0..partition.workers() {
        let range = partition.block(rank);
        let block = graph.row_block(range.start, range.len());
        assert_eq!(block.offset(), range.start);
        for (offset, row) in range.clone().enumerate() {
            for col in 0..graph.len() {
                assert_eq!(block.weight(offset, col), graph.weight(row, col));
            }
        }
    }
}

#[test]
fn oracle_distances_respect_triangle_inequality() {
    let graph = Graph::parse(TRIANGLE_PLUS_ISOLATE).unwrap();
    let dist = oracle::shortest_paths(&graph, 0);
    for u in 0..graph.len() {
        for v in 0..graph.len() {
            let w = graph.weight(u, v);
            if w != 0 && dist[u] != INFINITY {
                assert!(
                    dist[v] <= dist[u].saturating_add(w),
                    "edge {u}-{v} violates relaxation"
                );
            }
        }
    }
}
