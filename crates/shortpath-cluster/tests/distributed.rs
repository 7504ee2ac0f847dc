//! End-to-end tests for the distributed engine: known scenarios,
//! oracle comparison on random graphs, determinism, and input rejection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shortpath_cluster::{Cluster, ClusterError};
use shortpath_core::{oracle, Graph, INFINITY};

/// 4-node cycle, unit weights: 0–1, 1–2, 2–3, 3–0.
fn four_cycle() -> Graph {
    let mut g = Graph::empty(4);
    g.add_edge(0, 1, 1);
    g.add_edge(1, 2, 1);
    g.add_edge(2, 3, 1);
    g.add_edge(3, 0, 1);
    g
}

/// Seeded random symmetric graph with edge density ~1/3.
fn random_graph(n: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Graph::empty(n);
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.random_range(0..3) == 0 {
                g.add_edge(u, v, rng.random_range(1..20));
            }
        }
    }
    g
}

#[test]
fn four_cycle_from_node_zero() {
    let cluster = Cluster::new(four_cycle(), 2).unwrap();
    assert_eq!(cluster.run(0).unwrap(), vec![0, 1, 2, 1]);
}

#[test]
fn four_cycle_every_start_matches_oracle() {
    let graph = four_cycle();
    let cluster = Cluster::new(graph.clone(), 2).unwrap();
    for start in 0..4 {
        let distances = cluster.run(start).unwrap();
        assert_eq!(distances, oracle::shortest_paths(&graph, start));
        assert_eq!(distances[start], 0);
    }
}

#[test]
fn disconnected_pair_keeps_sentinel() {
    let cluster = Cluster::new(Graph::empty(2), 2).unwrap();
    assert_eq!(cluster.run(0).unwrap(), vec![0, INFINITY]);
}

#[test]
fn random_graphs_match_oracle_across_worker_counts() {
    for seed in 0..4u64 {
        let graph = random_graph(30, seed);
        let expected = oracle::shortest_paths(&graph, 0);
        for workers in [1, 2, 3, 5] {
            let cluster = Cluster::new(graph.clone(), workers).unwrap();
            assert_eq!(
                cluster.run(0).unwrap(),
                expected,
                "seed {seed}, {workers} workers"
            );
        }
    }
}

#[test]
fn sparse_graph_leaves_unreachable_components_at_infinity() {
    // Two 3-node components; start in the first.
    let mut g = Graph::empty(6);
    g.add_edge(0, 1, 2);
    g.add_edge(1, 2, 2);
    g.add_edge(3, 4, 1);
    g.add_edge(4, 5, 1);
    let cluster = Cluster::new(g, 3).unwrap();
    assert_eq!(
        cluster.run(0).unwrap(),
        vec![0, 2, 4, INFINITY, INFINITY, INFINITY]
    );
}

#[test]
fn trials_are_deterministic() {
    let graph = random_graph(25, 99);
    let cluster = Cluster::new(graph.clone(), 4).unwrap();
    let outcome = cluster.run_trials(3, 4).unwrap();
    assert_eq!(outcome.trials, 4);
    assert_eq!(outcome.rounds_per_trial, 25);
    assert_eq!(outcome.distances, oracle::shortest_paths(&graph, 3));
}

#[test]
fn every_trial_executes_one_round_per_node() {
    // Even with unreachable nodes the loop must not exit early: the
    // remaining sentinel-distance nodes are still proposed and closed.
    let mut g = Graph::empty(6);
    g.add_edge(0, 1, 2);
    g.add_edge(1, 2, 2);
    let cluster = Cluster::new(g, 2).unwrap();
    let outcome = cluster.run_trials(0, 2).unwrap();
    assert_eq!(outcome.rounds_per_trial, 6);
}

#[test]
fn independent_runs_agree() {
    let graph = random_graph(20, 7);
    let a = Cluster::new(graph.clone(), 3).unwrap().run(0).unwrap();
    let b = Cluster::new(graph, 3).unwrap().run(0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_start_is_rejected_without_wedging_workers() {
    let cluster = Cluster::new(four_cycle(), 2).unwrap();
    match cluster.run(4) {
        Err(ClusterError::InvalidStartNode { start: 4, nodes: 4 }) => {}
        other => panic!("expected InvalidStartNode, got {:?}", other.map(|_| ())),
    }
    // The abort flag reached every worker: the cluster is still usable.
    assert_eq!(cluster.run(0).unwrap(), vec![0, 1, 2, 1]);
}

#[test]
fn zero_trials_is_an_error() {
    let cluster = Cluster::new(four_cycle(), 2).unwrap();
    assert!(matches!(
        cluster.run_trials(0, 0),
        Err(ClusterError::NoTrials)
    ));
}

#[test]
fn too_many_workers_is_rejected_up_front() {
    assert!(matches!(
        Cluster::new(Graph::empty(2), 5),
        Err(ClusterError::Partition(_))
    ));
}
