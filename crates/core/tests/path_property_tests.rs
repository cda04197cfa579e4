use alt_paths_core::graph::AdjacencyGraph;
use alt_paths_core::search::AlternativePathSearch;
use alt_paths_core::traits::ShortestPathSolver;
use alt_paths_core::DijkstraSolver;
use common::types::{Edge, Route};
use proptest::prelude::*;
use proptest::strategy::Strategy;

const NUM_NODES_STRATEGY: std::ops::Range<usize> = 1usize..8;

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<Edge>)> {
    NUM_NODES_STRATEGY.prop_flat_map(|num_nodes| {
        // Integral weights keep brute-force sums exact.
        let edge_generator = (0usize..num_nodes, 0usize..num_nodes, (0u32..10).prop_map(f64::from));
        let edges_generator = prop::collection::vec(edge_generator, 0..16);

        (proptest::strategy::Just(num_nodes), edges_generator)
    })
}

/// Minimum weight over every simple path from `source` to `target`.
fn brute_force_distance(graph: &AdjacencyGraph, source: usize, target: usize) -> f64 {
    fn walk(
        graph: &AdjacencyGraph,
        at: usize,
        target: usize,
        cost: f64,
        visited: &mut Vec<bool>,
        best: &mut f64,
    ) {
        if at == target {
            *best = best.min(cost);
            return;
        }
        for neighbor in graph.neighbors(at) {
            if !visited[neighbor.target] {
                visited[neighbor.target] = true;
                walk(graph, neighbor.target, target, cost + neighbor.weight, visited, best);
                visited[neighbor.target] = false;
            }
        }
    }

    let mut visited = vec![false; graph.num_nodes()];
    visited[source] = true;
    let mut best = f64::INFINITY;
    walk(graph, source, target, 0.0, &mut visited, &mut best);
    best
}

fn sorted_lists(graph: &AdjacencyGraph) -> Vec<Vec<(usize, u64)>> {
    (0..graph.num_nodes())
        .map(|u| {
            let mut list: Vec<_> = graph
                .neighbors(u)
                .iter()
                .map(|n| (n.target, n.weight.to_bits()))
                .collect();
            list.sort_unstable();
            list
        })
        .collect()
}

proptest! {
    /// Property: Dijkstra distances match exhaustive enumeration of simple paths
    #[test]
    fn distances_match_brute_force((num_nodes, edges) in graph_strategy()) {
        let graph = AdjacencyGraph::from_edges(num_nodes, &edges).unwrap();
        let tree = DijkstraSolver.solve(&graph, 0).unwrap();

        for target in 0..num_nodes {
            prop_assert_eq!(tree.distance_to(target), brute_force_distance(&graph, 0, target));
        }
    }

    /// Property: reconstructed routes follow real edges and sum to the reported distance
    #[test]
    fn routes_are_valid_and_weighted((num_nodes, edges) in graph_strategy()) {
        let graph = AdjacencyGraph::from_edges(num_nodes, &edges).unwrap();
        let tree = DijkstraSolver.solve(&graph, 0).unwrap();

        for target in 0..num_nodes {
            match tree.route_to(target) {
                Route::Found(path) => {
                    prop_assert_eq!(path.vertices.first().copied(), Some(0));
                    prop_assert_eq!(path.vertices.last().copied(), Some(target));
                    prop_assert!(path.is_loopless());

                    let mut total = 0.0;
                    for (u, v) in path.hops() {
                        let weight = graph
                            .neighbors(u)
                            .iter()
                            .filter(|n| n.target == v)
                            .map(|n| n.weight)
                            .fold(f64::INFINITY, f64::min);
                        prop_assert!(weight.is_finite(), "hop {} -> {} is not an edge", u, v);
                        total += weight;
                    }
                    prop_assert_eq!(total, path.distance);
                }
                Route::Unreachable => prop_assert!(tree.distance_to(target).is_infinite()),
            }
        }
    }

    /// Property: removing any hop of the shortest path never makes the target closer
    #[test]
    fn removal_never_decreases_distance((num_nodes, edges) in graph_strategy()) {
        let target = num_nodes - 1;
        let graph = AdjacencyGraph::from_edges(num_nodes, &edges).unwrap();
        let mut search = AlternativePathSearch::new(graph, 0, target, DijkstraSolver).unwrap();

        if let Ok(baseline) = search.shortest() {
            for (u, v) in baseline.hops() {
                let route = search.perturb_edge(u, v).unwrap();
                prop_assert!(route.distance() >= baseline.distance);
            }
        }
    }

    /// Property: remove then restore leaves every adjacency multiset unchanged
    #[test]
    fn remove_restore_round_trip((num_nodes, edges) in graph_strategy()) {
        let mut graph = AdjacencyGraph::from_edges(num_nodes, &edges).unwrap();
        let original = sorted_lists(&graph);

        for &(a, b, _) in &edges {
            let removed = graph.remove_edge(a, b).unwrap();
            graph.restore_edge(removed);
        }

        prop_assert_eq!(sorted_lists(&graph), original);
    }

    /// Property: Yen results are sorted, loopless, distinct and start with the shortest path
    #[test]
    fn yen_paths_are_ranked_and_distinct((num_nodes, edges) in graph_strategy()) {
        let target = num_nodes - 1;
        let graph = AdjacencyGraph::from_edges(num_nodes, &edges).unwrap();
        let original = sorted_lists(&graph);
        let mut search = AlternativePathSearch::new(graph, 0, target, DijkstraSolver).unwrap();

        if let Ok(baseline) = search.shortest() {
            let paths = search.yen_search(4, 32).unwrap();

            prop_assert!(!paths.is_empty() && paths.len() <= 4);
            prop_assert_eq!(paths[0].distance, baseline.distance);
            for pair in paths.windows(2) {
                prop_assert!(pair[0].distance <= pair[1].distance);
            }
            for (i, path) in paths.iter().enumerate() {
                prop_assert!(path.is_loopless());
                prop_assert_eq!(path.vertices.last().copied(), Some(target));
                for other in &paths[i + 1..] {
                    prop_assert_ne!(&path.vertices, &other.vertices);
                }
            }
        }

        prop_assert_eq!(sorted_lists(search.graph()), original);
    }
}
