use super::graph::AdjacencyGraph;
use super::traits::ShortestPathSolver;
use common::{
    error::Error,
    types::{Route, WeightedPath},
};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Solver implementing Dijkstra's algorithm with a lazy-deletion binary heap.
pub struct DijkstraSolver;

/// Priority queue entry ordered by `(distance, vertex)`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HeapEntry {
    distance: f64,
    vertex: usize,
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

/// Result of one single-source solve.
///
/// Fields:
/// - `source`: The vertex the solve started from.
/// - `distances`: Best distance per vertex, `+inf` when unreachable.
/// - `predecessors`: Penultimate vertex on one shortest route, `None` for the
///   source and for unreachable vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree {
    pub source: usize,
    pub distances: Vec<f64>,
    pub predecessors: Vec<Option<usize>>,
}

impl ShortestPathTree {
    /// Distance from the source to `target`, `+inf` if unreachable or out of range.
    pub fn distance_to(&self, target: usize) -> f64 {
        self.distances.get(target).copied().unwrap_or(f64::INFINITY)
    }

    /// Reconstructs the route from the source to `target`.
    pub fn route_to(&self, target: usize) -> Route {
        let distance = self.distance_to(target);
        if distance.is_infinite() {
            return Route::Unreachable;
        }

        match reconstruct_path(self.source, target, &self.predecessors) {
            Some(vertices) => Route::Found(WeightedPath::new(distance, vertices)),
            None => Route::Unreachable,
        }
    }
}

/// Walks `predecessors` back from `target` and returns the source-to-target sequence.
///
/// Returns `None` when the chain ends anywhere other than `source`, when
/// `target` is out of range, or when the chain is longer than the vertex
/// count (a corrupted predecessor vector).
pub fn reconstruct_path(
    source: usize,
    target: usize,
    predecessors: &[Option<usize>],
) -> Option<Vec<usize>> {
    if target >= predecessors.len() {
        return None;
    }

    let mut path = vec![target];
    let mut current = target;

    while let Some(prev) = predecessors[current] {
        if path.len() > predecessors.len() {
            return None;
        }
        path.push(prev);
        current = prev;
    }

    if current != source {
        return None;
    }

    path.reverse();
    Some(path)
}

impl ShortestPathSolver for DijkstraSolver {
    /// Runs Dijkstra from `source` over the current adjacency lists.
    ///
    /// The heap has no decrease-key: every successful relaxation pushes a
    /// fresh entry and outdated copies are skipped when popped. Relaxation
    /// uses strict `<`, so among equal-distance routes the first one
    /// discovered keeps the predecessor slot.
    ///
    /// # Errors
    /// Returns `Error::NodeIndexOutOfBounds` if `source` is not a vertex.
    fn solve(&self, graph: &AdjacencyGraph, source: usize) -> Result<ShortestPathTree, Error> {
        let num_nodes = graph.num_nodes();
        if source >= num_nodes {
            return Err(Error::NodeIndexOutOfBounds(source));
        }

        let mut distances = vec![f64::INFINITY; num_nodes];
        let mut predecessors = vec![None; num_nodes];
        let mut heap = BinaryHeap::new();

        distances[source] = 0.0;
        heap.push(Reverse(HeapEntry {
            distance: 0.0,
            vertex: source,
        }));

        while let Some(Reverse(HeapEntry { distance, vertex: u })) = heap.pop() {
            // Stale copy left behind by a later, shorter relaxation.
            if distance > distances[u] {
                continue;
            }

            for neighbor in graph.neighbors(u) {
                let v = neighbor.target;
                let through_u = distance + neighbor.weight;
                if through_u < distances[v] {
                    distances[v] = through_u;
                    predecessors[v] = Some(u);
                    heap.push(Reverse(HeapEntry {
                        distance: through_u,
                        vertex: v,
                    }));
                }
            }
        }

        Ok(ShortestPathTree {
            source,
            distances,
            predecessors,
        })
    }
}
