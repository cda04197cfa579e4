use super::dijkstra::ShortestPathTree;
use super::graph::AdjacencyGraph;
use common::error::Error;

/// Trait for single-source shortest-path solvers over non-negative weights.
pub trait ShortestPathSolver {
    /// Computes distances and predecessors from `source` to every vertex.
    ///
    /// Returns a fresh tree owned by the caller, or `Err(e)` if `source`
    /// is not a vertex of `graph`.
    fn solve(&self, graph: &AdjacencyGraph, source: usize) -> Result<ShortestPathTree, Error>;
}
