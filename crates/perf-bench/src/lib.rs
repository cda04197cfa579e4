// ----------------------------
// Synthetic road-like grids for timing the search modes
// ----------------------------

use alt_paths_core::AdjacencyGraph;
use common::{error::Error, types::Edge};

pub const GRID_SIDE: usize = 120;
pub const YEN_K: usize = 10;
pub const YEN_MAX_CANDIDATES: usize = 64;

/// Generates the undirected edges of a `side x side` grid.
///
/// Weights vary deterministically with position so that shortest paths are
/// unique and the compiler cannot fold the work away.
pub fn generate_grid_edges(side: usize) -> Vec<Edge> {
    let id = |row: usize, col: usize| row * side + col;
    let weight = |a: usize, b: usize| 1.0 + ((a * 31 + b * 17) % 13) as f64 * 0.1;

    let mut edges = Vec::with_capacity(2 * side * side);
    for row in 0..side {
        for col in 0..side {
            let u = id(row, col);
            if col + 1 < side {
                let v = id(row, col + 1);
                edges.push((u, v, weight(u, v)));
            }
            if row + 1 < side {
                let v = id(row + 1, col);
                edges.push((u, v, weight(u, v)));
            }
        }
    }
    edges
}

/// Grid graph plus the opposite-corner query used by both benchmarks.
pub fn benchmark_query(side: usize) -> Result<(AdjacencyGraph, usize, usize), Error> {
    let num_nodes = side * side;
    let graph = AdjacencyGraph::from_edges(num_nodes, &generate_grid_edges(side))?;
    Ok((graph, 0, num_nodes.saturating_sub(1)))
}
