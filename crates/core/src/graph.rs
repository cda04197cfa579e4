use std::ops::Deref;

use common::error::Error;
use common::types::Edge;
use tracing::trace;

/// A single adjacency entry seen from its source vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub target: usize,
    pub weight: f64,
}

/// Token returned by [`AdjacencyGraph::remove_edge`], consumed by
/// [`AdjacencyGraph::restore_edge`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use = "a removed edge must be restored"]
pub struct RemovedEdge {
    from: usize,
    neighbor: Neighbor,
}

impl RemovedEdge {
    pub fn from(&self) -> usize {
        self.from
    }

    pub fn neighbor(&self) -> Neighbor {
        self.neighbor
    }
}

/// Undirected weighted graph stored as per-vertex adjacency lists.
///
/// Every undirected edge `{u, v, w}` is stored twice:
/// - `adjacency[u]` holds `(v, w)`
/// - `adjacency[v]` holds `(u, w)`
///
/// The order of entries within a list is insertion order until edges are
/// removed and restored, after which restored entries sit at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyGraph {
    adjacency: Vec<Vec<Neighbor>>,
}

impl AdjacencyGraph {
    /// Creates a graph with `num_nodes` vertices and no edges.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); num_nodes],
        }
    }

    /// Builds the symmetric adjacency structure from `(a, b, weight)` records.
    ///
    /// All records are validated before anything is inserted.
    ///
    /// # Errors
    /// - `Error::NodeIndexOutOfBounds` if an endpoint is `>= num_nodes`.
    /// - `Error::InvalidWeight` if a weight is negative, NaN or infinite.
    pub fn from_edges(num_nodes: usize, edges: &[Edge]) -> Result<Self, Error> {
        for &(a, b, weight) in edges {
            Self::validate_record(num_nodes, a, b, weight)?;
        }

        let mut graph = Self::new(num_nodes);
        for &(a, b, weight) in edges {
            graph.adjacency[a].push(Neighbor { target: b, weight });
            graph.adjacency[b].push(Neighbor { target: a, weight });
        }

        Ok(graph)
    }

    /// Inserts one undirected edge in both directions.
    pub fn add_undirected_edge(&mut self, a: usize, b: usize, weight: f64) -> Result<(), Error> {
        Self::validate_record(self.num_nodes(), a, b, weight)?;
        self.adjacency[a].push(Neighbor { target: b, weight });
        self.adjacency[b].push(Neighbor { target: a, weight });
        Ok(())
    }

    fn validate_record(num_nodes: usize, a: usize, b: usize, weight: f64) -> Result<(), Error> {
        if a >= num_nodes {
            return Err(Error::NodeIndexOutOfBounds(a));
        }
        if b >= num_nodes {
            return Err(Error::NodeIndexOutOfBounds(b));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight {
                from: a,
                to: b,
                weight,
            });
        }
        Ok(())
    }

    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed adjacency entries (twice the undirected edge count).
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Outgoing entries of `u`, empty for out-of-range vertices.
    pub fn neighbors(&self, u: usize) -> &[Neighbor] {
        self.adjacency.get(u).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Weight of the cheapest `u -> v` entry, if any.
    pub fn edge_weight(&self, u: usize, v: usize) -> Option<f64> {
        self.neighbors(u)
            .iter()
            .filter(|n| n.target == v)
            .map(|n| n.weight)
            .reduce(f64::min)
    }

    /// Sum of weights along `path`, or `None` if a hop has no edge.
    pub fn path_weight(&self, path: &[usize]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.edge_weight(pair[0], pair[1]))
            .sum()
    }

    /// Removes the first `from -> to` entry from `from`'s list.
    ///
    /// The list is scanned in stored order with a cursor that advances past
    /// non-matching entries. Only `from`'s list is touched; the mirrored
    /// `to -> from` entry stays in place.
    ///
    /// # Errors
    /// Returns `Error::EdgeNotFound` (and leaves the graph untouched) if the
    /// cursor runs past the end of the list without a match.
    pub fn remove_edge(&mut self, from: usize, to: usize) -> Result<RemovedEdge, Error> {
        let list = self
            .adjacency
            .get_mut(from)
            .ok_or(Error::NodeIndexOutOfBounds(from))?;

        let mut cursor = 0;
        while cursor < list.len() && list[cursor].target != to {
            cursor += 1;
        }
        if cursor == list.len() {
            return Err(Error::EdgeNotFound { from, to });
        }

        let neighbor = list.remove(cursor);
        trace!(from, to, position = cursor, "edge removed");
        Ok(RemovedEdge { from, neighbor })
    }

    /// Re-appends a previously removed entry to its source's list.
    pub fn restore_edge(&mut self, removed: RemovedEdge) {
        self.adjacency[removed.from].push(removed.neighbor);
    }

    /// Starts a scope of temporary edge removals that are undone on drop.
    pub fn exclusions(&mut self) -> EdgeExclusions<'_> {
        EdgeExclusions {
            graph: self,
            removed: Vec::new(),
        }
    }
}

/// Scope guard over a mutably borrowed graph.
///
/// Every entry removed through the guard is restored, in reverse removal
/// order, when the guard is dropped. Solvers read the perturbed graph through
/// `Deref`.
pub struct EdgeExclusions<'a> {
    graph: &'a mut AdjacencyGraph,
    removed: Vec<RemovedEdge>,
}

impl EdgeExclusions<'_> {
    /// Removes the first `from -> to` entry for the lifetime of the guard.
    pub fn remove_edge(&mut self, from: usize, to: usize) -> Result<(), Error> {
        let removed = self.graph.remove_edge(from, to)?;
        self.removed.push(removed);
        Ok(())
    }

    /// Removes every entry leaving or entering `vertex`.
    pub fn remove_vertex(&mut self, vertex: usize) -> Result<(), Error> {
        if vertex >= self.graph.num_nodes() {
            return Err(Error::NodeIndexOutOfBounds(vertex));
        }

        let targets: Vec<usize> = self.graph.neighbors(vertex).iter().map(|n| n.target).collect();

        for target in targets {
            // Self-loops, and mirrors excluded earlier, may already be gone.
            for (from, to) in [(vertex, target), (target, vertex)] {
                if let Ok(removed) = self.graph.remove_edge(from, to) {
                    self.removed.push(removed);
                }
            }
        }
        Ok(())
    }

    /// Number of entries currently held out of the graph.
    pub fn len(&self) -> usize {
        self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

impl Deref for EdgeExclusions<'_> {
    type Target = AdjacencyGraph;

    fn deref(&self) -> &Self::Target {
        self.graph
    }
}

impl Drop for EdgeExclusions<'_> {
    fn drop(&mut self) {
        while let Some(removed) = self.removed.pop() {
            self.graph.restore_edge(removed);
        }
    }
}
