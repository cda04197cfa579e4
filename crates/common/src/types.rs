use std::collections::HashSet;

/// A loopless route through the graph together with its total weight.
///
/// Fields:
/// - `distance`: Sum of edge weights along the route.
/// - `vertices`: Ordered vertex sequence, source first and target last.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPath {
    pub distance: f64,
    pub vertices: Vec<usize>,
}

impl WeightedPath {
    pub fn new(distance: f64, vertices: Vec<usize>) -> Self {
        Self { distance, vertices }
    }

    /// Number of edges traversed by the route.
    pub fn hop_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Returns true if no vertex appears more than once.
    pub fn is_loopless(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.vertices.len());
        self.vertices.iter().all(|v| seen.insert(*v))
    }

    /// Consecutive `(u, v)` pairs along the route.
    pub fn hops(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.vertices.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Renders the route the way the reports print it: `0->1->2->`.
    pub fn arrow_chain(&self) -> String {
        self.vertices.iter().map(|v| format!("{}->", v)).collect()
    }
}

/// Outcome of reconstructing a target from a shortest-path tree.
///
/// An unreachable target is its own variant so it is never mistaken for
/// a zero-length route.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Found(WeightedPath),
    Unreachable,
}

impl Route {
    /// Total distance of the route, `+inf` when unreachable.
    pub fn distance(&self) -> f64 {
        match self {
            Route::Found(path) => path.distance,
            Route::Unreachable => f64::INFINITY,
        }
    }

    pub fn path(&self) -> Option<&WeightedPath> {
        match self {
            Route::Found(path) => Some(path),
            Route::Unreachable => None,
        }
    }

    pub fn into_path(self) -> Option<WeightedPath> {
        match self {
            Route::Found(path) => Some(path),
            Route::Unreachable => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Route::Found(_))
    }
}

/// Type alias for a single undirected edge record: (from, to, weight)
pub type Edge = (usize, usize, f64);
