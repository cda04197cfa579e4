use std::collections::BTreeSet;

use common::{
    error::Error,
    types::{Route, WeightedPath},
};
use tracing::{debug, info, instrument, trace, warn};

use super::graph::AdjacencyGraph;
use super::store::{DistanceKey, RankedStore};
use super::traits::ShortestPathSolver;

/// Which alternative-path strategy to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchMode {
    /// Perturb the baseline, then the 2nd path, and pick results by store offset.
    Legacy,
    /// Yen's k shortest loopless paths with a bounded candidate set.
    Yen { k: usize, max_candidates: usize },
}

/// Results of the depth-2 edge-exclusion search.
///
/// Fields:
/// - `shortest`: The baseline shortest path.
/// - `second`: Store minimum after perturbing the baseline.
/// - `third`: Entry two positions past the store minimum after perturbing `second`.
/// - `failed_steps`: Perturbation steps that could not be applied.
/// - `candidates`: Every distinct-distance candidate seen by either pass.
#[derive(Debug, Clone)]
pub struct LegacyReport {
    pub shortest: WeightedPath,
    pub second: Result<Route, Error>,
    pub third: Result<Route, Error>,
    pub failed_steps: Vec<Error>,
    pub candidates: RankedStore,
}

#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Legacy(LegacyReport),
    Yen(Vec<WeightedPath>),
}

impl SearchOutcome {
    /// Results in rank order, shortest first.
    pub fn ranked(&self) -> Vec<Result<Route, Error>> {
        match self {
            SearchOutcome::Legacy(report) => vec![
                Ok(Route::Found(report.shortest.clone())),
                report.second.clone(),
                report.third.clone(),
            ],
            SearchOutcome::Yen(paths) => paths
                .iter()
                .cloned()
                .map(|path| Ok(Route::Found(path)))
                .collect(),
        }
    }
}

/// Alternative-path search bound to one `(source, target)` query.
///
/// Owns the graph for the duration of the search. Every perturbation goes
/// through [`AdjacencyGraph::exclusions`], so the graph is back in its
/// original state (as a multiset of entries per vertex) between steps.
pub struct AlternativePathSearch<S> {
    solver: S,
    graph: AdjacencyGraph,
    source: usize,
    target: usize,
}

impl<S> AlternativePathSearch<S>
where
    S: ShortestPathSolver,
{
    /// # Errors
    /// Returns `Error::NodeIndexOutOfBounds` if `source` or `target` is not a vertex.
    pub fn new(
        graph: AdjacencyGraph,
        source: usize,
        target: usize,
        solver: S,
    ) -> Result<Self, Error> {
        for vertex in [source, target] {
            if vertex >= graph.num_nodes() {
                return Err(Error::NodeIndexOutOfBounds(vertex));
            }
        }

        Ok(AlternativePathSearch {
            solver,
            graph,
            source,
            target,
        })
    }

    pub fn graph(&self) -> &AdjacencyGraph {
        &self.graph
    }

    pub fn into_graph(self) -> AdjacencyGraph {
        self.graph
    }

    /// Baseline shortest path on the unmodified graph.
    ///
    /// # Errors
    /// Returns `Error::Unreachable` if no route connects source and target.
    pub fn shortest(&self) -> Result<WeightedPath, Error> {
        let tree = self.solver.solve(&self.graph, self.source)?;

        tree.route_to(self.target)
            .into_path()
            .ok_or(Error::Unreachable {
                source: self.source,
                target: self.target,
            })
    }

    /// Removes the first `from -> to` entry, re-solves, and restores the entry.
    ///
    /// The entry is restored when the exclusion scope ends, whether the
    /// solve succeeded or not.
    pub fn perturb_edge(&mut self, from: usize, to: usize) -> Result<Route, Error> {
        let mut scope = self.graph.exclusions();
        scope.remove_edge(from, to)?;

        let tree = self.solver.solve(&scope, self.source)?;
        Ok(tree.route_to(self.target))
    }

    /// Perturbs every hop of `path` in turn and records each outcome in `store`.
    ///
    /// Unreachable outcomes are stored at `+inf`. A hop that cannot be
    /// perturbed is reported in the returned list and the pass moves on.
    pub fn perturb_along(&mut self, path: &[usize], store: &mut RankedStore) -> Vec<Error> {
        let mut failures = Vec::new();

        for (step, hop) in path.windows(2).enumerate() {
            let (from, to) = (hop[0], hop[1]);

            match self.perturb_edge(from, to) {
                Ok(route) => {
                    let distance = route.distance();
                    debug!(step, from, to, distance, "perturbation solved");
                    store.insert(distance, route);
                }
                Err(e) => {
                    warn!(step, from, to, error = %e, "perturbation step skipped");
                    failures.push(e);
                }
            }
        }

        failures
    }

    /// Depth-2 edge-exclusion search.
    ///
    /// The baseline distance is never inserted into the store. The 3rd
    /// result is taken at a fixed offset of two past the store minimum, so
    /// it is not guaranteed to be the true 3rd shortest path.
    #[instrument(skip_all, fields(source = self.source, target = self.target))]
    pub fn legacy_search(&mut self) -> Result<LegacyReport, Error> {
        let shortest = self.shortest()?;
        info!(distance = shortest.distance, hops = shortest.hop_count(), "baseline found");

        let mut store = RankedStore::new();
        let mut failed_steps = self.perturb_along(&shortest.vertices, &mut store);

        let second = store.minimum().map(|(_, route)| route.clone());
        match &second {
            Ok(Route::Found(path)) => {
                failed_steps.extend(self.perturb_along(&path.vertices, &mut store));
            }
            Ok(Route::Unreachable) => debug!("second route unreachable, skipping second pass"),
            Err(e) => debug!(error = %e, "no second route"),
        }

        let third = store.nth_from_minimum(2).map(|(_, route)| route.clone());
        info!(
            candidates = store.len(),
            failed = failed_steps.len(),
            "legacy search finished"
        );

        Ok(LegacyReport {
            shortest,
            second,
            third,
            failed_steps,
            candidates: store,
        })
    }

    /// Yen's k shortest loopless paths.
    ///
    /// For every spur vertex of the last accepted path, edges leaving the
    /// spur along any accepted path sharing the same root are removed, the
    /// root vertices before the spur are removed, and the spur-to-target
    /// route is joined to the root. Candidates are deduplicated by vertex
    /// sequence and the set is trimmed to `max_candidates` (never below `k`)
    /// by dropping the longest.
    ///
    /// Returns at most `k` paths in non-decreasing distance order.
    #[instrument(skip_all, fields(source = self.source, target = self.target, k = k))]
    pub fn yen_search(
        &mut self,
        k: usize,
        max_candidates: usize,
    ) -> Result<Vec<WeightedPath>, Error> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let capacity = max_candidates.max(k);
        let mut accepted = vec![self.shortest()?];
        let mut candidates: BTreeSet<(DistanceKey, Vec<usize>)> = BTreeSet::new();

        while accepted.len() < k {
            let last = accepted[accepted.len() - 1].vertices.clone();

            for i in 0..last.len().saturating_sub(1) {
                let spur = last[i];
                let root = &last[..=i];
                let Some(root_cost) = self.graph.path_weight(root) else {
                    continue;
                };

                let spur_route = {
                    let mut scope = self.graph.exclusions();

                    for path in &accepted {
                        let shares_root =
                            path.vertices.len() > i + 1 && path.vertices[..=i] == *root;
                        if shares_root {
                            let next = path.vertices[i + 1];
                            while scope.remove_edge(spur, next).is_ok() {}
                        }
                    }
                    for &vertex in &root[..i] {
                        scope.remove_vertex(vertex)?;
                    }

                    trace!(spur, excluded = scope.len(), "solving spur");
                    self.solver.solve(&scope, spur)?.route_to(self.target)
                };

                let Route::Found(spur_path) = spur_route else {
                    continue;
                };

                let mut vertices = root[..i].to_vec();
                vertices.extend(spur_path.vertices);

                let known = accepted.iter().any(|p| p.vertices == vertices)
                    || candidates.iter().any(|(_, v)| *v == vertices);
                if known {
                    continue;
                }

                candidates.insert((DistanceKey(root_cost + spur_path.distance), vertices));
                while candidates.len() > capacity {
                    candidates.pop_last();
                }
            }

            match candidates.pop_first() {
                Some((DistanceKey(distance), vertices)) => {
                    debug!(rank = accepted.len() + 1, distance, "path accepted");
                    accepted.push(WeightedPath::new(distance, vertices));
                }
                None => {
                    debug!(found = accepted.len(), "candidate set exhausted");
                    break;
                }
            }
        }

        Ok(accepted)
    }

    pub fn search(&mut self, mode: SearchMode) -> Result<SearchOutcome, Error> {
        match mode {
            SearchMode::Legacy => self.legacy_search().map(SearchOutcome::Legacy),
            SearchMode::Yen { k, max_candidates } => {
                self.yen_search(k, max_candidates).map(SearchOutcome::Yen)
            }
        }
    }
}
