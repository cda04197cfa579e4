use std::time::{Duration, Instant};
use tracing::info;

use super::config::QueryConfig;
use super::error::Error;
use alt_paths_core::{
    AdjacencyGraph, AlternativePathSearch, SearchMode, SearchOutcome,
    traits::ShortestPathSolver,
};

/// Outcome of one timed query.
#[derive(Debug)]
pub struct SearchRun {
    pub outcome: SearchOutcome,
    pub elapsed: Duration,
}

/// Runs the configured alternative-path query against a finished graph.
pub struct PathSearcher<S> {
    solver: S,
    query: QueryConfig,
    mode: SearchMode,
}

impl<S> PathSearcher<S>
where
    S: ShortestPathSolver,
{
    pub fn new(query: QueryConfig, mode: SearchMode, solver: S) -> Self {
        PathSearcher {
            solver,
            query,
            mode,
        }
    }

    /// Consumes the graph, runs the search and measures its wall-clock time.
    pub fn run(self, graph: AdjacencyGraph) -> Result<SearchRun, Error> {
        let started = Instant::now();

        let mut search =
            AlternativePathSearch::new(graph, self.query.source, self.query.target, self.solver)?;
        let outcome = search.search(self.mode)?;
        let elapsed = started.elapsed();

        info!(
            source = self.query.source,
            target = self.query.target,
            mode = ?self.mode,
            elapsed_ms = elapsed.as_millis() as u64,
            "search finished"
        );

        Ok(SearchRun { outcome, elapsed })
    }
}
