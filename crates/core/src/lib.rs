pub mod dijkstra;
pub mod graph;
pub mod search;
pub mod store;
pub mod traits;

pub use dijkstra::{DijkstraSolver, ShortestPathTree};
pub use graph::AdjacencyGraph;
pub use search::{AlternativePathSearch, LegacyReport, SearchMode, SearchOutcome};
pub use store::RankedStore;
