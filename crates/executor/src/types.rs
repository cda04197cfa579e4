use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

use super::error::Error;
use common::types::Edge;

/// A trait defining the contract for any source that streams edge records
/// into the graph-building pipeline.
///
/// This trait decouples the Producer task from the specific input format
/// (edge-list text file, CSV file or simulated graph).
///
/// The trait bounds (`Send`, `Sync`, `'static`) are required so the
/// implementation can run on the multi-threaded Tokio runtime.
#[async_trait::async_trait]
pub trait EdgeStreamer: Send + Sync + 'static {
    async fn run_stream(self, sender: Sender<StreamEvent>) -> Result<(), Error>;
}

/// Messages flowing from a streamer to the graph builder.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Declared vertex count, sent before any batch when the source knows it.
    Nodes(usize),
    /// A chunk of undirected `(a, b, weight)` records.
    Batch(Vec<Edge>),
}

/// Where the graph comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// Whitespace-separated edge list: `n m` header then `index a b weight` rows.
    TXT(String),
    /// CSV with an `id,from,to,weight` header.
    CSV(String),
    /// Randomly generated connected graph.
    SIM,
}

pub type JoinHandleResult = JoinHandle<Result<(), Error>>;
