use tokio::sync::mpsc::Receiver;
use tracing::{debug, info};

use super::error::Error;
use super::types::StreamEvent;
use alt_paths_core::AdjacencyGraph;
use common::types::Edge;

/// Async consumer that collects streamed edge batches into a graph.
pub struct GraphBuilder {
    receiver: Receiver<StreamEvent>,
}

impl GraphBuilder {
    pub fn new(receiver: Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Drains the channel until every sender is dropped, then builds the graph.
    ///
    /// The vertex count is the one declared by the streamer, or the largest
    /// endpoint plus one when nothing was declared. Records are validated once
    /// here; a bad record fails the whole load.
    pub async fn build(mut self) -> Result<AdjacencyGraph, Error> {
        let mut declared_nodes = None;
        let mut edges: Vec<Edge> = Vec::new();

        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Nodes(n) => declared_nodes = Some(n),
                StreamEvent::Batch(batch) => {
                    debug!(records = batch.len(), "edge batch received");
                    edges.extend(batch);
                }
            }
        }

        let num_nodes = declared_nodes.unwrap_or_else(|| {
            edges
                .iter()
                .flat_map(|&(u, v, _)| [u, v])
                .max()
                .map_or(0, |max_id| max_id + 1)
        });

        let graph = AdjacencyGraph::from_edges(num_nodes, &edges)?;
        info!(nodes = num_nodes, records = edges.len(), "graph built");

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::Error as AltPathsError;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_builds_with_declared_node_count() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(StreamEvent::Nodes(5)).await.unwrap();
        tx.send(StreamEvent::Batch(vec![(0, 1, 1.0)])).await.unwrap();
        tx.send(StreamEvent::Batch(vec![(1, 2, 2.0)])).await.unwrap();
        drop(tx);

        let graph = GraphBuilder::new(rx).build().await.unwrap();

        assert_eq!(graph.num_nodes(), 5);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.edge_weight(2, 1), Some(2.0));
    }

    #[tokio::test]
    async fn test_infers_node_count_from_endpoints() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(StreamEvent::Batch(vec![(0, 7, 1.0), (3, 2, 1.0)]))
            .await
            .unwrap();
        drop(tx);

        let graph = GraphBuilder::new(rx).build().await.unwrap();
        assert_eq!(graph.num_nodes(), 8);
    }

    #[tokio::test]
    async fn test_empty_stream_builds_empty_graph() {
        let (tx, rx) = mpsc::channel::<StreamEvent>(1);
        drop(tx);

        let graph = GraphBuilder::new(rx).build().await.unwrap();
        assert_eq!(graph.num_nodes(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_record_fails_load() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(StreamEvent::Nodes(2)).await.unwrap();
        tx.send(StreamEvent::Batch(vec![(0, 3, 1.0)])).await.unwrap();
        drop(tx);

        let result = GraphBuilder::new(rx).build().await;
        assert!(matches!(
            result,
            Err(Error::GraphError(AltPathsError::NodeIndexOutOfBounds(3)))
        ));
    }

    #[tokio::test]
    async fn test_negative_weight_fails_load() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(StreamEvent::Batch(vec![(0, 1, -2.0)])).await.unwrap();
        drop(tx);

        let result = GraphBuilder::new(rx).build().await;
        assert!(matches!(
            result,
            Err(Error::GraphError(AltPathsError::InvalidWeight { .. }))
        ));
    }
}
