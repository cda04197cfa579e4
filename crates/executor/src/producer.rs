use tokio::sync::mpsc::Sender;

use super::{
    error::Error,
    types::{EdgeStreamer, JoinHandleResult, StreamEvent},
};
use common::types::Edge;

pub struct Producer<S: EdgeStreamer> {
    streamer: S,
}

impl<S> Producer<S>
where
    S: EdgeStreamer,
{
    pub fn new(streamer: S) -> Self {
        Producer { streamer }
    }

    pub fn spawn(self, sender: Sender<StreamEvent>) -> JoinHandleResult {
        tracing::debug!("Producer ready.");
        tokio::spawn(async move { self.streamer.run_stream(sender).await })
    }
}

/// Sends `edges` in chunks of `batch_size`, returning the number of records sent.
pub async fn send_in_batches(
    sender: &Sender<StreamEvent>,
    edges: &[Edge],
    batch_size: usize,
) -> Result<usize, Error> {
    let mut edges_sent = 0;

    for chunk in edges.chunks(batch_size.max(1)) {
        if sender.send(StreamEvent::Batch(chunk.to_vec())).await.is_err() {
            tracing::warn!("Streamer shutting down: graph builder dropped its receiver.");
            return Err(Error::ChannelSendFailed);
        }
        edges_sent += chunk.len();
    }

    Ok(edges_sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_send_in_batches_chunks_records() {
        let (tx, mut rx) = mpsc::channel(10);
        let edges: Vec<Edge> = (0..5).map(|i| (i, i + 1, 1.0)).collect();

        let sent = send_in_batches(&tx, &edges, 2).await.unwrap();
        drop(tx);

        assert_eq!(sent, 5);
        let mut sizes = Vec::new();
        while let Some(StreamEvent::Batch(batch)) = rx.recv().await {
            sizes.push(batch.len());
        }
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[tokio::test]
    async fn test_send_in_batches_tolerates_zero_batch_size() {
        let (tx, mut rx) = mpsc::channel(10);
        let edges: Vec<Edge> = vec![(0, 1, 1.0), (1, 2, 1.0)];

        let sent = send_in_batches(&tx, &edges, 0).await.unwrap();

        assert_eq!(sent, 2);
        assert_eq!(rx.recv().await, Some(StreamEvent::Batch(vec![(0, 1, 1.0)])));
    }

    #[tokio::test]
    async fn test_send_fails_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let result = send_in_batches(&tx, &[(0, 1, 1.0)], 1).await;
        assert!(matches!(result, Err(Error::ChannelSendFailed)));
    }
}
