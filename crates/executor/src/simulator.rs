use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::Sender;
use tracing::info;

use super::config::SimulatorConfig;
use super::error::Error;
use super::producer::send_in_batches;
use super::types::{EdgeStreamer, StreamEvent};
use common::types::Edge;

/// Smallest weight the simulator assigns, so no edge is free.
const MIN_WEIGHT: f64 = 0.1;

/// Produces a synthetic connected graph for test runs.
///
/// A ring over all vertices guarantees connectivity; `extra_edges` random
/// chords on top of it give the search real alternatives to find. The
/// generator is seeded, so the same config always yields the same graph.
pub struct SimulatorStreamer {
    pub config: SimulatorConfig,
    pub batch_size: usize,
}

impl SimulatorStreamer {
    pub fn new(config: SimulatorConfig, batch_size: usize) -> Self {
        SimulatorStreamer { config, batch_size }
    }

    pub fn generate_edges(&self) -> Vec<Edge> {
        let n = self.config.total_nodes;
        if n < 2 {
            return Vec::new();
        }

        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        let max_weight = self.config.max_weight.max(MIN_WEIGHT);
        let weight_range = MIN_WEIGHT..=max_weight;

        let mut edges: Vec<Edge> = (0..n)
            .map(|i| (i, (i + 1) % n, rng.random_range(weight_range.clone())))
            .collect();

        edges.extend((0..self.config.extra_edges).map(|_| {
            let from = rng.random_range(0..n);
            let to = rng.random_range(0..n);
            (from, to, rng.random_range(weight_range.clone()))
        }));

        edges
    }
}

#[async_trait]
impl EdgeStreamer for SimulatorStreamer {
    async fn run_stream(self, sender: Sender<StreamEvent>) -> Result<(), Error> {
        let edges = self.generate_edges();
        info!(
            nodes = self.config.total_nodes,
            edges = edges.len(),
            seed = self.config.seed,
            "Simulator: generated graph"
        );

        if sender
            .send(StreamEvent::Nodes(self.config.total_nodes))
            .await
            .is_err()
        {
            return Err(Error::ChannelSendFailed);
        }
        send_in_batches(&sender, &edges, self.batch_size).await?;

        Ok(())
    }
}
