use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use tokio::sync::mpsc::Sender;
use tracing::{info, warn};

use super::error::Error;
use super::producer::send_in_batches;
use super::types::{EdgeStreamer, StreamEvent};
use common::types::Edge;

// Helper struct for CSV parsing
#[derive(Debug, Deserialize, Default)]
pub struct CsvRecord {
    #[serde(rename = "from")]
    pub from_node: usize,

    #[serde(rename = "to")]
    pub to_node: usize,

    #[serde(rename = "weight")]
    pub weight: f64,
}

/// Streams undirected edges from a CSV file with a `from,to,weight` header.
///
/// Extra columns (such as a leading `id`) are ignored. The vertex count is
/// not declared; the graph builder infers it from the largest endpoint.
pub struct CsvStreamer {
    path: String,
    batch_size: usize,
}

impl CsvStreamer {
    pub fn new(path: String, batch_size: usize) -> Self {
        CsvStreamer { path, batch_size }
    }

    fn parse_csv_to_edges(&self) -> Result<Vec<Edge>, Error> {
        let file = File::open(&self.path).map_err(|e| {
            warn!(path = %self.path, error = %e, "failed to read CSV file");
            Error::IoError(e)
        })?;

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut edges = Vec::new();

        for result in rdr.deserialize() {
            let record: CsvRecord = result?;
            edges.push((record.from_node, record.to_node, record.weight));
        }
        Ok(edges)
    }
}

#[async_trait::async_trait]
impl EdgeStreamer for CsvStreamer {
    async fn run_stream(self, sender: Sender<StreamEvent>) -> Result<(), Error> {
        let all_edges = self.parse_csv_to_edges()?;

        info!(edges = all_edges.len(), "CsvStreamer: starting transfer");
        let edges_sent = send_in_batches(&sender, &all_edges, self.batch_size).await?;
        info!(edges_sent, "CsvStreamer: transfer complete");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tokio::sync::mpsc;

    const MOCK_CSV_CONTENT: &str = "\
id,from,to,weight
1,0,1,1.05
2,1,2,0.95
3,2,0,1.001
4,5,6,1.2
";

    const BATCH_SIZE: usize = 10;

    fn mock_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(content.as_bytes())
            .expect("Failed to write mock content");
        temp_file
    }

    #[test]
    fn test_parse_csv_to_edges_success() {
        let temp_file = mock_file(MOCK_CSV_CONTENT);
        let path = temp_file
            .path()
            .to_str()
            .expect("Failed to get path string");

        let streamer = CsvStreamer::new(path.to_string(), BATCH_SIZE);
        let result = streamer.parse_csv_to_edges();

        assert!(
            result.is_ok(),
            "Parsing failed with error: {:?}",
            result.err()
        );

        let edges = result.unwrap();

        let expected_edges: Vec<Edge> =
            vec![(0, 1, 1.05), (1, 2, 0.95), (2, 0, 1.001), (5, 6, 1.2)];

        assert_eq!(edges.len(), 4, "Should have parsed 4 edges.");
        assert_eq!(
            edges, expected_edges,
            "Parsed edges do not match expected data."
        );
    }

    #[test]
    fn test_parse_csv_rejects_bad_weight() {
        let temp_file = mock_file("from,to,weight\n0,1,heavy\n");
        let path = temp_file.path().to_str().unwrap().to_string();

        let result = CsvStreamer::new(path, BATCH_SIZE).parse_csv_to_edges();
        assert!(matches!(result, Err(Error::CsvError(_))));
    }

    #[test]
    fn test_parse_csv_to_edges_file_not_found() {
        let streamer = CsvStreamer::new("non_existent_file.csv".to_string(), BATCH_SIZE);
        let result = streamer.parse_csv_to_edges();

        assert!(
            result.is_err(),
            "Should have failed to open non-existent file."
        );

        if let Err(Error::IoError(e)) = result {
            assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
        } else {
            panic!("Expected IoError, got: {:?}", result.err());
        }
    }

    #[tokio::test]
    async fn test_run_stream_sends_only_batches() {
        let temp_file = mock_file(MOCK_CSV_CONTENT);
        let path = temp_file.path().to_str().unwrap().to_string();

        let (tx, mut rx) = mpsc::channel(10);
        CsvStreamer::new(path, 3).run_stream(tx).await.unwrap();

        assert_eq!(
            rx.recv().await,
            Some(StreamEvent::Batch(vec![(0, 1, 1.05), (1, 2, 0.95), (2, 0, 1.001)]))
        );
        assert_eq!(rx.recv().await, Some(StreamEvent::Batch(vec![(5, 6, 1.2)])));
        assert_eq!(rx.recv().await, None);
    }
}
