use std::fs;
use std::str::FromStr;
use tokio::sync::mpsc::Sender;
use tracing::{info, warn};

use super::error::Error;
use super::producer::send_in_batches;
use super::types::{EdgeStreamer, StreamEvent};
use common::types::Edge;

/// Parsed contents of an edge-list file.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeList {
    pub num_nodes: usize,
    pub declared_edges: usize,
    pub edges: Vec<Edge>,
}

/// Streams the whitespace-separated edge-list format:
///
/// ```text
/// n m
/// index a b weight
/// ...
/// ```
///
/// The leading `index` column is ignored. The format is line-oriented:
/// the header must hold exactly two fields and every edge record exactly
/// four, each on its own line. Records split across lines or packed onto
/// one line are rejected with `Error::MalformedInput`.
pub struct EdgeListStreamer {
    path: String,
    batch_size: usize,
}

impl EdgeListStreamer {
    pub fn new(path: String, batch_size: usize) -> Self {
        EdgeListStreamer { path, batch_size }
    }

    fn read_edge_list(&self) -> Result<EdgeList, Error> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            warn!(path = %self.path, error = %e, "failed to read edge list");
            Error::IoError(e)
        })?;

        parse_edge_list(&content)
    }
}

fn parse_field<T: FromStr>(token: &str, line: usize, name: &str) -> Result<T, Error> {
    token.parse().map_err(|_| Error::MalformedInput {
        line,
        reason: format!("invalid {} '{}'", name, token),
    })
}

/// Parses edge-list text. Blank lines are skipped.
pub fn parse_edge_list(content: &str) -> Result<EdgeList, Error> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines.next().ok_or(Error::MalformedInput {
        line: 1,
        reason: "missing 'n m' header".to_string(),
    })?;

    let header: Vec<&str> = header.split_whitespace().collect();
    if header.len() != 2 {
        return Err(Error::MalformedInput {
            line: header_line,
            reason: format!("expected 'n m' header, found {} fields", header.len()),
        });
    }
    let num_nodes: usize = parse_field(header[0], header_line, "vertex count")?;
    let declared_edges: usize = parse_field(header[1], header_line, "edge count")?;

    let mut edges = Vec::with_capacity(declared_edges);
    for (line_no, line) in lines {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(Error::MalformedInput {
                line: line_no,
                reason: format!("expected 'index a b weight', found {} fields", fields.len()),
            });
        }

        let a: usize = parse_field(fields[1], line_no, "endpoint")?;
        let b: usize = parse_field(fields[2], line_no, "endpoint")?;
        let weight: f64 = parse_field(fields[3], line_no, "weight")?;
        edges.push((a, b, weight));
    }

    if edges.len() != declared_edges {
        warn!(
            declared = declared_edges,
            found = edges.len(),
            "edge count differs from header"
        );
    }

    Ok(EdgeList {
        num_nodes,
        declared_edges,
        edges,
    })
}

#[async_trait::async_trait]
impl EdgeStreamer for EdgeListStreamer {
    async fn run_stream(self, sender: Sender<StreamEvent>) -> Result<(), Error> {
        let edge_list = self.read_edge_list()?;

        info!(
            nodes = edge_list.num_nodes,
            edges = edge_list.edges.len(),
            "EdgeListStreamer: starting transfer"
        );

        if sender.send(StreamEvent::Nodes(edge_list.num_nodes)).await.is_err() {
            return Err(Error::ChannelSendFailed);
        }
        let edges_sent = send_in_batches(&sender, &edge_list.edges, self.batch_size).await?;

        info!(edges_sent, "EdgeListStreamer: transfer complete");
        Ok(())
    }
}
