pub mod builder;
pub mod config;
pub mod csv_streamer;
pub mod edge_list_streamer;
pub mod error;
pub mod export;
pub mod logging;
pub mod producer;
pub mod report;
pub mod searcher;
pub mod simulator;
pub mod types;

use std::env;
use std::io;
use std::time::Instant;
use tokio::sync::{mpsc, mpsc::Sender};
use tracing::{error, info};

use alt_paths_core::DijkstraSolver;
use builder::GraphBuilder;
use csv_streamer::CsvStreamer;
use edge_list_streamer::EdgeListStreamer;
use error::Error;
use producer::Producer;
use searcher::PathSearcher;
use simulator::SimulatorStreamer;
use types::{DataSource, JoinHandleResult, StreamEvent};

#[tokio::main]
async fn main() {
    let source = parse_args();

    if let Err(e) = run(source).await {
        error!(error = %e, "run failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(source: DataSource) -> Result<(), Error> {
    let config = config::load_config()?;
    logging::init_tracing(&config.logging.level)?;

    let started = Instant::now();

    let (sender, receiver) = mpsc::channel::<StreamEvent>(config.executor.buffer_size);
    let producer_handle = spawn_producer(&source, sender, &config);

    let graph = GraphBuilder::new(receiver).build().await;
    // A producer failure explains an empty or partial graph, so report it first.
    producer_handle.await??;
    let graph = graph?;

    let searcher = PathSearcher::new(config.query.clone(), config.search.mode(), DijkstraSolver);
    let search_run = tokio::task::spawn_blocking(move || searcher.run(graph)).await??;

    let ranked = search_run.outcome.ranked();
    let mut stdout = io::stdout().lock();
    report::write_report(&mut stdout, &ranked)?;

    if let Some(rows) = export::export_routes(&config.export, &ranked)? {
        info!(rows, "coordinate export written");
    }

    report::write_timing(
        &mut stdout,
        config.query.source,
        config.query.target,
        started.elapsed(),
    )?;
    info!(search_ms = search_run.elapsed.as_millis() as u64, "done");

    Ok(())
}

/// Parse command-line arguments to determine the graph source
fn parse_args() -> DataSource {
    let args: Vec<String> = env::args().collect();
    let source = args
        .get(1)
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "sim".to_string());

    match (source.as_str(), args.get(2)) {
        ("sim", _) => DataSource::SIM,
        ("txt", Some(path)) => DataSource::TXT(path.clone()),
        ("csv", Some(path)) => DataSource::CSV(path.clone()),
        _ => {
            eprintln!(
                "Usage: {} <SIM|TXT|CSV> [path]\n  - SIM: search a simulated graph\n  - TXT: read an 'n m' + 'index a b weight' edge list\n  - CSV: read a from,to,weight CSV file",
                args[0]
            );
            std::process::exit(1);
        }
    }
}

pub fn spawn_producer(
    source: &DataSource,
    sender: Sender<StreamEvent>,
    config: &config::Config,
) -> JoinHandleResult {
    let batch_size = config.producer.batch_size;

    match source {
        DataSource::SIM => {
            info!("Starting SimulatorStreamer producer task...");
            let streamer = SimulatorStreamer::new(config.simulator.clone(), batch_size);
            Producer::new(streamer).spawn(sender)
        }
        DataSource::TXT(path) => {
            info!(path = %path, "Starting EdgeListStreamer producer task...");
            let streamer = EdgeListStreamer::new(path.clone(), batch_size);
            Producer::new(streamer).spawn(sender)
        }
        DataSource::CSV(path) => {
            info!(path = %path, "Starting CsvStreamer producer task...");
            let streamer = CsvStreamer::new(path.clone(), batch_size);
            Producer::new(streamer).spawn(sender)
        }
    }
}
