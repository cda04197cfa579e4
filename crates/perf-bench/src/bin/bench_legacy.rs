use std::hint::black_box;
use std::time::Instant;

use alt_paths_core::{AlternativePathSearch, DijkstraSolver};
use perf_bench::*;

fn main() {
    let (graph, source, target) = benchmark_query(GRID_SIDE).expect("grid graph builds");
    let num_nodes = graph.num_nodes();

    let start_time = Instant::now();

    let mut search = AlternativePathSearch::new(graph, source, target, DijkstraSolver)
        .expect("benchmark query is in range");
    let report = black_box(search.legacy_search().expect("grid corners are connected"));

    let elapsed_time = start_time.elapsed();

    println!("--- Legacy Benchmark Results ({} Nodes) ---", num_nodes);
    println!("Shortest: {}", report.shortest.distance);
    println!("Candidates: {}", report.candidates.len());
    println!("Elapsed Time: {:?}", elapsed_time);
}
