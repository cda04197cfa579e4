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
    let paths = black_box(
        search
            .yen_search(YEN_K, YEN_MAX_CANDIDATES)
            .expect("grid corners are connected"),
    );

    let elapsed_time = start_time.elapsed();

    println!("--- Yen Benchmark Results ({} Nodes, k = {}) ---", num_nodes, YEN_K);
    for (rank, path) in paths.iter().enumerate() {
        println!("#{}: {:.3} ({} hops)", rank + 1, path.distance, path.hop_count());
    }
    println!("Elapsed Time: {:?}", elapsed_time);
}
