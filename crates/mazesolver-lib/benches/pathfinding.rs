use criterion::{criterion_group, criterion_main, Criterion};
use mazesolver_lib::{
    generate_maze, load_maze, solve_maze, GeneratorConfig, Grid, SolveAlgorithm, SolveRequest,
};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/serpentine_40.txt")
}

static SERPENTINE: Lazy<Grid> = Lazy::new(|| load_maze(&fixture_path()).expect("fixture loads"));
static GENERATED: Lazy<Grid> = Lazy::new(|| {
    let config = GeneratorConfig {
        rows: 50,
        cols: 50,
        wall_density: 0.3,
        seed: Some(0x5eed),
    };
    generate_maze(&config).expect("maze generates").grid
});

fn benchmark_pathfinding(c: &mut Criterion) {
    for (label, grid) in [("serpentine", &*SERPENTINE), ("generated", &*GENERATED)] {
        for algorithm in SolveAlgorithm::ALL {
            let request = SolveRequest::new(algorithm).with_timeout(None);
            c.bench_function(&format!("{algorithm}_{label}"), |b| {
                b.iter(|| {
                    let outcome = solve_maze(grid, &request).expect("search completes");
                    black_box(outcome.statistics.nodes_explored)
                });
            });
        }
    }
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
