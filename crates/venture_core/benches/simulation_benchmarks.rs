//! Criterion benchmarks for venture_core simulation
//!
//! Run with: cargo bench -p venture_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use venture_core::model::{LeverState, SimulationConfig};
use venture_core::path::simulate_path;
use venture_core::random::RandomStream;
use venture_core::simulation::run_monte_carlo;
use venture_core::verdict::{VerdictPolicy, reduce_verdict};

fn reference_config(iterations: usize) -> SimulationConfig {
    SimulationConfig {
        iterations,
        horizon_months: 36,
        starting_cash: 4_000_000.0,
        starting_arr: 4_800_000.0,
        starting_monthly_burn: 47_000.0,
        seed: Some(12_345),
        elasticity: None,
    }
}

fn bench_single_path(c: &mut Criterion) {
    let config = reference_config(1);
    let elasticity = config.effective_elasticity();
    let levers = LeverState::default();

    c.bench_function("single_path_36mo", |b| {
        b.iter(|| {
            let mut stream = RandomStream::new(black_box(12_345));
            simulate_path(
                black_box(levers),
                black_box(&config),
                black_box(&elasticity),
                0,
                &mut stream,
            )
        })
    });
}

fn bench_monte_carlo(c: &mut Criterion) {
    let mut group = c.benchmark_group("monte_carlo");
    let levers = LeverState::default();

    for iterations in [100, 500, 1000].iter() {
        let config = reference_config(*iterations);
        group.bench_with_input(
            BenchmarkId::new("iterations", iterations),
            iterations,
            |b, _| b.iter(|| run_monte_carlo(black_box(levers), black_box(&config))),
        );
    }

    group.finish();
}

fn bench_verdict_reduction(c: &mut Criterion) {
    let config = reference_config(1000);
    let result = run_monte_carlo(LeverState::default(), &config).unwrap();
    let policy = VerdictPolicy::default();

    c.bench_function("verdict_1000_paths", |b| {
        b.iter(|| reduce_verdict(black_box(&result), black_box(&policy)))
    });
}

criterion_group!(
    benches,
    bench_single_path,
    bench_monte_carlo,
    bench_verdict_reduction,
);
criterion_main!(benches);
