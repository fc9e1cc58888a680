//! Seeding and reproducibility guarantees

use crate::random::RandomStream;
use crate::simulation::run_monte_carlo;
use crate::tests::{default_levers, small_config};
use crate::{path::simulate_path, SimulationConfig};

#[test]
fn single_path_is_bit_identical_across_runs() {
    let config = small_config();
    let elasticity = config.effective_elasticity();

    let a = simulate_path(
        default_levers(),
        &config,
        &elasticity,
        3,
        &mut RandomStream::new(12_348),
    );
    let b = simulate_path(
        default_levers(),
        &config,
        &elasticity,
        3,
        &mut RandomStream::new(12_348),
    );

    assert_eq!(a.months.len(), b.months.len());
    for (left, right) in a.months.iter().zip(&b.months) {
        assert_eq!(left.arr.to_bits(), right.arr.to_bits());
        assert_eq!(left.cash.to_bits(), right.cash.to_bits());
        assert_eq!(left.burn.to_bits(), right.burn.to_bits());
    }
    assert_eq!(a, b);
}

#[test]
fn full_run_is_reproducible() {
    let config = small_config();

    let first = run_monte_carlo(default_levers(), &config).unwrap();
    let second = run_monte_carlo(default_levers(), &config).unwrap();

    assert_eq!(first.survival_rate.to_bits(), second.survival_rate.to_bits());
    assert_eq!(first.paths, second.paths);
    assert_eq!(first.median_case, second.median_case);
    assert_eq!(first.sensitivity, second.sensitivity);
}

#[test]
fn different_master_seeds_give_different_results() {
    let config = small_config();
    let other = SimulationConfig {
        seed: Some(99_999),
        ..small_config()
    };

    let a = run_monte_carlo(default_levers(), &config).unwrap();
    let b = run_monte_carlo(default_levers(), &other).unwrap();

    // Same model, different draws: the raw path records should differ
    assert_ne!(a.paths, b.paths);
}

#[test]
fn iteration_owns_its_seed() {
    // A path's result depends only on master_seed + id, not on what other
    // iterations did; re-simulating the median case standalone reproduces it
    let config = small_config();
    let elasticity = config.effective_elasticity();
    let result = run_monte_carlo(default_levers(), &config).unwrap();

    let median = &result.median_case;
    let seed = config.master_seed().wrapping_add(median.id as u64);
    let replay = simulate_path(
        default_levers(),
        &config,
        &elasticity,
        median.id,
        &mut RandomStream::new(seed),
    );

    assert_eq!(&replay, median);
}
