//! Sensitivity sweep interface guarantees

use std::collections::HashSet;

use crate::model::{ImpactDirection, Lever};
use crate::simulation::run_monte_carlo;
use crate::tests::{default_levers, small_config};

#[test]
fn one_factor_per_lever() {
    let result = run_monte_carlo(default_levers(), &small_config()).unwrap();

    assert_eq!(result.sensitivity.len(), Lever::ALL.len());
    let distinct: HashSet<_> = result.sensitivity.iter().map(|f| f.lever).collect();
    assert_eq!(distinct.len(), Lever::ALL.len());
}

#[test]
fn direction_matches_impact_sign() {
    let result = run_monte_carlo(default_levers(), &small_config()).unwrap();

    for factor in &result.sensitivity {
        match factor.direction {
            ImpactDirection::Negative => assert!(factor.impact < 0.0),
            ImpactDirection::Positive => assert!(factor.impact >= 0.0),
        }
    }
}

#[test]
fn factors_ranked_by_absolute_impact() {
    let result = run_monte_carlo(default_levers(), &small_config()).unwrap();

    for pair in result.sensitivity.windows(2) {
        assert!(
            pair[0].impact.abs() >= pair[1].impact.abs(),
            "sensitivity not ranked: {:?}",
            result.sensitivity
        );
    }
}

#[test]
fn impacts_are_clamped_to_unit_range() {
    let result = run_monte_carlo(default_levers(), &small_config()).unwrap();

    for factor in &result.sensitivity {
        assert!(
            (-1.0..=1.0).contains(&factor.impact),
            "{:?} impact {} outside [-1, 1]",
            factor.lever,
            factor.impact
        );
    }
}

#[test]
fn sweep_is_reproducible() {
    let config = small_config();
    let a = run_monte_carlo(default_levers(), &config).unwrap();
    let b = run_monte_carlo(default_levers(), &config).unwrap();
    assert_eq!(a.sensitivity, b.sensitivity);
}
