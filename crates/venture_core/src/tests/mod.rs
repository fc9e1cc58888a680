//! Integration tests for the scenario engine
//!
//! Tests are organized by topic:
//! - `determinism` - seeding and bit-for-bit reproducibility
//! - `path` - single-path simulator invariants
//! - `stats` - aggregation edge cases on full runs
//! - `sensitivity` - lever perturbation interface
//! - `verdict` - classification pipeline
//! - `scenarios` - end-to-end reference scenarios

mod determinism;
mod path;
mod sensitivity;

use crate::model::{LeverState, SimulationConfig};

/// Reference scenario: a healthy mid-stage company.
pub(crate) fn reference_config() -> SimulationConfig {
    SimulationConfig {
        iterations: 10_000,
        horizon_months: 36,
        starting_cash: 4_000_000.0,
        starting_arr: 4_800_000.0,
        starting_monthly_burn: 47_000.0,
        seed: Some(12_345),
        elasticity: None,
    }
}

/// Same scenario at a small iteration count, for tests that exercise
/// structure rather than statistics.
pub(crate) fn small_config() -> SimulationConfig {
    SimulationConfig {
        iterations: 200,
        ..reference_config()
    }
}

pub(crate) fn default_levers() -> LeverState {
    LeverState::default()
}
