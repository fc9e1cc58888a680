//! Finite-difference sensitivity analysis
//!
//! Each lever is independently raised by a fixed +20 (clamped to 100) and a
//! single path is re-simulated with the baseline median case's seed. The
//! relative change in final ARR, clamped to [-1, 1], is that lever's impact.
//! This is deliberately one-sided: only the +20 direction is probed, so
//! "sensitivity" is always measured upward from the current setting.

use crate::model::{
    ElasticityParameters, ImpactDirection, Lever, LeverState, SensitivityFactor,
    SimulationConfig, SingleSimulationResult,
};
use crate::path::simulate_path;
use crate::random::RandomStream;

/// Fixed perturbation applied to each lever.
pub const SENSITIVITY_DELTA: u8 = 20;

/// Rank all nine levers by causal impact on final ARR.
///
/// `median_case` is the baseline: its seed (`master_seed + id`) reseeds every
/// perturbed run so the perturbation is the only difference between paths.
/// Output is sorted descending by absolute impact and contains exactly one
/// entry per lever.
#[must_use]
pub fn rank_levers(
    levers: LeverState,
    config: &SimulationConfig,
    elasticity: &ElasticityParameters,
    master_seed: u64,
    median_case: &SingleSimulationResult,
) -> Vec<SensitivityFactor> {
    let baseline_seed = master_seed.wrapping_add(median_case.id as u64);
    let baseline_arr = median_case.final_arr;

    let mut factors: Vec<SensitivityFactor> = Lever::ALL
        .into_iter()
        .map(|lever| {
            let raised = levers
                .get(lever)
                .saturating_add(SENSITIVITY_DELTA)
                .min(100);
            let perturbed_levers = levers.with_value(lever, raised);

            let mut stream = RandomStream::new(baseline_seed);
            let perturbed =
                simulate_path(perturbed_levers, config, elasticity, median_case.id, &mut stream);

            let impact = if baseline_arr.abs() > f64::EPSILON {
                ((perturbed.final_arr - baseline_arr) / baseline_arr).clamp(-1.0, 1.0)
            } else {
                0.0
            };

            let direction = if impact < 0.0 {
                ImpactDirection::Negative
            } else {
                ImpactDirection::Positive
            };

            SensitivityFactor {
                lever,
                impact,
                direction,
            }
        })
        .collect();

    factors.sort_by(|a, b| b.impact.abs().total_cmp(&a.impact.abs()));
    factors
}
