//! Monte Carlo orchestrator
//!
//! Runs `iterations` independent single-path simulations, each with its own
//! [`RandomStream`] seeded as `master_seed + index`, then reduces the raw
//! collection into a [`MonteCarloResult`]. Iterations have no data
//! dependency on one another, so the loop is a parallel map under the
//! `parallel` feature and a plain loop otherwise; the per-iteration seeding
//! rule makes the numeric output identical either way.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::error::{Result, SimulationError};
use crate::model::{LeverState, MonteCarloResult, PathOutcome, SimulationConfig};
use crate::path::simulate_path;
use crate::random::RandomStream;
use crate::sensitivity::rank_levers;
use crate::stats::{
    HISTOGRAM_BUCKETS, confidence_bands, histogram, metric_summary, select_case_indices,
    survival_curve,
};

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Progress is logged every this many completed iterations. Advisory only;
/// the counter itself is a relaxed atomic incremented once per iteration.
pub const PROGRESS_LOG_INTERVAL: usize = 250;

/// Shared progress and cancellation handle for a Monte Carlo run.
///
/// Hosts poll `completed()` at whatever interval suits their UI and may flip
/// `cancel()` at any time; cancellation is honored at iteration granularity,
/// never mid-path.
#[derive(Debug, Clone)]
pub struct RunProgress {
    completed: Arc<AtomicUsize>,
    cancelled: Arc<AtomicBool>,
}

impl RunProgress {
    #[must_use]
    pub fn new() -> Self {
        Self {
            completed: Arc::new(AtomicUsize::new(0)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create from existing atomics (for host UI integration).
    #[must_use]
    pub fn from_atomics(completed: Arc<AtomicUsize>, cancelled: Arc<AtomicBool>) -> Self {
        Self {
            completed,
            cancelled,
        }
    }

    /// Number of iterations completed so far.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    /// Increment the completed counter, returning the new count.
    fn increment(&self) -> usize {
        self.completed.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Request cancellation of the run.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Default for RunProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the full Monte Carlo pipeline with default (inert) progress tracking.
pub fn run_monte_carlo(levers: LeverState, config: &SimulationConfig) -> Result<MonteCarloResult> {
    run_monte_carlo_with_progress(levers, config, &RunProgress::new())
}

/// Run the full Monte Carlo pipeline, reporting progress through `progress`.
///
/// Fails fast on invalid configuration or levers; returns
/// [`SimulationError::Cancelled`] if the host flips the cancellation flag
/// (aggregation assumes a complete, uniformly-sized sample, so a partial run
/// is never reduced).
pub fn run_monte_carlo_with_progress(
    levers: LeverState,
    config: &SimulationConfig,
    progress: &RunProgress,
) -> Result<MonteCarloResult> {
    levers.validate()?;
    config.validate()?;

    let master_seed = config.master_seed();
    let elasticity = config.effective_elasticity();

    tracing::debug!(
        iterations = config.iterations,
        horizon_months = config.horizon_months,
        seed = master_seed,
        "monte carlo run started"
    );

    let run_one = |i: usize| -> Result<crate::model::SingleSimulationResult> {
        if progress.is_cancelled() {
            return Err(SimulationError::Cancelled);
        }
        let mut stream = RandomStream::new(master_seed.wrapping_add(i as u64));
        let result = simulate_path(levers, config, &elasticity, i, &mut stream);
        let done = progress.increment();
        if done % PROGRESS_LOG_INTERVAL == 0 {
            tracing::trace!(completed = done, total = config.iterations, "simulating");
        }
        Ok(result)
    };

    #[cfg(feature = "parallel")]
    let paths: Vec<_> = (0..config.iterations)
        .into_par_iter()
        .map(run_one)
        .collect::<Result<_>>()?;

    #[cfg(not(feature = "parallel"))]
    let paths: Vec<_> = (0..config.iterations)
        .map(run_one)
        .collect::<Result<_>>()?;

    if progress.is_cancelled() {
        tracing::warn!("monte carlo run cancelled");
        return Err(SimulationError::Cancelled);
    }

    let result = aggregate(levers, config, master_seed, paths);

    tracing::debug!(
        survival_rate = result.survival_rate,
        "monte carlo run completed"
    );

    Ok(result)
}

/// Reduce the raw path collection into the aggregate. Order-independent: a
/// handful of sorts and reductions over an unordered collection.
fn aggregate(
    levers: LeverState,
    config: &SimulationConfig,
    master_seed: u64,
    paths: Vec<crate::model::SingleSimulationResult>,
) -> MonteCarloResult {
    let survivors = paths.iter().filter(|p| p.survived).count();
    let survival_rate = survivors as f64 / paths.len() as f64;

    let final_arrs: Vec<f64> = paths.iter().map(|p| p.final_arr).collect();
    let final_cashes: Vec<f64> = paths.iter().map(|p| p.final_cash).collect();
    let final_runways: Vec<f64> = paths.iter().map(|p| p.final_runway).collect();

    let (worst_idx, median_idx, best_idx) = select_case_indices(&paths);
    let worst_case = paths[worst_idx].clone();
    let median_case = paths[median_idx].clone();
    let best_case = paths[best_idx].clone();

    let elasticity = config.effective_elasticity();
    let sensitivity = rank_levers(levers, config, &elasticity, master_seed, &median_case);

    let outcomes: Vec<PathOutcome> = paths.iter().map(PathOutcome::from).collect();

    MonteCarloResult {
        iterations: paths.len(),
        horizon_months: config.horizon_months,
        master_seed,
        levers,
        starting_cash: config.starting_cash,
        starting_arr: config.starting_arr,
        starting_monthly_burn: config.starting_monthly_burn,
        survival_rate,
        survival_by_month: survival_curve(&paths, config.horizon_months),
        final_arr: metric_summary(&final_arrs),
        final_cash: metric_summary(&final_cashes),
        final_runway: metric_summary(&final_runways),
        arr_histogram: histogram(&final_arrs, HISTOGRAM_BUCKETS),
        cash_histogram: histogram(&final_cashes, HISTOGRAM_BUCKETS),
        confidence_bands: confidence_bands(&paths, config.horizon_months),
        worst_case,
        median_case,
        best_case,
        sensitivity,
        paths: outcomes,
    }
}
