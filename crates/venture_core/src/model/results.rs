//! Simulation outputs: per-month snapshots, per-path results, and the
//! Monte Carlo aggregate.

use serde::{Deserialize, Serialize};

use crate::model::{Lever, LeverState};

/// Reported runway is capped here so that near-breakeven paths do not feed
/// effectively-infinite values into percentile computations.
pub const RUNWAY_CAP_MONTHS: f64 = 120.0;

/// One simulated month of company state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    /// Month index, 1-based
    pub month: u32,
    pub arr: f64,
    pub cash: f64,
    pub burn: f64,
    /// Months of cash left at this month's net burn, capped at
    /// [`RUNWAY_CAP_MONTHS`]
    pub runway_months: f64,
    /// Growth rate applied to ARR this month
    pub growth_rate: f64,
}

/// Why a failed path died, assigned at time of death by an ordered rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureTrigger {
    RevenueMiss,
    BurnSpike,
    MarketShock,
    ChurnSpiral,
    FundingGap,
}

impl FailureTrigger {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            FailureTrigger::RevenueMiss => "revenue miss",
            FailureTrigger::BurnSpike => "burn spike",
            FailureTrigger::MarketShock => "market shock",
            FailureTrigger::ChurnSpiral => "churn spiral",
            FailureTrigger::FundingGap => "funding gap",
        }
    }
}

/// Complete record of one simulated path.
///
/// Created once by the single-path simulator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleSimulationResult {
    /// Iteration index; also the offset added to the master seed
    pub id: usize,
    /// One snapshot per simulated month, ending early on death
    pub months: Vec<MonthlySnapshot>,
    pub final_arr: f64,
    pub final_cash: f64,
    pub final_runway: f64,
    pub survived: bool,
    /// First month where cash fell to or below zero, if any
    pub month_of_death: Option<u32>,
    pub failure_trigger: Option<FailureTrigger>,
    pub peak_arr: f64,
    pub lowest_cash: f64,
    /// Secondary success signal: final ARR reached 2x starting ARR
    pub achieved_target: bool,
}

/// Compact per-path record kept in the aggregate so the verdict reducer can
/// classify every path without holding 10k full trajectories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathOutcome {
    pub id: usize,
    pub survived: bool,
    pub month_of_death: Option<u32>,
    pub failure_trigger: Option<FailureTrigger>,
    pub final_arr: f64,
    pub final_cash: f64,
}

impl From<&SingleSimulationResult> for PathOutcome {
    fn from(result: &SingleSimulationResult) -> Self {
        Self {
            id: result.id,
            survived: result.survived,
            month_of_death: result.month_of_death,
            failure_trigger: result.failure_trigger,
            final_arr: result.final_arr,
            final_cash: result.final_cash,
        }
    }
}

/// Mean, population standard deviation, median, and skewness of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DistributionStats {
    pub mean: f64,
    pub std_dev: f64,
    pub median: f64,
    /// 0.0 when the standard deviation is zero (all outcomes identical);
    /// skewness is undefined there and the guard is deliberate
    pub skewness: f64,
}

/// Nearest-rank percentiles of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentileSet {
    pub p5: f64,
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
}

impl PercentileSet {
    /// Percentile values in ascending-rank order, for monotonicity checks
    /// and chart rendering.
    #[must_use]
    pub fn ordered(&self) -> [f64; 7] {
        [
            self.p5, self.p10, self.p25, self.p50, self.p75, self.p90, self.p95,
        ]
    }
}

/// Distribution stats plus percentiles for one outcome metric.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricSummary {
    pub stats: DistributionStats,
    pub percentiles: PercentileSet,
}

/// One histogram bucket: right-open `[min, max)`, except the final bucket
/// which absorbs the sample maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Fixed-bucket histogram over an observed sample.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Histogram {
    pub buckets: Vec<HistogramBucket>,
}

/// Per-month ARR spread across the paths still alive at that month.
///
/// Paths that died earlier contribute no sample: this is a
/// survivorship-biased band by design, showing the distribution of
/// outcomes among those still standing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    /// Month index, 1-based
    pub month: u32,
    pub band: PercentileSet,
    /// Number of paths that contributed a sample
    pub samples: usize,
}

/// Whether raising a lever helped or hurt the outcome metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactDirection {
    Positive,
    Negative,
}

/// One lever's measured impact from the one-sided +20 perturbation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityFactor {
    pub lever: Lever,
    /// Relative change in final ARR, clamped to [-1, 1]
    pub impact: f64,
    pub direction: ImpactDirection,
}

/// The full Monte Carlo aggregate. Derived once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    // Run metadata, carried so a verdict can be derived from this value alone
    pub iterations: usize,
    pub horizon_months: u32,
    pub master_seed: u64,
    pub levers: LeverState,
    pub starting_cash: f64,
    pub starting_arr: f64,
    pub starting_monthly_burn: f64,

    /// Fraction of paths alive at the end of the horizon
    pub survival_rate: f64,
    /// Fraction of paths alive at each month, index 0 = month 1
    pub survival_by_month: Vec<f64>,

    pub final_arr: MetricSummary,
    pub final_cash: MetricSummary,
    pub final_runway: MetricSummary,

    pub arr_histogram: Histogram,
    pub cash_histogram: Histogram,

    pub confidence_bands: Vec<ConfidenceBand>,

    /// Actual simulated paths at the 5th/50th/95th sorted-by-final-ARR index
    pub worst_case: SingleSimulationResult,
    pub median_case: SingleSimulationResult,
    pub best_case: SingleSimulationResult,

    /// Levers ranked descending by absolute impact
    pub sensitivity: Vec<SensitivityFactor>,

    /// Compact record of every path, for verdict reduction
    pub paths: Vec<PathOutcome>,
}

impl MonteCarloResult {
    /// Outcomes of paths that failed.
    pub fn failed_paths(&self) -> impl Iterator<Item = &PathOutcome> {
        self.paths.iter().filter(|p| !p.survived)
    }

    /// Outcomes of paths that survived the horizon.
    pub fn surviving_paths(&self) -> impl Iterator<Item = &PathOutcome> {
        self.paths.iter().filter(|p| p.survived)
    }
}
