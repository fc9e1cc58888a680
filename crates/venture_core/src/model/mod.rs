mod config;
mod elasticity;
mod levers;
mod results;
mod verdict;

pub use config::{DEFAULT_HORIZON_MONTHS, DEFAULT_ITERATIONS, DEFAULT_SEED, SimulationConfig};
pub use elasticity::{
    CORRELATION_RANGE, ElasticityParameters, SHOCK_PROBABILITY_RANGE, SHOCK_SEVERITY_RANGE,
    VOLATILITY_RANGE,
};
pub use levers::{Lever, LeverGroup, LeverState};
pub use results::{
    ConfidenceBand, DistributionStats, FailureTrigger, Histogram, HistogramBucket,
    ImpactDirection, MetricSummary, MonteCarloResult, MonthlySnapshot, PathOutcome,
    PercentileSet, RUNWAY_CAP_MONTHS, SensitivityFactor, SingleSimulationResult,
};
pub use verdict::{
    CausalityChain, KillSwitch, OutcomeBuckets, RiskTier, ValuationRange, Verdict,
};
