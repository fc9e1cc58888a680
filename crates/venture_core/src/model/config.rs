//! Simulation configuration and fail-fast validation.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::model::ElasticityParameters;

/// Seed used when the caller does not pin one. A fixed constant rather than
/// an entropy source so that "no seed" still means "reproducible".
pub const DEFAULT_SEED: u64 = 424_242;

pub const DEFAULT_ITERATIONS: usize = 10_000;
pub const DEFAULT_HORIZON_MONTHS: u32 = 36;

/// Everything needed to run one Monte Carlo batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of independent paths to simulate
    pub iterations: usize,
    /// Months simulated per path
    pub horizon_months: u32,
    /// Cash on hand at month 0, in dollars
    pub starting_cash: f64,
    /// Annualized recurring revenue at month 0, in dollars
    pub starting_arr: f64,
    /// Fixed monthly burn at month 0, in dollars
    pub starting_monthly_burn: f64,
    /// Master seed; `None` falls back to [`DEFAULT_SEED`]
    pub seed: Option<u64>,
    /// Shock parameters; `None` falls back to the institutional defaults
    pub elasticity: Option<ElasticityParameters>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            starting_cash: 2_000_000.0,
            starting_arr: 1_200_000.0,
            starting_monthly_burn: 80_000.0,
            seed: None,
            elasticity: None,
        }
    }
}

impl SimulationConfig {
    /// The seed actually used for iteration 0.
    #[must_use]
    pub fn master_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// The elasticity parameters actually used, defaults applied.
    #[must_use]
    pub fn effective_elasticity(&self) -> ElasticityParameters {
        self.elasticity.unwrap_or_default()
    }

    /// Reject bad configuration before any iteration runs.
    pub fn validate(&self) -> Result<()> {
        if self.iterations < 1 {
            return Err(SimulationError::InvalidIterations(self.iterations));
        }
        if self.horizon_months < 1 {
            return Err(SimulationError::InvalidHorizon(self.horizon_months));
        }

        let financials = [
            ("starting cash", self.starting_cash),
            ("starting ARR", self.starting_arr),
            ("starting monthly burn", self.starting_monthly_burn),
        ];
        for (field, value) in financials {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidFinancials { field, value });
            }
        }

        Ok(())
    }
}
