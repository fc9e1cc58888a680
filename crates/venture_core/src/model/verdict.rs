//! Verdict types: the reduced narrative classification of a Monte Carlo
//! aggregate. Stateless and recomputed on demand; nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::model::FailureTrigger;

/// Qualitative risk tier from survival-rate thresholds.
///
/// Edges are part of the contract: >= 85% Strong, >= 65% Viable,
/// >= 40% Moderate, else HighRisk. No interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Strong,
    Viable,
    Moderate,
    HighRisk,
}

impl RiskTier {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Strong => "Strong",
            RiskTier::Viable => "Viable",
            RiskTier::Moderate => "Moderate",
            RiskTier::HighRisk => "High-Risk",
        }
    }
}

/// Integer percentages of paths per outcome bucket. Always sums to exactly
/// 100: the three non-grow buckets are floored and any rounding shortfall
/// lands in `grow` (a deliberate tie-break, not a bug).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeBuckets {
    pub crash: u8,
    pub survive: u8,
    pub grow: u8,
    pub breakout: u8,
}

impl OutcomeBuckets {
    #[must_use]
    pub fn total(&self) -> u32 {
        u32::from(self.crash) + u32::from(self.survive) + u32::from(self.grow)
            + u32::from(self.breakout)
    }
}

/// Valuation spread among surviving paths (p10 to p90).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValuationRange {
    pub low: f64,
    pub high: f64,
}

/// The single constraint judged most responsible for simulated failures.
///
/// Every field is mandatory output: a kill-switch without a threshold or a
/// recommendation is useless to the host dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillSwitch {
    /// Metric name, e.g. "Burn Rate"
    pub metric: String,
    pub current_value: f64,
    pub threshold: f64,
    /// Estimated survival-rate drop attributable to this constraint
    pub estimated_survival_drop: f64,
    pub recommendation: String,
    pub is_violated: bool,
}

/// The dominant failure pathway across failed paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalityChain {
    pub trigger: FailureTrigger,
    /// Fraction of all failures attributed to this trigger
    pub share_of_failures: f64,
    /// Fixed five-step narrative of how this failure mode unfolds
    pub steps: Vec<String>,
    pub summary: String,
}

/// The reduced verdict over one Monte Carlo aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub risk_tier: RiskTier,
    pub buckets: OutcomeBuckets,
    pub valuation_range: ValuationRange,
    pub kill_switch: KillSwitch,
    /// `None` when no path failed
    pub causality: Option<CausalityChain>,
    /// Survival >= 95%: the inputs are probably rosier than reality
    pub is_overly_optimistic: bool,
    /// All four buckets within 8 points of a uniform 25% split: the
    /// distribution is nearly uninformative
    pub is_high_uncertainty: bool,
    pub is_kill_switch_violated: bool,
}
