//! Elasticity parameters: the stochastic-shock contract.
//!
//! These are consumed as read-only configuration. They may come from an
//! external "business fundamentals" derivation step or from [`Default`];
//! either way every field is clamped into an institutional range on
//! construction, so downstream code never re-validates them.

use serde::{Deserialize, Serialize};

/// Clamp range for monthly volatilities.
pub const VOLATILITY_RANGE: (f64, f64) = (0.04, 0.40);
/// Clamp range for the monthly shock-event probability.
pub const SHOCK_PROBABILITY_RANGE: (f64, f64) = (0.0, 0.25);
/// Clamp range for shock severities.
pub const SHOCK_SEVERITY_RANGE: (f64, f64) = (0.0, 0.60);
/// Clamp range for cross-correlations. Both correlations in this model are
/// negative: bad revenue months coincide with burn pressure and churn.
pub const CORRELATION_RANGE: (f64, f64) = (-0.95, -0.05);

/// Volatility, shock, and correlation parameters for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElasticityParameters {
    /// Monthly revenue volatility (fractional, e.g. 0.12 = 12%)
    pub revenue_volatility: f64,
    /// Monthly churn volatility
    pub churn_volatility: f64,
    /// Monthly burn volatility
    pub burn_volatility: f64,
    /// Probability of a discrete adverse shock in any given month
    pub shock_probability: f64,
    /// Multiplicative ARR penalty applied on a shock month
    pub shock_severity_revenue: f64,
    /// Multiplicative burn bonus applied on a shock month
    pub shock_severity_burn: f64,
    /// Correlation between the revenue and burn shocks
    pub revenue_burn_correlation: f64,
    /// Correlation between the revenue and churn shocks
    pub revenue_churn_correlation: f64,
}

impl Default for ElasticityParameters {
    fn default() -> Self {
        Self {
            revenue_volatility: 0.12,
            churn_volatility: 0.06,
            burn_volatility: 0.08,
            shock_probability: 0.08,
            shock_severity_revenue: 0.25,
            shock_severity_burn: 0.20,
            revenue_burn_correlation: -0.45,
            revenue_churn_correlation: -0.35,
        }
    }
}

#[inline]
fn clamp_to(value: f64, range: (f64, f64)) -> f64 {
    value.clamp(range.0, range.1)
}

impl ElasticityParameters {
    /// Build a parameter set with every field clamped into its sane range.
    ///
    /// Externally-derived parameters go through this so that a bad upstream
    /// mapping can never push the model into degenerate territory.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn clamped(
        revenue_volatility: f64,
        churn_volatility: f64,
        burn_volatility: f64,
        shock_probability: f64,
        shock_severity_revenue: f64,
        shock_severity_burn: f64,
        revenue_burn_correlation: f64,
        revenue_churn_correlation: f64,
    ) -> Self {
        Self {
            revenue_volatility: clamp_to(revenue_volatility, VOLATILITY_RANGE),
            churn_volatility: clamp_to(churn_volatility, VOLATILITY_RANGE),
            burn_volatility: clamp_to(burn_volatility, VOLATILITY_RANGE),
            shock_probability: clamp_to(shock_probability, SHOCK_PROBABILITY_RANGE),
            shock_severity_revenue: clamp_to(shock_severity_revenue, SHOCK_SEVERITY_RANGE),
            shock_severity_burn: clamp_to(shock_severity_burn, SHOCK_SEVERITY_RANGE),
            revenue_burn_correlation: clamp_to(revenue_burn_correlation, CORRELATION_RANGE),
            revenue_churn_correlation: clamp_to(revenue_churn_correlation, CORRELATION_RANGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_pulls_values_into_range() {
        let params = ElasticityParameters::clamped(0.9, 0.0, 0.10, 0.5, 1.2, -0.1, 0.3, -2.0);

        assert_eq!(params.revenue_volatility, 0.40);
        assert_eq!(params.churn_volatility, 0.04);
        assert_eq!(params.burn_volatility, 0.10);
        assert_eq!(params.shock_probability, 0.25);
        assert_eq!(params.shock_severity_revenue, 0.60);
        assert_eq!(params.shock_severity_burn, 0.0);
        assert_eq!(params.revenue_burn_correlation, -0.05);
        assert_eq!(params.revenue_churn_correlation, -0.95);
    }

    #[test]
    fn defaults_are_already_in_range() {
        let d = ElasticityParameters::default();
        let c = ElasticityParameters::clamped(
            d.revenue_volatility,
            d.churn_volatility,
            d.burn_volatility,
            d.shock_probability,
            d.shock_severity_revenue,
            d.shock_severity_burn,
            d.revenue_burn_correlation,
            d.revenue_churn_correlation,
        );
        assert_eq!(d, c);
    }
}
