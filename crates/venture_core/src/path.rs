//! Single-path simulator
//!
//! Evolves one company's monthly state (ARR, cash, burn) over the horizon
//! under correlated random shocks, yielding one [`SingleSimulationResult`].
//! Identical levers, config, elasticity, and stream seed produce a
//! bit-identical result; the orchestrator relies on this for reproducibility.

use crate::model::{
    ElasticityParameters, FailureTrigger, LeverState, MonthlySnapshot, RUNWAY_CAP_MONTHS,
    SimulationConfig, SingleSimulationResult,
};
use crate::random::RandomStream;

// Growth model scaling. A lever at 100 contributes its full rate.
pub(crate) const BASE_GROWTH_RATE: f64 = 0.04;
const EXPANSION_BOOST_RATE: f64 = 0.02;
const PRICING_SWING: f64 = 0.2;

// Churn model. Base monthly churn rises with operating drag and is capped so
// a single bad draw cannot wipe out the book.
const BASE_MONTHLY_CHURN: f64 = 0.015;
const DRAG_CHURN_RATE: f64 = 0.01;
const MAX_MONTHLY_CHURN: f64 = 0.15;

// Burn model. Staffing cost is anchored to peak ARR: companies hire for the
// growth they have seen, and that cost is sticky when revenue retreats.
const HIRING_SURGE_RATE: f64 = 1.0;
const OPERATING_DRAG_RATE: f64 = 0.5;
const COST_DISCIPLINE_SAVINGS: f64 = 0.25;
const BURN_FLOOR_FRACTION: f64 = 0.5;

// Desperation feedback: late fundraising under pressure starves growth once
// cash falls below this fraction of the starting position.
const DESPERATION_CASH_FRACTION: f64 = 0.3;
const DESPERATION_PRESSURE_THRESHOLD: u8 = 60;
const DESPERATION_GROWTH_PENALTY: f64 = 0.03;

// Failure-trigger classification thresholds.
const MARKET_SHOCK_WINDOW_MONTHS: u32 = 18;
const BURN_SPIKE_MONTHS: u32 = 3;
const BURN_SPIKE_RATIO: f64 = 1.15;
const REVENUE_SHORTFALL_MONTHS: u32 = 4;
const REVENUE_SHORTFALL_GROWTH: f64 = -0.02;
const ELEVATED_CHURN_MONTHS: u32 = 3;
const ELEVATED_CHURN_RATE: f64 = 0.04;

/// Unshocked monthly burn implied by the current levers at a given ARR
/// watermark: fixed burn plus peak-anchored staffing cost, minus
/// cost-discipline savings. Shared with the verdict reducer's kill-switch
/// estimate.
#[must_use]
pub(crate) fn effective_monthly_burn(levers: LeverState, fixed_burn: f64, peak_arr: f64) -> f64 {
    use crate::model::Lever;

    let staffing_rate = levers.fraction(Lever::HiringIntensity) * HIRING_SURGE_RATE
        + levers.fraction(Lever::OperatingDrag) * OPERATING_DRAG_RATE;
    let staffing = peak_arr / 12.0 * staffing_rate;
    let savings = 1.0 - levers.fraction(Lever::CostDiscipline) * COST_DISCIPLINE_SAVINGS;

    (fixed_burn + staffing) * savings
}

/// What the simulator observed along one path, fed into the failure-trigger
/// rule list at time of death.
#[derive(Debug, Default, Clone, Copy)]
struct PathDiagnostics {
    shock_in_window: bool,
    burn_spike_months: u32,
    revenue_shortfall_months: u32,
    elevated_churn_months: u32,
}

/// Ordered rule list, evaluated top-down; first matching rule wins and
/// `FundingGap` is the catch-all.
fn classify_failure(diag: &PathDiagnostics) -> FailureTrigger {
    let rules = [
        (FailureTrigger::MarketShock, diag.shock_in_window),
        (FailureTrigger::BurnSpike, diag.burn_spike_months >= BURN_SPIKE_MONTHS),
        (
            FailureTrigger::RevenueMiss,
            diag.revenue_shortfall_months >= REVENUE_SHORTFALL_MONTHS,
        ),
        (
            FailureTrigger::ChurnSpiral,
            diag.elevated_churn_months >= ELEVATED_CHURN_MONTHS,
        ),
    ];

    rules
        .into_iter()
        .find_map(|(trigger, hit)| hit.then_some(trigger))
        .unwrap_or(FailureTrigger::FundingGap)
}

/// Simulate one path month-by-month until death or the end of the horizon.
#[must_use]
pub fn simulate_path(
    levers: LeverState,
    config: &SimulationConfig,
    elasticity: &ElasticityParameters,
    id: usize,
    stream: &mut RandomStream,
) -> SingleSimulationResult {
    use crate::model::Lever;

    let mut arr = config.starting_arr;
    let mut cash = config.starting_cash;
    let mut peak_arr = arr;
    let mut lowest_cash = cash;

    // Lever-derived model inputs, constant along the path
    let base_growth = levers.fraction(Lever::DemandStrength) * BASE_GROWTH_RATE;
    let expansion_boost = levers.fraction(Lever::ExpansionVelocity) * EXPANSION_BOOST_RATE;
    let pricing_multiplier =
        1.0 + (f64::from(levers.pricing_power) - 50.0) / 100.0 * PRICING_SWING;
    let base_churn = BASE_MONTHLY_CHURN + levers.fraction(Lever::OperatingDrag) * DRAG_CHURN_RATE;

    let revenue_vol =
        elasticity.revenue_volatility * (0.5 + levers.fraction(Lever::MarketVolatility));
    let shock_probability =
        elasticity.shock_probability * (0.5 + levers.fraction(Lever::ExecutionRisk));

    let rho_burn = elasticity.revenue_burn_correlation;
    let rho_churn = elasticity.revenue_churn_correlation;

    let mut months = Vec::with_capacity(config.horizon_months as usize);
    let mut diag = PathDiagnostics::default();
    let mut month_of_death = None;
    let mut failure_trigger = None;

    for month in 1..=config.horizon_months {
        // Correlated shocks: 2x2 Cholesky construction so bad revenue months
        // tend to coincide with burn pressure (and, separately, churn)
        let z1 = stream.standard_normal();
        let z2 = stream.standard_normal();
        let z3 = stream.standard_normal();

        let revenue_shock = z1 * revenue_vol;
        let burn_shock =
            (rho_burn * z1 + (1.0 - rho_burn * rho_burn).sqrt() * z2) * elasticity.burn_volatility;
        let churn_shock = (rho_churn * z1 + (1.0 - rho_churn * rho_churn).sqrt() * z3)
            * elasticity.churn_volatility;

        let shock_event = stream.bernoulli(shock_probability);
        if shock_event && month <= MARKET_SHOCK_WINDOW_MONTHS {
            diag.shock_in_window = true;
        }

        let churn = (base_churn + churn_shock).clamp(0.0, MAX_MONTHLY_CHURN);
        if churn > ELEVATED_CHURN_RATE {
            diag.elevated_churn_months += 1;
        }

        let desperation = if levers.funding_pressure > DESPERATION_PRESSURE_THRESHOLD
            && cash < config.starting_cash * DESPERATION_CASH_FRACTION
        {
            levers.fraction(Lever::FundingPressure) * DESPERATION_GROWTH_PENALTY
        } else {
            0.0
        };

        let growth =
            (base_growth + expansion_boost) * pricing_multiplier + revenue_shock - churn
                - desperation;
        if growth < REVENUE_SHORTFALL_GROWTH {
            diag.revenue_shortfall_months += 1;
        }

        arr *= 1.0 + growth;
        if shock_event {
            arr *= 1.0 - elasticity.shock_severity_revenue;
        }
        arr = arr.max(0.0);
        peak_arr = peak_arr.max(arr);

        let burn_base = effective_monthly_burn(levers, config.starting_monthly_burn, peak_arr);
        let mut burn = burn_base * (1.0 + burn_shock);
        if shock_event {
            burn *= 1.0 + elasticity.shock_severity_burn;
        }
        burn = burn.max(burn_base * BURN_FLOOR_FRACTION);
        if burn > burn_base * BURN_SPIKE_RATIO {
            diag.burn_spike_months += 1;
        }

        let monthly_revenue = arr / 12.0;
        cash += monthly_revenue - burn;
        lowest_cash = lowest_cash.min(cash);

        let runway_months = if burn > monthly_revenue {
            (cash / (burn - monthly_revenue)).clamp(0.0, RUNWAY_CAP_MONTHS)
        } else {
            RUNWAY_CAP_MONTHS
        };

        months.push(MonthlySnapshot {
            month,
            arr,
            cash,
            burn,
            runway_months,
            growth_rate: growth,
        });

        if cash <= 0.0 {
            month_of_death = Some(month);
            failure_trigger = Some(classify_failure(&diag));
            break;
        }
    }

    // horizon >= 1 is validated upstream, so at least one snapshot exists
    let last = months.last().copied().unwrap_or(MonthlySnapshot {
        month: 0,
        arr,
        cash,
        burn: 0.0,
        runway_months: RUNWAY_CAP_MONTHS,
        growth_rate: 0.0,
    });

    SingleSimulationResult {
        id,
        final_arr: last.arr,
        final_cash: last.cash,
        final_runway: last.runway_months,
        survived: month_of_death.is_none(),
        month_of_death,
        failure_trigger,
        peak_arr,
        lowest_cash,
        achieved_target: last.arr >= config.starting_arr * 2.0,
        months,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            iterations: 1,
            horizon_months: 36,
            starting_cash: 500_000.0,
            starting_arr: 600_000.0,
            starting_monthly_burn: 40_000.0,
            seed: Some(7),
            elasticity: None,
        }
    }

    #[test]
    fn same_seed_same_trajectory() {
        let config = small_config();
        let elasticity = config.effective_elasticity();

        let a = simulate_path(
            LeverState::default(),
            &config,
            &elasticity,
            0,
            &mut RandomStream::new(123),
        );
        let b = simulate_path(
            LeverState::default(),
            &config,
            &elasticity,
            0,
            &mut RandomStream::new(123),
        );

        assert_eq!(a, b);
    }

    #[test]
    fn classification_rules_fire_in_priority_order() {
        let all = PathDiagnostics {
            shock_in_window: true,
            burn_spike_months: 10,
            revenue_shortfall_months: 10,
            elevated_churn_months: 10,
        };
        assert_eq!(classify_failure(&all), FailureTrigger::MarketShock);

        let no_shock = PathDiagnostics {
            shock_in_window: false,
            ..all
        };
        assert_eq!(classify_failure(&no_shock), FailureTrigger::BurnSpike);

        let quiet = PathDiagnostics::default();
        assert_eq!(classify_failure(&quiet), FailureTrigger::FundingGap);
    }

    #[test]
    fn effective_burn_responds_to_levers() {
        let base = LeverState::default();
        let burn = effective_monthly_burn(base, 50_000.0, 1_200_000.0);

        let lean = effective_monthly_burn(base.with_value(crate::model::Lever::CostDiscipline, 100), 50_000.0, 1_200_000.0);
        assert!(lean < burn);

        let heavy = effective_monthly_burn(base.with_value(crate::model::Lever::HiringIntensity, 100), 50_000.0, 1_200_000.0);
        assert!(heavy > burn);
    }
}
