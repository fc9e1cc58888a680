//! Verdict & causality reduction
//!
//! A pure classification pipeline over one [`MonteCarloResult`]: risk tier,
//! outcome buckets, kill-switch detection, dominant failure causality, and
//! edge-case flags. No state is kept between invocations; recomputing the
//! verdict from the same aggregate always gives the same answer.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::{
    CausalityChain, FailureTrigger, KillSwitch, Lever, MonteCarloResult, OutcomeBuckets,
    PathOutcome, RUNWAY_CAP_MONTHS, RiskTier, ValuationRange, Verdict,
};
use crate::path::{BASE_GROWTH_RATE, effective_monthly_burn};
use crate::stats::{nearest_rank, percentile_set};

/// Classification thresholds, kept as configurable policy constants rather
/// than literals so they can be recalibrated without code changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerdictPolicy {
    /// Survival-rate percent edges for the risk tiers
    pub strong_survival_pct: f64,
    pub viable_survival_pct: f64,
    pub moderate_survival_pct: f64,
    /// Deaths at or before this month count as a crash
    pub early_crash_month: u32,
    /// Surviving valuation percentile above which a path is a breakout
    pub breakout_percentile: f64,
    /// Surviving valuation percentile below which a path merely survives
    pub survive_percentile: f64,
    /// Final cash below this also demotes a survivor to the survive bucket
    pub low_cash_floor: f64,
    /// Valuation = final ARR times this multiple
    pub valuation_multiple: f64,
    /// Burn kill-switch trips when effective burn exceeds monthly revenue
    /// times this multiple
    pub burn_multiple_threshold: f64,
    /// Hiring at or above this with discipline at or below
    /// `low_discipline_threshold` also trips the burn kill-switch
    pub high_hiring_threshold: u8,
    pub low_discipline_threshold: u8,
    /// Demand strength below this routes to the revenue kill-switch
    pub weak_demand_threshold: u8,
    /// Minimum acceptable lever-implied monthly growth
    pub min_monthly_growth: f64,
    /// Minimum acceptable runway for the fallback kill-switch
    pub min_runway_months: f64,
    /// Survival rate at or above this flags the run as overly optimistic
    pub overly_optimistic_survival: f64,
    /// All buckets within this many points of 25% flags high uncertainty
    pub uncertainty_tolerance: f64,
}

impl Default for VerdictPolicy {
    fn default() -> Self {
        Self {
            strong_survival_pct: 85.0,
            viable_survival_pct: 65.0,
            moderate_survival_pct: 40.0,
            early_crash_month: 18,
            breakout_percentile: 85.0,
            survive_percentile: 25.0,
            low_cash_floor: 500_000.0,
            valuation_multiple: 6.0,
            burn_multiple_threshold: 1.5,
            high_hiring_threshold: 70,
            low_discipline_threshold: 40,
            weak_demand_threshold: 45,
            min_monthly_growth: 0.02,
            min_runway_months: 12.0,
            overly_optimistic_survival: 0.95,
            uncertainty_tolerance: 8.0,
        }
    }
}

/// Reduce a Monte Carlo aggregate to its narrative verdict.
#[must_use]
pub fn reduce_verdict(result: &MonteCarloResult, policy: &VerdictPolicy) -> Verdict {
    let risk_tier = classify_tier(result.survival_rate * 100.0, policy);
    let (buckets, valuation_range) = classify_buckets(result, policy);
    let kill_switch = detect_kill_switch(result, policy);
    let causality = build_causality(result);

    let is_overly_optimistic = result.survival_rate >= policy.overly_optimistic_survival;
    let is_high_uncertainty = [
        buckets.crash,
        buckets.survive,
        buckets.grow,
        buckets.breakout,
    ]
    .iter()
    .all(|&pct| (f64::from(pct) - 25.0).abs() <= policy.uncertainty_tolerance);
    let is_kill_switch_violated = kill_switch.is_violated;

    Verdict {
        risk_tier,
        buckets,
        valuation_range,
        kill_switch,
        causality,
        is_overly_optimistic,
        is_high_uncertainty,
        is_kill_switch_violated,
    }
}

fn classify_tier(survival_pct: f64, policy: &VerdictPolicy) -> RiskTier {
    if survival_pct >= policy.strong_survival_pct {
        RiskTier::Strong
    } else if survival_pct >= policy.viable_survival_pct {
        RiskTier::Viable
    } else if survival_pct >= policy.moderate_survival_pct {
        RiskTier::Moderate
    } else {
        RiskTier::HighRisk
    }
}

/// Classify every path into exactly one bucket and derive the surviving
/// valuation range.
fn classify_buckets(
    result: &MonteCarloResult,
    policy: &VerdictPolicy,
) -> (OutcomeBuckets, ValuationRange) {
    let n = result.paths.len();

    let surviving_valuations: Vec<f64> = result
        .surviving_paths()
        .map(|p| p.final_arr * policy.valuation_multiple)
        .collect();
    let mut sorted_valuations = surviving_valuations.clone();
    sorted_valuations.sort_by(f64::total_cmp);

    let breakout_cut = nearest_rank(&sorted_valuations, policy.breakout_percentile);
    let survive_cut = nearest_rank(&sorted_valuations, policy.survive_percentile);

    let mut crash = 0usize;
    let mut survive = 0usize;
    let mut breakout = 0usize;
    for path in &result.paths {
        if !path.survived || path.month_of_death.is_some_and(|m| m <= policy.early_crash_month) {
            crash += 1;
            continue;
        }
        let valuation = path.final_arr * policy.valuation_multiple;
        if !sorted_valuations.is_empty() && valuation >= breakout_cut {
            breakout += 1;
        } else if valuation <= survive_cut || path.final_cash < policy.low_cash_floor {
            survive += 1;
        }
        // everything else is grow, counted as the remainder below
    }

    // Floored integer percentages; the rounding shortfall is deliberately
    // added to the grow bucket so the four always total exactly 100
    let crash_pct = (crash * 100 / n) as u8;
    let survive_pct = (survive * 100 / n) as u8;
    let breakout_pct = (breakout * 100 / n) as u8;
    let grow_pct = 100 - crash_pct - survive_pct - breakout_pct;

    let band = percentile_set(&surviving_valuations);
    let valuation_range = ValuationRange {
        low: band.p10,
        high: band.p90,
    };

    (
        OutcomeBuckets {
            crash: crash_pct,
            survive: survive_pct,
            grow: grow_pct,
            breakout: breakout_pct,
        },
        valuation_range,
    )
}

/// Fraction of failed paths attributed to the given trigger.
fn failure_share(result: &MonteCarloResult, trigger: FailureTrigger) -> f64 {
    let failed: Vec<&PathOutcome> = result.failed_paths().collect();
    if failed.is_empty() {
        return 0.0;
    }
    let hits = failed
        .iter()
        .filter(|p| p.failure_trigger == Some(trigger))
        .count();
    hits as f64 / failed.len() as f64
}

/// Inspect the failed-path population and name the single constraint most
/// responsible. Branch chain: no failures (hypothetical burn threshold) ->
/// burn rate -> demand-driven revenue -> runway buffer fallback. Every
/// branch fills all fields; none of them are optional diagnostics.
fn detect_kill_switch(result: &MonteCarloResult, policy: &VerdictPolicy) -> KillSwitch {
    let levers = result.levers;
    let effective_burn =
        effective_monthly_burn(levers, result.starting_monthly_burn, result.starting_arr);
    let monthly_revenue = result.starting_arr / 12.0;
    let burn_threshold = monthly_revenue * policy.burn_multiple_threshold;
    let failure_rate = 1.0 - result.survival_rate;

    let any_failed = result.failed_paths().next().is_some();
    if !any_failed {
        return KillSwitch {
            metric: "Burn Rate".to_string(),
            current_value: effective_burn,
            threshold: burn_threshold,
            estimated_survival_drop: 0.0,
            recommendation: format!(
                "No simulated failures. Keep effective monthly burn below ${:.0} to stay in this regime.",
                burn_threshold
            ),
            is_violated: false,
        };
    }

    let hiring_heavy = levers.hiring_intensity >= policy.high_hiring_threshold
        && levers.cost_discipline <= policy.low_discipline_threshold;
    if effective_burn > burn_threshold || hiring_heavy {
        let drop = (failure_rate * failure_share(result, FailureTrigger::BurnSpike)).max(0.05);
        return KillSwitch {
            metric: "Burn Rate".to_string(),
            current_value: effective_burn,
            threshold: burn_threshold,
            estimated_survival_drop: drop,
            recommendation: format!(
                "Effective monthly burn of ${:.0} exceeds the sustainable ceiling of ${:.0}. Slow hiring or raise cost discipline.",
                effective_burn, burn_threshold
            ),
            is_violated: true,
        };
    }

    if levers.demand_strength < policy.weak_demand_threshold {
        let implied_growth = levers.fraction(Lever::DemandStrength) * BASE_GROWTH_RATE;
        let drop = (failure_rate * failure_share(result, FailureTrigger::RevenueMiss)).max(0.05);
        return KillSwitch {
            metric: "Revenue Growth".to_string(),
            current_value: implied_growth,
            threshold: policy.min_monthly_growth,
            estimated_survival_drop: drop,
            recommendation: format!(
                "Lever-implied monthly growth of {:.1}% sits below the {:.1}% floor. Demand strength is the binding constraint.",
                implied_growth * 100.0,
                policy.min_monthly_growth * 100.0
            ),
            is_violated: implied_growth < policy.min_monthly_growth,
        };
    }

    let net_burn = effective_burn - monthly_revenue;
    let current_runway = if net_burn > 0.0 {
        (result.starting_cash / net_burn).min(RUNWAY_CAP_MONTHS)
    } else {
        RUNWAY_CAP_MONTHS
    };
    let drop = (failure_rate * failure_share(result, FailureTrigger::FundingGap)).max(0.05);
    KillSwitch {
        metric: "Runway Buffer".to_string(),
        current_value: current_runway,
        threshold: policy.min_runway_months,
        estimated_survival_drop: drop,
        recommendation: format!(
            "Starting runway of {:.0} months against a {:.0}-month floor. Extend the buffer before funding pressure compounds.",
            current_runway, policy.min_runway_months
        ),
        is_violated: current_runway < policy.min_runway_months,
    }
}

/// Fixed five-step narrative for each failure mode.
fn trigger_steps(trigger: FailureTrigger) -> [&'static str; 5] {
    match trigger {
        FailureTrigger::MarketShock => [
            "External market shock hits within the first 18 months",
            "Revenue takes an immediate multiplicative hit",
            "Burn spikes while commitments are renegotiated",
            "Cash reserves drain faster than planned",
            "Company runs out of cash before recovery",
        ],
        FailureTrigger::BurnSpike => [
            "Headcount and operating costs ramp ahead of revenue",
            "Burn repeatedly exceeds its planned base",
            "Net burn turns sharply negative",
            "Runway compresses below the reaction window",
            "Cash hits zero before costs can be cut",
        ],
        FailureTrigger::RevenueMiss => [
            "Monthly growth lands below plan for months at a stretch",
            "ARR stalls while costs stay committed",
            "Net burn widens month over month",
            "Cash buffer erodes steadily",
            "Company fails without a single dramatic event",
        ],
        FailureTrigger::ChurnSpiral => [
            "Churn climbs above sustainable levels",
            "Expansion revenue cannot offset the leak",
            "ARR compounds downward",
            "Fixed costs stay anchored to the former peak",
            "Cash runs out as the book shrinks",
        ],
        FailureTrigger::FundingGap => [
            "Cash declines gradually with no single dominant cause",
            "Runway shortens below the fundraising window",
            "Funding pressure forces defensive decisions",
            "Growth slows exactly when capital is needed",
            "The round does not close before cash hits zero",
        ],
    }
}

/// Tie-break order when two triggers claim the same number of failures:
/// the classification priority order.
const TRIGGER_PRIORITY: [FailureTrigger; 5] = [
    FailureTrigger::MarketShock,
    FailureTrigger::BurnSpike,
    FailureTrigger::RevenueMiss,
    FailureTrigger::ChurnSpiral,
    FailureTrigger::FundingGap,
];

/// Tally failure triggers and narrate the most common pathway.
fn build_causality(result: &MonteCarloResult) -> Option<CausalityChain> {
    let mut tally: FxHashMap<FailureTrigger, usize> = FxHashMap::default();
    let mut failed = 0usize;
    for path in result.failed_paths() {
        failed += 1;
        if let Some(trigger) = path.failure_trigger {
            *tally.entry(trigger).or_insert(0) += 1;
        }
    }
    if failed == 0 {
        return None;
    }

    // max_by_key keeps the last maximal element, so walking the priority
    // list in reverse makes the highest-priority trigger win ties
    let dominant = TRIGGER_PRIORITY
        .into_iter()
        .rev()
        .max_by_key(|t| tally.get(t).copied().unwrap_or(0))?;
    let count = tally.get(&dominant).copied().unwrap_or(0);
    let share = count as f64 / failed as f64;

    let steps = trigger_steps(dominant)
        .into_iter()
        .map(str::to_string)
        .collect();
    let summary = format!(
        "{:.0}% of failed paths trace back to a {}; the chain below is the most common route from that trigger to running out of cash.",
        share * 100.0,
        dominant.label()
    );

    Some(CausalityChain {
        trigger: dominant,
        share_of_failures: share,
        steps,
        summary,
    })
}
