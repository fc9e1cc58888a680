//! Monte Carlo scenario engine for venture outcome planning
//!
//! This crate is the computational core behind a business-scenario-planning
//! dashboard. It takes nine strategic levers (0-100 dials such as demand
//! strength, cost discipline, execution risk) plus a starting financial
//! position and produces a distribution of futures:
//! - survival probability and a month-by-month survival curve
//! - ARR / cash / runway percentile bands and histograms
//! - a sensitivity ranking of the levers
//! - a reduced narrative verdict (risk tier, dominant failure cause,
//!   kill-switch threshold)
//!
//! The engine is a pure function of its inputs. Randomness is explicit and
//! seeded per iteration (`master_seed + index`), so any run can be
//! reproduced bit-for-bit, and iterations can be distributed across threads
//! without changing the output.
//!
//! ```ignore
//! use venture_core::{LeverState, SimulationConfig, run_monte_carlo, reduce_verdict, VerdictPolicy};
//!
//! let config = SimulationConfig {
//!     starting_cash: 4_000_000.0,
//!     starting_arr: 4_800_000.0,
//!     starting_monthly_burn: 47_000.0,
//!     seed: Some(12_345),
//!     ..Default::default()
//! };
//!
//! let result = run_monte_carlo(LeverState::default(), &config)?;
//! let verdict = reduce_verdict(&result, &VerdictPolicy::default());
//! println!("{} ({:.0}% survive)", verdict.risk_tier.label(), result.survival_rate * 100.0);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod path;
pub mod random;
pub mod sensitivity;
pub mod simulation;
pub mod stats;
pub mod verdict;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::SimulationError;
pub use model::{
    ElasticityParameters, Lever, LeverState, MonteCarloResult, SimulationConfig, Verdict,
};
pub use simulation::{RunProgress, run_monte_carlo, run_monte_carlo_with_progress};
pub use verdict::{VerdictPolicy, reduce_verdict};
