use std::fmt;

use crate::model::Lever;

/// Errors surfaced by the simulation engine.
///
/// Configuration problems are rejected before the first iteration runs; there
/// are no recoverable mid-run failures. `Cancelled` is returned when a host
/// flips the cancellation flag on a [`crate::simulation::RunProgress`].
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Iteration count must be at least 1
    InvalidIterations(usize),
    /// Time horizon must be at least 1 month
    InvalidHorizon(u32),
    /// A lever value fell outside the [0, 100] scale
    LeverOutOfRange { lever: Lever, value: u8 },
    /// A starting financial parameter was negative or non-finite
    InvalidFinancials { field: &'static str, value: f64 },
    /// Monte Carlo run was cancelled by host request
    Cancelled,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidIterations(n) => {
                write!(f, "iteration count must be >= 1, got {n}")
            }
            SimulationError::InvalidHorizon(months) => {
                write!(f, "horizon must be >= 1 month, got {months}")
            }
            SimulationError::LeverOutOfRange { lever, value } => {
                write!(f, "lever {} out of range: {value} (expected 0-100)", lever.label())
            }
            SimulationError::InvalidFinancials { field, value } => {
                write!(f, "invalid {field}: {value} (expected a non-negative finite value)")
            }
            SimulationError::Cancelled => write!(f, "simulation cancelled"),
        }
    }
}

impl std::error::Error for SimulationError {}

pub type Result<T> = std::result::Result<T, SimulationError>;
