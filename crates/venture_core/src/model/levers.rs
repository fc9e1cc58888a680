//! Strategic levers: the nine 0-100 scaled inputs that shape the model.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Identifies one of the nine strategic levers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lever {
    DemandStrength,
    PricingPower,
    ExpansionVelocity,
    CostDiscipline,
    HiringIntensity,
    OperatingDrag,
    MarketVolatility,
    ExecutionRisk,
    FundingPressure,
}

/// Conceptual grouping of levers, mirroring how the host dashboard lays
/// its controls out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeverGroup {
    Growth,
    Efficiency,
    Risk,
}

impl Lever {
    /// Every lever, in declaration order. The sensitivity sweep iterates this.
    pub const ALL: [Lever; 9] = [
        Lever::DemandStrength,
        Lever::PricingPower,
        Lever::ExpansionVelocity,
        Lever::CostDiscipline,
        Lever::HiringIntensity,
        Lever::OperatingDrag,
        Lever::MarketVolatility,
        Lever::ExecutionRisk,
        Lever::FundingPressure,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Lever::DemandStrength => "Demand Strength",
            Lever::PricingPower => "Pricing Power",
            Lever::ExpansionVelocity => "Expansion Velocity",
            Lever::CostDiscipline => "Cost Discipline",
            Lever::HiringIntensity => "Hiring Intensity",
            Lever::OperatingDrag => "Operating Drag",
            Lever::MarketVolatility => "Market Volatility",
            Lever::ExecutionRisk => "Execution Risk",
            Lever::FundingPressure => "Funding Pressure",
        }
    }

    #[must_use]
    pub fn group(&self) -> LeverGroup {
        match self {
            Lever::DemandStrength | Lever::PricingPower | Lever::ExpansionVelocity => {
                LeverGroup::Growth
            }
            Lever::CostDiscipline | Lever::HiringIntensity | Lever::OperatingDrag => {
                LeverGroup::Efficiency
            }
            Lever::MarketVolatility | Lever::ExecutionRisk | Lever::FundingPressure => {
                LeverGroup::Risk
            }
        }
    }
}

/// The nine strategic dials, each an integer in `[0, 100]`.
///
/// Immutable per simulation run; owned by the caller and passed by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeverState {
    pub demand_strength: u8,
    pub pricing_power: u8,
    pub expansion_velocity: u8,
    pub cost_discipline: u8,
    pub hiring_intensity: u8,
    pub operating_drag: u8,
    pub market_volatility: u8,
    pub execution_risk: u8,
    pub funding_pressure: u8,
}

impl Default for LeverState {
    /// Documented baseline scenario: a moderately growing company with
    /// middling efficiency and below-average risk exposure.
    fn default() -> Self {
        Self {
            demand_strength: 60,
            pricing_power: 55,
            expansion_velocity: 50,
            cost_discipline: 55,
            hiring_intensity: 50,
            operating_drag: 40,
            market_volatility: 50,
            execution_risk: 45,
            funding_pressure: 40,
        }
    }
}

impl LeverState {
    /// Read one lever by name.
    #[must_use]
    pub fn get(&self, lever: Lever) -> u8 {
        match lever {
            Lever::DemandStrength => self.demand_strength,
            Lever::PricingPower => self.pricing_power,
            Lever::ExpansionVelocity => self.expansion_velocity,
            Lever::CostDiscipline => self.cost_discipline,
            Lever::HiringIntensity => self.hiring_intensity,
            Lever::OperatingDrag => self.operating_drag,
            Lever::MarketVolatility => self.market_volatility,
            Lever::ExecutionRisk => self.execution_risk,
            Lever::FundingPressure => self.funding_pressure,
        }
    }

    /// Copy of this state with one lever replaced. Used by the sensitivity
    /// sweep to probe each dial independently.
    #[must_use]
    pub fn with_value(mut self, lever: Lever, value: u8) -> Self {
        match lever {
            Lever::DemandStrength => self.demand_strength = value,
            Lever::PricingPower => self.pricing_power = value,
            Lever::ExpansionVelocity => self.expansion_velocity = value,
            Lever::CostDiscipline => self.cost_discipline = value,
            Lever::HiringIntensity => self.hiring_intensity = value,
            Lever::OperatingDrag => self.operating_drag = value,
            Lever::MarketVolatility => self.market_volatility = value,
            Lever::ExecutionRisk => self.execution_risk = value,
            Lever::FundingPressure => self.funding_pressure = value,
        }
        self
    }

    /// Fractional value of a lever, `value / 100` in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn fraction(&self, lever: Lever) -> f64 {
        f64::from(self.get(lever)) / 100.0
    }

    /// Reject any lever outside the 0-100 scale before simulation starts.
    pub fn validate(&self) -> Result<()> {
        for lever in Lever::ALL {
            let value = self.get(lever);
            if value > 100 {
                return Err(SimulationError::LeverOutOfRange { lever, value });
            }
        }
        Ok(())
    }
}
