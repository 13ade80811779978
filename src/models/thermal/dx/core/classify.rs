//! Rating tables: flow velocity, freeze risk and overall adequacy.

use std::fmt;

use serde::Serialize;
use uom::si::{f64::Velocity, velocity::meter_per_second};

/// Freeze margin above which the risk is low, K.
pub const LOW_FREEZE_RISK_MARGIN: f64 = 5.0;

/// Freeze margin above which the risk is medium, K.
pub const MEDIUM_FREEZE_RISK_MARGIN: f64 = 2.0;

/// Flow regimes with their own recommended velocity ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowType {
    RefrigerantVapor,
    RefrigerantTwoPhase,
    RefrigerantLiquid,
    SecondaryShellSide,
}

impl FlowType {
    /// Recommended velocity range for this flow.
    #[must_use]
    pub fn range(self) -> VelocityRange {
        let (min, optimum, max) = match self {
            FlowType::RefrigerantVapor => (5.0, 10.0, 20.0),
            FlowType::RefrigerantTwoPhase => (2.0, 5.0, 10.0),
            FlowType::RefrigerantLiquid => (0.5, 1.0, 2.0),
            FlowType::SecondaryShellSide => (0.3, 1.0, 2.5),
        };
        VelocityRange {
            min: Velocity::new::<meter_per_second>(min),
            optimum: Velocity::new::<meter_per_second>(optimum),
            max: Velocity::new::<meter_per_second>(max),
        }
    }

    /// Classifies a velocity against this flow's recommended range.
    #[must_use]
    pub fn classify(self, velocity: Velocity) -> VelocityStatus {
        self.range().classify(velocity)
    }
}

/// Recommended velocities for one flow type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityRange {
    pub min: Velocity,
    pub optimum: Velocity,
    pub max: Velocity,
}

impl VelocityRange {
    #[must_use]
    pub fn classify(&self, velocity: Velocity) -> VelocityStatus {
        if velocity < self.min {
            VelocityStatus::TooLow
        } else if velocity < self.optimum {
            VelocityStatus::Low
        } else if velocity <= self.max {
            VelocityStatus::Optimal
        } else {
            VelocityStatus::TooHigh
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VelocityStatus {
    #[serde(rename = "Too Low")]
    TooLow,
    Low,
    Optimal,
    #[serde(rename = "Too High")]
    TooHigh,
}

impl VelocityStatus {
    /// Returns `true` outside the recommended range.
    #[must_use]
    pub fn is_extreme(self) -> bool {
        matches!(self, VelocityStatus::TooLow | VelocityStatus::TooHigh)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            VelocityStatus::TooLow => "Too Low",
            VelocityStatus::Low => "Low",
            VelocityStatus::Optimal => "Optimal",
            VelocityStatus::TooHigh => "Too High",
        }
    }
}

impl fmt::Display for VelocityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk of freezing the secondary fluid at its outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FreezeRisk {
    Low,
    Medium,
    High,
}

impl FreezeRisk {
    /// Classifies the margin `T_outlet − T_freeze` in kelvin.
    #[must_use]
    pub fn from_margin(margin: f64) -> Self {
        if margin > LOW_FREEZE_RISK_MARGIN {
            FreezeRisk::Low
        } else if margin > MEDIUM_FREEZE_RISK_MARGIN {
            FreezeRisk::Medium
        } else {
            FreezeRisk::High
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FreezeRisk::Low => "Low",
            FreezeRisk::Medium => "Medium",
            FreezeRisk::High => "High",
        }
    }
}

impl fmt::Display for FreezeRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Overall rating of a candidate design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DesignVerdict {
    Adequate,
    Marginal,
    Inadequate,
}

/// Minimum duty ratio, area ratio and effectiveness for each verdict.
const ADEQUATE: [f64; 3] = [0.85, 0.9, 0.3];
const MARGINAL: [f64; 3] = [0.70, 0.75, 0.2];

impl DesignVerdict {
    /// Rates a design from its duty ratio, area ratio and overall effectiveness.
    #[must_use]
    pub fn classify(duty_ratio: f64, area_ratio: f64, effectiveness: f64) -> Self {
        let meets = |[duty, area, eff]: [f64; 3]| {
            duty_ratio >= duty && area_ratio >= area && effectiveness >= eff
        };

        if meets(ADEQUATE) {
            DesignVerdict::Adequate
        } else if meets(MARGINAL) {
            DesignVerdict::Marginal
        } else {
            DesignVerdict::Inadequate
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DesignVerdict::Adequate => "Adequate",
            DesignVerdict::Marginal => "Marginal",
            DesignVerdict::Inadequate => "Inadequate",
        }
    }
}

impl fmt::Display for DesignVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speed(value: f64) -> Velocity {
        Velocity::new::<meter_per_second>(value)
    }

    #[test]
    fn velocity_bands() {
        let vapor = FlowType::RefrigerantVapor;
        assert_eq!(vapor.classify(speed(4.9)), VelocityStatus::TooLow);
        assert_eq!(vapor.classify(speed(5.0)), VelocityStatus::Low);
        assert_eq!(vapor.classify(speed(10.0)), VelocityStatus::Optimal);
        assert_eq!(vapor.classify(speed(20.0)), VelocityStatus::Optimal);
        assert_eq!(vapor.classify(speed(20.1)), VelocityStatus::TooHigh);

        let shell = FlowType::SecondaryShellSide;
        assert_eq!(shell.classify(speed(0.1)), VelocityStatus::TooLow);
        assert_eq!(shell.classify(speed(1.5)), VelocityStatus::Optimal);
    }

    #[test]
    fn freeze_risk_bands() {
        assert_eq!(FreezeRisk::from_margin(8.0), FreezeRisk::Low);
        assert_eq!(FreezeRisk::from_margin(5.0), FreezeRisk::Medium);
        assert_eq!(FreezeRisk::from_margin(2.5), FreezeRisk::Medium);
        assert_eq!(FreezeRisk::from_margin(2.0), FreezeRisk::High);
        assert_eq!(FreezeRisk::from_margin(-1.0), FreezeRisk::High);
    }

    #[test]
    fn verdict_boundaries_are_inclusive() {
        assert_eq!(DesignVerdict::classify(0.85, 1.0, 0.5), DesignVerdict::Adequate);
        assert_eq!(DesignVerdict::classify(0.71, 1.0, 0.5), DesignVerdict::Marginal);
        assert_eq!(DesignVerdict::classify(0.95, 0.8, 0.5), DesignVerdict::Marginal);
        assert_eq!(DesignVerdict::classify(0.95, 1.2, 0.1), DesignVerdict::Inadequate);
        assert_eq!(DesignVerdict::classify(0.5, 1.0, 0.5), DesignVerdict::Inadequate);
    }

    #[test]
    fn labels_match_serialized_names() {
        let json = serde_json::to_string(&VelocityStatus::TooHigh).unwrap();
        assert_eq!(json, format!("\"{}\"", VelocityStatus::TooHigh));
    }
}
